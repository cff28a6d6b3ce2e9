//! Custom types

use crate::{D, F};
use anyhow::ensure;
use derive_more::Deref;
use plonky2::{
    hash::hash_types::HashOut,
    plonk::{circuit_builder::CircuitBuilder, config::GenericHashOut},
};
use serde::{Deserialize, Serialize};

use crate::utils::{Endianness, Packer};

/// Default circuit builder
pub type CBuilder = CircuitBuilder<F, D>;

/// Byte length of a digest
pub const DIGEST_LEN: usize = 32;
/// Length of a digest when packed in u32
pub const PACKED_DIGEST_LEN: usize = DIGEST_LEN / 4;

/// Boundary encoding of a digest: the 32-byte serialization of the four
/// Goldilocks elements of a Poseidon output, each in canonical little-endian
/// form. Equality is exact, bitwise.
#[derive(Clone, Copy, Hash, Default, Debug, Serialize, Deserialize, Deref, PartialEq, Eq)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Packs the digest into the reference 8-word little-endian encoding.
    pub fn to_words(&self) -> [u32; PACKED_DIGEST_LEN] {
        self.0
            .as_slice()
            .pack(Endianness::Little)
            .try_into()
            .unwrap()
    }

    /// Rebuilds a digest from its 8-word little-endian encoding.
    pub fn from_words(words: [u32; PACKED_DIGEST_LEN]) -> Self {
        let mut bytes = [0u8; DIGEST_LEN];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Self(bytes)
    }
}

impl AsRef<[u8]> for &Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(value: [u8; DIGEST_LEN]) -> Self {
        Self(value)
    }
}

impl TryFrom<Vec<u8>> for Digest {
    type Error = anyhow::Error;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        ensure!(value.len() == DIGEST_LEN, "invalid length of the vector");
        Ok(Self(value.try_into().unwrap()))
    }
}

impl From<HashOut<F>> for Digest {
    fn from(value: HashOut<F>) -> Self {
        value.to_bytes().try_into().unwrap()
    }
}

impl From<&HashOut<F>> for Digest {
    fn from(value: &HashOut<F>) -> Self {
        value.to_bytes().try_into().unwrap()
    }
}

impl From<Digest> for HashOut<F> {
    fn from(value: Digest) -> Self {
        Self::from_bytes(&value.0)
    }
}

impl From<&Digest> for HashOut<F> {
    fn from(value: &Digest) -> Self {
        Self::from_bytes(&value.0)
    }
}
