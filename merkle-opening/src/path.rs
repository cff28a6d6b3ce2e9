//! Authentication-path data model and the native fixed-depth verifier.

use crate::poseidon::hash_pair_swapped;
use crate::F;
use anyhow::{ensure, Result};
use log::debug;
use plonky2::hash::hash_types::HashOut;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// One level of an authentication path.
///
/// `direction == true` means the running digest is the right child at this
/// level, i.e. the hashed block is `(sibling || current)`; `false` means
/// `(current || sibling)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub direction: bool,
    pub sibling: HashOut<F>,
}

/// An ordered sequence of `DEPTH` path entries, leaf-adjacent level first.
///
/// The depth is structural: a path of any other length cannot be constructed,
/// so the verifier never has to distinguish a truncated path from an invalid
/// membership claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticationPath<const DEPTH: usize> {
    entries: [PathEntry; DEPTH],
}

impl<const DEPTH: usize> AuthenticationPath<DEPTH> {
    pub fn new(entries: [PathEntry; DEPTH]) -> Self {
        Self { entries }
    }

    /// Builds a path from a vector of entries. The length must match the
    /// depth exactly; a mismatch is a structural error on the caller side,
    /// distinct from a proof that does not verify.
    pub fn from_entries(entries: Vec<PathEntry>) -> Result<Self> {
        ensure!(
            entries.len() == DEPTH,
            "authentication path has {} entries, tree depth is {}",
            entries.len(),
            DEPTH,
        );
        Ok(Self {
            entries: entries.try_into().unwrap(),
        })
    }

    pub fn entries(&self) -> &[PathEntry; DEPTH] {
        &self.entries
    }
}

impl<const DEPTH: usize> Serialize for AuthenticationPath<DEPTH> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.as_slice().serialize(serializer)
    }
}

impl<'de, const DEPTH: usize> Deserialize<'de> for AuthenticationPath<DEPTH> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<PathEntry>::deserialize(deserializer)?;
        Self::from_entries(entries).map_err(de::Error::custom)
    }
}

/// Recomputes the root implied by the leaf and the path.
///
/// Every level is always processed and the child ordering at each level is a
/// branch-free select, so the computation shape is identical for all inputs
/// of a given depth.
pub fn compute_root<const DEPTH: usize>(
    leaf: &HashOut<F>,
    path: &AuthenticationPath<DEPTH>,
) -> HashOut<F> {
    path.entries.iter().fold(*leaf, |current, entry| {
        hash_pair_swapped(&[current, entry.sibling], entry.direction)
    })
}

/// Verifies that `leaf` opens to `root` through `path`.
///
/// Returns `false` for an invalid membership claim; structural misuse is
/// impossible here since the path length is fixed by its type. Pure and
/// deterministic: no state survives the call.
pub fn verify_opening<const DEPTH: usize>(
    root: &HashOut<F>,
    leaf: &HashOut<F>,
    path: &AuthenticationPath<DEPTH>,
) -> bool {
    debug!("verifying Merkle opening at depth {}", DEPTH);
    compute_root(leaf, path) == *root
}

/// [`verify_opening`] over unsized inputs: checks the entry count against the
/// depth before any hashing, then verifies.
///
/// `Err` reports caller misuse (wrong path length); `Ok(false)` is the normal
/// outcome for a claim that does not hold.
pub fn verify_opening_slice<const DEPTH: usize>(
    root: &HashOut<F>,
    leaf: &HashOut<F>,
    entries: &[PathEntry],
) -> Result<bool> {
    let path = AuthenticationPath::<DEPTH>::from_entries(entries.to_vec())?;
    Ok(verify_opening(root, leaf, &path))
}
