//! In-circuit rendition of the fixed-depth opening verifier.

use crate::{
    path::AuthenticationPath,
    poseidon::hash_maybe_swap,
    serialization::{deserialize, deserialize_array, serialize, serialize_array},
    F,
};
use itertools::Itertools;
use plonky2::{
    field::extension::Extendable,
    hash::hash_types::{HashOut, HashOutTarget, RichField},
    iop::{
        target::BoolTarget,
        witness::{PartialWitness, WitnessWrite},
    },
    plonk::circuit_builder::CircuitBuilder,
};
use serde::{Deserialize, Serialize};
use std::array;

/// Recomputes the root implied by the leaf and the per-level (direction,
/// sibling) wires. One `hash_maybe_swap` per level; the circuit shape is a
/// function of `directions.len()` alone, never of witness values.
///
/// The two slices must have the same length; handing mismatched ones to the
/// builder is a programming error and panics.
pub fn opening_root<F, const D: usize>(
    cb: &mut CircuitBuilder<F, D>,
    leaf: HashOutTarget,
    siblings: &[HashOutTarget],
    directions: &[BoolTarget],
) -> HashOutTarget
where
    F: RichField + Extendable<D>,
{
    siblings
        .iter()
        .zip_eq(directions.iter())
        .fold(leaf, |current, (sibling, direction)| {
            hash_maybe_swap(cb, &[current.elements, sibling.elements], *direction)
        })
}

/// Wires opening a leaf digest to a Merkle root through a path of exactly
/// `DEPTH` levels.
///
/// The gadget does not register public inputs nor marks any witness public;
/// which parts of the opening are published is a deployment choice left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleOpeningWires<const DEPTH: usize> {
    /// The digest whose membership is being proven.
    #[serde(serialize_with = "serialize", deserialize_with = "deserialize")]
    pub leaf: HashOutTarget,
    /// One sibling digest per level, leaf-adjacent level first.
    #[serde(serialize_with = "serialize_array", deserialize_with = "deserialize_array")]
    pub siblings: [HashOutTarget; DEPTH],
    /// Per-level child ordering; `true` puts the running digest on the right.
    #[serde(serialize_with = "serialize_array", deserialize_with = "deserialize_array")]
    pub directions: [BoolTarget; DEPTH],
    /// The recomputed root.
    #[serde(serialize_with = "serialize", deserialize_with = "deserialize")]
    pub root: HashOutTarget,
}

impl<const DEPTH: usize> MerkleOpeningWires<DEPTH> {
    /// Allocates the opening witness wires and builds the root recomputation.
    pub fn build<F, const D: usize>(cb: &mut CircuitBuilder<F, D>) -> Self
    where
        F: RichField + Extendable<D>,
    {
        let leaf = cb.add_virtual_hash();
        let siblings = array::from_fn(|_| cb.add_virtual_hash());
        let directions = array::from_fn(|_| cb.add_virtual_bool_target_safe());
        let root = opening_root(cb, leaf, &siblings, &directions);

        Self {
            leaf,
            siblings,
            directions,
            root,
        }
    }

    /// Constrains the recomputed root to equal `expected`. A mismatching
    /// witness leaves the circuit unsatisfied instead of returning `false`.
    pub fn enforce_root<F, const D: usize>(
        &self,
        cb: &mut CircuitBuilder<F, D>,
        expected: HashOutTarget,
    ) where
        F: RichField + Extendable<D>,
    {
        cb.connect_hashes(self.root, expected);
    }

    /// Assigns the leaf and path witnesses.
    pub fn assign(
        &self,
        pw: &mut PartialWitness<F>,
        leaf: &HashOut<F>,
        path: &AuthenticationPath<DEPTH>,
    ) {
        pw.set_hash_target(self.leaf, *leaf);

        for (i, entry) in path.entries().iter().enumerate() {
            pw.set_bool_target(self.directions[i], entry.direction);
            pw.set_hash_target(self.siblings[i], entry.sibling);
        }
    }
}
