//! Fixed-depth Merkle authentication-path verification.
//!
//! Given a claimed root, a leaf digest and one (direction bit, sibling
//! digest) pair per tree level, the verifier recomputes the root bottom-up
//! and checks it against the claimed one. The per-level child ordering is
//! selected by the direction bit without branching on it, so the same
//! algorithm is usable when the leaf and the path orientation are secret.
//!
//! The algorithm is provided in two equivalent renditions sharing one data
//! model: a native function ([`path::verify_opening`]) and a plonky2 wire
//! structure ([`gadget::MerkleOpeningWires`]) enforcing the equality as a
//! circuit constraint.

use plonky2::plonk::config::{GenericConfig, PoseidonGoldilocksConfig};

pub mod gadget;
pub mod path;
pub mod poseidon;
pub mod serialization;
pub mod types;
pub mod utils;

pub const D: usize = 2;
pub type C = PoseidonGoldilocksConfig;
pub type F = <C as GenericConfig<D>>::F;
