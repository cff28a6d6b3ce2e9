//! Test tooling for the opening verifier: a thin circuit build/prove harness
//! and random witness generators.

pub mod circuit;
pub mod utils;
