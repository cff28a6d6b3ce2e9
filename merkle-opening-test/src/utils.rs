use merkle_opening::{
    path::{AuthenticationPath, PathEntry},
    F,
};
use plonky2::{
    field::types::Field,
    hash::{
        hash_types::{HashOut, NUM_HASH_OUT_ELTS},
        hashing::hash_n_to_hash_no_pad,
        poseidon::PoseidonPermutation,
    },
};
use rand::{
    distributions::{Distribution, Standard},
    thread_rng, Rng, RngCore,
};
use std::array;

/// Generate a random vector.
pub fn random_vector<T>(size: usize) -> Vec<T>
where
    Standard: Distribution<T>,
{
    (0..size).map(|_| thread_rng().gen::<T>()).collect()
}

/// Generate a random digest from the provided generator.
pub fn random_digest<R: RngCore>(rng: &mut R) -> HashOut<F> {
    HashOut {
        elements: array::from_fn(|_| F::from_canonical_u32(rng.next_u32())),
    }
}

/// Builds a random but consistent opening of the given depth: a leaf, a path
/// with random sibling digests and orientations, and the root they hash up to.
///
/// The root is recomputed here by explicit preimage concatenation, on purpose
/// independent from the verifier under test.
pub fn random_opening<const DEPTH: usize>(
    rng: &mut impl RngCore,
) -> (HashOut<F>, HashOut<F>, AuthenticationPath<DEPTH>) {
    let leaf = random_digest(rng);

    let mut root = leaf;
    let entries = array::from_fn(|_| {
        let entry = PathEntry {
            direction: (rng.next_u32() & 1) == 1,
            sibling: random_digest(rng),
        };

        let mut preimage = Vec::with_capacity(2 * NUM_HASH_OUT_ELTS);
        if entry.direction {
            preimage.extend_from_slice(&entry.sibling.elements);
            preimage.extend_from_slice(&root.elements);
        } else {
            preimage.extend_from_slice(&root.elements);
            preimage.extend_from_slice(&entry.sibling.elements);
        }
        root = hash_n_to_hash_no_pad::<F, PoseidonPermutation<F>>(preimage.as_slice());

        entry
    });

    (root, leaf, AuthenticationPath::new(entries))
}
