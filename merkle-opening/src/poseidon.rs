//! Poseidon hashing of two-digest blocks, with data-independent child ordering.

use plonky2::{
    field::{extension::Extendable, goldilocks_field::GoldilocksField, types::Field},
    hash::{
        hash_types::{HashOut, HashOutTarget, RichField, NUM_HASH_OUT_ELTS},
        hashing::{hash_n_to_hash_no_pad, PlonkyPermutation},
        poseidon::{PoseidonHash, PoseidonPermutation},
    },
    iop::target::{BoolTarget, Target},
    plonk::{circuit_builder::CircuitBuilder, config::AlgebraicHasher},
};
use std::array;

pub type H = PoseidonHash;
type P = <PoseidonHash as AlgebraicHasher<GoldilocksField>>::AlgebraicPermutation;

/// Hash the concatenation of the two provided 4-wide inputs, swapping them if specified.
pub fn hash_maybe_swap<F, const D: usize>(
    b: &mut CircuitBuilder<F, D>,
    inputs: &[[Target; NUM_HASH_OUT_ELTS]; 2],
    do_swap: BoolTarget,
) -> HashOutTarget
where
    F: RichField + Extendable<D>,
{
    let zero = b.zero();

    let inputs = inputs
        .iter()
        .flat_map(|i| i.iter())
        .copied()
        .collect::<Vec<_>>();
    let mut state = P::new(core::iter::repeat(zero));
    for input_chunk in inputs.chunks(P::RATE) {
        state.set_from_slice(input_chunk, 0);
        state = H::permute_swapped(state, do_swap, b);
    }

    HashOutTarget {
        elements: {
            let mut outputs = Vec::with_capacity(NUM_HASH_OUT_ELTS);
            'aaa: loop {
                for &s in state.squeeze() {
                    outputs.push(s);
                    if outputs.len() == NUM_HASH_OUT_ELTS {
                        break 'aaa;
                    }
                }
                state = H::permute_swapped(state, do_swap, b);
            }
            outputs.try_into().unwrap()
        },
    }
}

/// Picks `a` when the bit is set, `b` otherwise, as a per-element arithmetic
/// select. The choice is a pure field computation; no control flow or memory
/// access depends on the bit.
pub fn select_digest<F: RichField>(bit: bool, a: &HashOut<F>, b: &HashOut<F>) -> HashOut<F> {
    let bit = F::from_bool(bit);
    HashOut {
        elements: array::from_fn(|i| bit * (a.elements[i] - b.elements[i]) + b.elements[i]),
    }
}

/// Native counterpart of [`hash_maybe_swap`]: hashes the concatenation of the
/// two digests, swapped if specified. The swap goes through [`select_digest`]
/// so the bit never drives a branch.
pub fn hash_pair_swapped<F: RichField>(
    inputs: &[HashOut<F>; 2],
    do_swap: bool,
) -> HashOut<F> {
    let left = select_digest(do_swap, &inputs[1], &inputs[0]);
    let right = select_digest(do_swap, &inputs[0], &inputs[1]);

    let preimage: Vec<_> = left
        .elements
        .iter()
        .chain(right.elements.iter())
        .copied()
        .collect();
    hash_n_to_hash_no_pad::<F, PoseidonPermutation<F>>(preimage.as_slice())
}

#[cfg(test)]
mod tests {
    use merkle_opening_test::circuit::{run_circuit, UserCircuit};
    use plonky2::{
        iop::witness::{PartialWitness, WitnessWrite},
        plonk::config::PoseidonGoldilocksConfig,
    };

    use super::*;

    #[test]
    fn hash_maybe_swap_is_equivalent_to_hash_n_false() {
        let a = [GoldilocksField::ZERO; NUM_HASH_OUT_ELTS];
        let b = [GoldilocksField::ONE; NUM_HASH_OUT_ELTS];

        let preimage: Vec<_> = a.iter().chain(b.iter()).copied().collect();
        let h = hash_n_to_hash_no_pad::<GoldilocksField, PoseidonPermutation<GoldilocksField>>(
            preimage.as_slice(),
        );

        let circuit = TestHashSwapCircuit {
            a,
            b,
            do_swap: false,
        };
        let proof = run_circuit::<_, _, PoseidonGoldilocksConfig, _>(circuit);

        assert_eq!(&h.elements[..], proof.public_inputs.as_slice());
    }

    #[test]
    fn hash_maybe_swap_is_equivalent_to_hash_n_true() {
        let a = [GoldilocksField::ZERO; NUM_HASH_OUT_ELTS];
        let b = [GoldilocksField::ONE; NUM_HASH_OUT_ELTS];

        let preimage: Vec<_> = a.iter().chain(b.iter()).copied().collect();
        let h = hash_n_to_hash_no_pad::<GoldilocksField, PoseidonPermutation<GoldilocksField>>(
            preimage.as_slice(),
        );

        let circuit = TestHashSwapCircuit {
            a: b,
            b: a,
            do_swap: true,
        };
        let proof = run_circuit::<_, _, PoseidonGoldilocksConfig, _>(circuit);

        assert_eq!(&h.elements[..], proof.public_inputs.as_slice());
    }

    #[test]
    fn select_digest_picks_by_bit() {
        let a = HashOut {
            elements: [GoldilocksField::ONE; NUM_HASH_OUT_ELTS],
        };
        let b = HashOut {
            elements: [GoldilocksField::TWO; NUM_HASH_OUT_ELTS],
        };

        assert_eq!(select_digest(true, &a, &b), a);
        assert_eq!(select_digest(false, &a, &b), b);
    }

    #[test]
    fn hash_pair_swapped_matches_plain_hash() {
        let a = HashOut {
            elements: [GoldilocksField::ONE; NUM_HASH_OUT_ELTS],
        };
        let b = HashOut {
            elements: [GoldilocksField::TWO; NUM_HASH_OUT_ELTS],
        };

        let preimage: Vec<_> = a
            .elements
            .iter()
            .chain(b.elements.iter())
            .copied()
            .collect();
        let h = hash_n_to_hash_no_pad::<GoldilocksField, PoseidonPermutation<GoldilocksField>>(
            preimage.as_slice(),
        );

        assert_eq!(hash_pair_swapped(&[a, b], false), h);
        assert_eq!(hash_pair_swapped(&[b, a], true), h);
    }

    #[derive(Clone)]
    struct TestHashSwapWires {
        pub a: HashOutTarget,
        pub b: HashOutTarget,
        pub do_swap: BoolTarget,
    }

    #[derive(Debug, Clone)]
    struct TestHashSwapCircuit {
        pub a: [GoldilocksField; NUM_HASH_OUT_ELTS],
        pub b: [GoldilocksField; NUM_HASH_OUT_ELTS],
        pub do_swap: bool,
    }

    impl UserCircuit<GoldilocksField, 2> for TestHashSwapCircuit {
        type Wires = TestHashSwapWires;

        fn build(cb: &mut CircuitBuilder<GoldilocksField, 2>) -> Self::Wires {
            let a = cb.add_virtual_hash();
            let b = cb.add_virtual_hash();
            let do_swap = cb.add_virtual_bool_target_safe();
            let h = hash_maybe_swap(cb, &[a.elements, b.elements], do_swap);

            cb.register_public_inputs(&h.elements);

            TestHashSwapWires { a, b, do_swap }
        }

        fn prove(&self, pw: &mut PartialWitness<GoldilocksField>, wires: &Self::Wires) {
            pw.set_target(
                wires.do_swap.target,
                GoldilocksField::from_bool(self.do_swap),
            );

            for i in 0..NUM_HASH_OUT_ELTS {
                pw.set_target(wires.a.elements[i], self.a[i]);
                pw.set_target(wires.b.elements[i], self.b[i]);
            }
        }
    }
}
