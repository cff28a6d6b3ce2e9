//! Conversions between boundary encodings and field elements.

use plonky2::hash::hash_types::RichField;

pub trait ToFields<F: RichField> {
    fn to_fields(&self) -> Vec<F>;
}

impl<F: RichField> ToFields<F> for &[u8] {
    fn to_fields(&self) -> Vec<F> {
        self.iter().map(|x| F::from_canonical_u8(*x)).collect()
    }
}
impl<F: RichField> ToFields<F> for &[u32] {
    fn to_fields(&self) -> Vec<F> {
        self.iter().map(|x| F::from_canonical_u32(*x)).collect()
    }
}

pub trait Fieldable<F: RichField> {
    fn to_field(&self) -> F;
}

impl<F: RichField> Fieldable<F> for u8 {
    fn to_field(&self) -> F {
        F::from_canonical_u8(*self)
    }
}

impl<F: RichField> Fieldable<F> for u32 {
    fn to_field(&self) -> F {
        F::from_canonical_u32(*self)
    }
}

impl<F: RichField, T: Fieldable<F>> ToFields<F> for Vec<T> {
    fn to_fields(&self) -> Vec<F> {
        self.iter().map(|x| x.to_field()).collect()
    }
}

impl<F: RichField, const N: usize, T: Fieldable<F>> ToFields<F> for [T; N] {
    fn to_fields(&self) -> Vec<F> {
        self.iter().map(|x| x.to_field()).collect()
    }
}

pub enum Endianness {
    Big,
    Little,
}

pub trait Packer {
    type T;
    fn pack(&self, endianness: Endianness) -> Vec<Self::T>;
}

impl Packer for &[u8] {
    type T = u32;
    fn pack(&self, endianness: Endianness) -> Vec<u32> {
        match endianness {
            Endianness::Big => {
                let pad_len = if self.len() % 4 == 0 {
                    0
                } else {
                    4 - (self.len() % 4)
                };
                let mut d = vec![0u8; pad_len];
                d.extend_from_slice(self);
                d.chunks_exact(4)
                    .map(|chunk| u32::from_be_bytes(chunk.try_into().unwrap()))
                    .collect()
            }
            Endianness::Little => {
                let mut d = self.to_vec();
                if self.len() % 4 != 0 {
                    d.resize(self.len() + (4 - (self.len() % 4)), 0);
                }
                d.chunks_exact(4)
                    .map(|chunk| u32::from_le_bytes(chunk.try_into().unwrap()))
                    .collect()
            }
        }
    }
}

impl Packer for Vec<u8> {
    type T = u32;
    fn pack(&self, endianness: Endianness) -> Vec<u32> {
        self.as_slice().pack(endianness)
    }
}

impl<const N: usize> Packer for &[u8; N] {
    type T = u32;
    fn pack(&self, endianness: Endianness) -> Vec<u32> {
        self.as_slice().pack(endianness)
    }
}
