//! Serde support for plonky2 wire targets, bridged through the byte
//! serialization plonky2 ships for its own types.

use plonky2::{
    hash::hash_types::HashOutTarget,
    iop::target::{BoolTarget, Target},
    util::serialization::{Buffer, IoError, Read, Write},
};
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

/// Provides API to serialize a data structure into a sequence of bytes
pub trait ToBytes {
    /// Convert `self` to a sequence of bytes
    fn to_bytes(&self) -> Vec<u8>;
}

/// Provides API to construct a data structure from a sequence of bytes
pub trait FromBytes: Sized {
    /// Construct an instance of `Self` from a sequence of bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError>;
}

/// Error type for serialization methods implemented in this module
pub struct SerializationError(String);

impl From<IoError> for SerializationError {
    fn from(value: IoError) -> Self {
        Self(format!("{value}"))
    }
}

impl SerializationError {
    fn to_de_error<T: Error>(self) -> T {
        T::custom(self.0)
    }
}

/// Byte-vector carrier allowing a single serde representation for every type
/// implementing `ToBytes`/`FromBytes`.
#[derive(Serialize, Deserialize)]
struct SerializationBytesWrapper(Vec<u8>);

/// Serde shim for wire fields: `#[serde(serialize_with = "serialize", ...)]`.
pub fn serialize<T: ToBytes, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    SerializationBytesWrapper(value.to_bytes()).serialize(serializer)
}

/// Serde shim for wire fields: `#[serde(deserialize_with = "deserialize", ...)]`.
pub fn deserialize<'de, D: Deserializer<'de>, T: FromBytes>(
    deserializer: D,
) -> Result<T, D::Error> {
    let bytes = SerializationBytesWrapper::deserialize(deserializer)?;
    T::from_bytes(&bytes.0).map_err(SerializationError::to_de_error)
}

/// As [`serialize`], for fixed-length arrays of targets.
pub fn serialize_array<T: ToBytes + Clone, S: Serializer, const N: usize>(
    value: &[T; N],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serialize(&value.to_vec(), serializer)
}

/// As [`deserialize`], for fixed-length arrays of targets. The serialized
/// length must match `N` exactly.
pub fn deserialize_array<'de, D: Deserializer<'de>, T, const N: usize>(
    deserializer: D,
) -> Result<[T; N], D::Error>
where
    Vec<T>: FromBytes,
{
    let elements: Vec<T> = deserialize(deserializer)?;
    let len = elements.len();
    elements
        .try_into()
        .map_err(|_| D::Error::custom(format!("expected {N} serialized targets, got {len}")))
}

impl ToBytes for Target {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        buffer
            .write_target(*self)
            .expect("Writing to a byte-vector cannot fail.");
        buffer
    }
}

impl FromBytes for Target {
    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        let mut buffer = Buffer::new(bytes);
        Ok(buffer.read_target()?)
    }
}

impl ToBytes for BoolTarget {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        buffer
            .write_target_bool(*self)
            .expect("Writing to a byte-vector cannot fail.");
        buffer
    }
}

impl FromBytes for BoolTarget {
    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        let mut buffer = Buffer::new(bytes);
        Ok(buffer.read_target_bool()?)
    }
}

impl ToBytes for HashOutTarget {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        buffer
            .write_target_hash(self)
            .expect("Writing to a byte-vector cannot fail.");
        buffer
    }
}

impl FromBytes for HashOutTarget {
    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        let mut buffer = Buffer::new(bytes);
        Ok(buffer.read_target_hash()?)
    }
}

impl<T: ToBytes> ToBytes for Vec<T> {
    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        buffer
            .write_usize(self.len())
            .expect("Writing to a byte-vector cannot fail.");
        for el in self {
            buffer.extend_from_slice(el.to_bytes().as_slice());
        }
        buffer
    }
}

impl FromBytes for Vec<BoolTarget> {
    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        let mut buffer = Buffer::new(bytes);
        Ok(buffer.read_target_bool_vec()?)
    }
}

impl FromBytes for Vec<HashOutTarget> {
    fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        let mut buffer = Buffer::new(bytes);
        let len = buffer.read_usize()?;
        (0..len).map(|_| Ok(buffer.read_target_hash()?)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CBuilder;
    use plonky2::plonk::circuit_data::CircuitConfig;
    use std::array;

    #[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
    struct TargetsBundle {
        #[serde(serialize_with = "serialize", deserialize_with = "deserialize")]
        flag: BoolTarget,
        #[serde(serialize_with = "serialize", deserialize_with = "deserialize")]
        digest: HashOutTarget,
        #[serde(serialize_with = "serialize_array", deserialize_with = "deserialize_array")]
        digests: [HashOutTarget; 3],
        #[serde(serialize_with = "serialize_array", deserialize_with = "deserialize_array")]
        flags: [BoolTarget; 4],
    }

    #[test]
    fn targets_serde_roundtrip() {
        let mut cb = CBuilder::new(CircuitConfig::standard_recursion_config());
        let bundle = TargetsBundle {
            flag: cb.add_virtual_bool_target_safe(),
            digest: cb.add_virtual_hash(),
            digests: array::from_fn(|_| cb.add_virtual_hash()),
            flags: array::from_fn(|_| cb.add_virtual_bool_target_safe()),
        };

        let encoded = serde_json::to_string(&bundle).unwrap();
        let decoded: TargetsBundle = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, bundle);
    }
}
