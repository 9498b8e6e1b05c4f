//! Name hashing for bone identity lookup.

/// Stable identity of a bone, derived from its name.
///
/// The value is the CRC-32 (IEEE) of the UTF-8 name reinterpreted as `i32`, which is the
/// convention engines use for their `StringToHash` helpers. Hosts that hash differently can build
/// values with [`BoneHash::from_raw`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BoneHash(i32);

impl BoneHash {
    pub fn of(name: &str) -> Self {
        Self(crc32fast::hash(name.as_bytes()) as i32)
    }

    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl From<&str> for BoneHash {
    fn from(name: &str) -> Self {
        Self::of(name)
    }
}
