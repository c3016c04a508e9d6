/*!
 * Core Types
 * Handles, keys and link values shared by the list, shard and bench layers
 */

use std::fmt;

/// Scalar key value carried by every element
pub type KeyValue = u8;

/// Link value meaning "not linked to anything"
pub const NIL: usize = usize::MAX;

/// Stable index of a node inside an [`Arena`](crate::list::Arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub(crate) usize);

impl Handle {
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a key, independent of its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId(pub(crate) u32);

/// Key reference held by an element
///
/// Ordering between keys looks at `value` only. Lookups match on `id`,
/// so two keys with equal values are still told apart.
#[derive(Debug, Clone, Copy)]
pub struct Key {
    id: KeyId,
    value: KeyValue,
}

impl Key {
    #[inline]
    pub(crate) const fn new(id: KeyId, value: KeyValue) -> Self {
        Self { id, value }
    }

    #[inline(always)]
    pub const fn id(&self) -> KeyId {
        self.id
    }

    #[inline(always)]
    pub const fn value(&self) -> KeyValue {
        self.value
    }

    /// Identity comparison (same key reference, not merely equal value)
    #[inline(always)]
    pub fn is(&self, other: &Key) -> bool {
        self.id == other.id
    }

    /// Raw bytes of the key value, as folded by the partitioner
    #[inline]
    pub fn bytes(&self) -> [u8; std::mem::size_of::<KeyValue>()] {
        self.value.to_ne_bytes()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_ascii_graphic() || self.value == b' ' {
            write!(f, "'{}'", self.value as char)
        } else {
            write!(f, "0x{:02x}", self.value)
        }
    }
}
