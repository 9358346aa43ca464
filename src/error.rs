//! Error type shared by map and set operations.

use std::fmt;

use thiserror::Error;

/// The requested key is absent from the map or set.
///
/// Returned by `lookup` and `remove`; carries the key that was searched
/// for. `discard` is the silent alternative to `remove` for callers that
/// do not care whether the key was present.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
#[error("key not found")]
pub struct KeyNotFound<K>(pub K);

impl<K> KeyNotFound<K> {
    /// Consumes the error, returning the missing key.
    pub fn into_key(self) -> K {
        self.0
    }
}

// Manual impl — a derived Debug would put a `K: Debug` bound on the
// `std::error::Error` impl and from there onto every Result signature.
impl<K> fmt::Debug for KeyNotFound<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyNotFound").finish()
    }
}
