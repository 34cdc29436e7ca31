//! Change detection for token values.
//!
//! `replace_if_changed` is the compare-and-swap used by providers on every
//! refresh. `ValueChange` describes what changed, for subscribers.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use vellum_core::{InvariantSet, TokenName};

/// Replaces `slot` with `next` if they differ, returning whether it did.
///
/// With an [`InvariantSet`] this compares case-insensitively and ignores
/// order, so an equivalent set never counts as a change.
pub fn replace_if_changed<T: PartialEq>(slot: &mut T, next: T) -> bool {
    if *slot == next {
        return false;
    }
    *slot = next;
    true
}

/// A change to the values of one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueChange {
    /// The token that changed
    pub token: TokenName,
    /// Values present after the refresh but not before
    pub added: Vec<String>,
    /// Values present before the refresh but not after
    pub removed: Vec<String>,
    /// Whether the token is ready after the refresh
    pub ready: bool,
}

impl ValueChange {
    /// Creates a change record from two snapshots of a token's values.
    pub fn between(token: TokenName, old: &InvariantSet, new: &InvariantSet, ready: bool) -> Self {
        Self {
            token,
            added: new.difference(old).map(ToString::to_string).collect(),
            removed: old.difference(new).map(ToString::to_string).collect(),
            ready,
        }
    }

    /// Returns true if no values were added or removed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Returns the total number of added and removed values.
    #[inline]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}
