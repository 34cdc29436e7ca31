//! Query results.

use crate::set::{FALSE_VALUE, TRUE_VALUE};
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

/// The result of querying a token.
///
/// A query without a meaningful input argument enumerates the token's values;
/// a query with one asks whether that value is in the set. Hosts that only
/// deal in strings render both through [`QueryResult::into_values`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryResult {
    /// The current values of the token (empty when not ready).
    Values(Vec<String>),
    /// Whether the input value is one of the current values.
    Membership(bool),
}

impl QueryResult {
    /// Creates an empty enumeration result.
    #[inline]
    pub fn empty() -> Self {
        QueryResult::Values(Vec::new())
    }

    /// Returns true if the result has no values to contribute.
    pub fn is_empty(&self) -> bool {
        match self {
            QueryResult::Values(values) => values.is_empty(),
            QueryResult::Membership(_) => false,
        }
    }

    /// Returns the membership answer, if this is a membership result.
    pub fn as_membership(&self) -> Option<bool> {
        match self {
            QueryResult::Membership(found) => Some(*found),
            QueryResult::Values(_) => None,
        }
    }

    /// Renders the result as token values; membership becomes `"True"` or `"False"`.
    pub fn into_values(self) -> Vec<String> {
        match self {
            QueryResult::Values(values) => values,
            QueryResult::Membership(found) => vec![render_bool(found)],
        }
    }
}

/// Renders a boolean as a token value.
pub fn render_bool(value: bool) -> String {
    let rendered = if value { TRUE_VALUE } else { FALSE_VALUE };
    rendered.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_values() {
        assert_eq!(QueryResult::Membership(true).into_values(), vec!["True"]);
        assert_eq!(QueryResult::Membership(false).into_values(), vec!["False"]);
        let values = QueryResult::Values(vec!["Spring".into()]).into_values();
        assert_eq!(values, vec!["Spring"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(QueryResult::empty().is_empty());
        assert!(!QueryResult::Membership(false).is_empty());
        assert!(!QueryResult::Values(vec!["a".into()]).is_empty());
    }

    #[test]
    fn test_as_membership() {
        assert_eq!(QueryResult::Membership(true).as_membership(), Some(true));
        assert_eq!(QueryResult::empty().as_membership(), None);
    }
}
