//! Context passed to providers on refresh.

use alloc::string::String;
use alloc::vec::Vec;
use vellum_core::{Error, Result, TokenInput};

/// Read access to the tokens of a context.
///
/// Providers receive the context on every refresh so they can read sibling
/// tokens. A token that is itself being refreshed reads as not ready.
pub trait Context {
    /// Returns true if a token with the given name exists.
    fn contains(&self, name: &str) -> bool;

    /// Returns true if the named token exists and is ready.
    fn is_ready(&self, name: &str) -> bool;

    /// Returns the rendered values of the named token.
    fn get_values(&self, name: &str, input: Option<&TokenInput>) -> Result<Vec<String>>;
}

/// A context with no tokens.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyContext;

impl Context for EmptyContext {
    fn contains(&self, _name: &str) -> bool {
        false
    }

    fn is_ready(&self, _name: &str) -> bool {
        false
    }

    fn get_values(&self, name: &str, _input: Option<&TokenInput>) -> Result<Vec<String>> {
        Err(Error::token_not_found(name))
    }
}
