//! Input arguments passed when querying a token.
//!
//! An input argument qualifies a token query, like `{{Season: spring}}`. The
//! raw text is split on commas into positional values; whether more than one
//! value is acceptable is part of the provider's [`InputArguments`] contract.

use crate::error::{Error, Result};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Separator between positional input values.
pub const INPUT_SEPARATOR: char = ',';

/// An input argument for a single query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenInput {
    raw: String,
    values: Vec<String>,
}

impl TokenInput {
    /// Creates an input argument from its raw text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let values = raw
            .split(INPUT_SEPARATOR)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
            .collect();
        Self { raw, values }
    }

    /// Returns the raw text as supplied.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the trimmed input value, or `None` if the input isn't meaningful.
    ///
    /// This is the whole raw text, not the first positional value. Membership
    /// queries compare against it, so `"spring,"` passes a single-value
    /// contract (one positional value) but is tested as `"spring,"`.
    pub fn value(&self) -> Option<&str> {
        let trimmed = self.raw.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Returns the positional values.
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns true if the input has non-whitespace content.
    #[inline]
    pub fn is_meaningful(&self) -> bool {
        self.value().is_some()
    }

    /// Returns true if the input holds more than one positional value.
    #[inline]
    pub fn has_multiple_values(&self) -> bool {
        self.values.len() > 1
    }
}

impl From<&str> for TokenInput {
    fn from(raw: &str) -> Self {
        TokenInput::new(raw)
    }
}

impl From<String> for TokenInput {
    fn from(raw: String) -> Self {
        TokenInput::new(raw)
    }
}

/// Returns the meaningful input value of an optional input argument.
#[inline]
pub fn meaningful_value(input: Option<&TokenInput>) -> Option<&str> {
    input.and_then(TokenInput::value)
}

/// Returns true if an optional input argument is present and meaningful.
#[inline]
pub fn is_meaningful(input: Option<&TokenInput>) -> bool {
    meaningful_value(input).is_some()
}

/// The input argument contract declared by a provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputArguments {
    allowed: bool,
    required: bool,
    multiple: bool,
}

impl InputArguments {
    /// A provider that accepts no input argument.
    pub const fn none() -> Self {
        Self {
            allowed: false,
            required: false,
            multiple: false,
        }
    }

    /// A provider that accepts an optional single-value input argument.
    pub const fn optional_single() -> Self {
        Self::none().allowed(true)
    }

    /// Sets whether an input argument is accepted.
    pub const fn allowed(mut self, allowed: bool) -> Self {
        self.allowed = allowed;
        if !allowed {
            self.required = false;
            self.multiple = false;
        }
        self
    }

    /// Sets whether an input argument must be given. Implies `allowed`.
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        if required {
            self.allowed = true;
        }
        self
    }

    /// Sets whether the input may hold multiple values. Implies `allowed`.
    pub const fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        if multiple {
            self.allowed = true;
        }
        self
    }

    /// Returns true if an input argument is accepted.
    #[inline]
    pub const fn allows_input(&self) -> bool {
        self.allowed
    }

    /// Returns true if an input argument must be given.
    #[inline]
    pub const fn requires_input(&self) -> bool {
        self.required
    }

    /// Returns true if the input may hold multiple values.
    #[inline]
    pub const fn allows_multiple_values(&self) -> bool {
        self.multiple
    }

    /// Checks an input argument against this contract.
    pub fn validate(&self, token: &str, input: Option<&TokenInput>) -> Result<()> {
        let meaningful = is_meaningful(input);
        if meaningful && !self.allowed {
            return Err(Error::invalid_input(token, "the token doesn't allow input arguments"));
        }
        if !meaningful && self.required {
            return Err(Error::invalid_input(token, "the token requires an input argument"));
        }
        if !self.multiple && input.is_some_and(TokenInput::has_multiple_values) {
            return Err(Error::invalid_input(
                token,
                "the token doesn't allow multiple input values",
            ));
        }
        Ok(())
    }
}
