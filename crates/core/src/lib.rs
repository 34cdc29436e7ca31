//! Vellum Core - Core types for Vellum token providers.
//!
//! This crate provides the building blocks shared by every token provider:
//!
//! - `TokenName`: A validated, case-insensitive token name, optionally scoped to an owner
//! - `InvariantSet`: A case-insensitive string set
//! - `TokenInput`: An input argument passed with a query
//! - `InputArguments`: The input argument contract a provider declares
//! - `QueryResult`: Enumeration or membership answer to a query
//! - `Error`: Error types for token operations
//!
//! # Example
//!
//! ```rust
//! use vellum_core::{InputArguments, InvariantSet, TokenInput, TokenName};
//!
//! let name = TokenName::scoped("Example.Mod", "Season").unwrap();
//! assert_eq!(name.as_str(), "Example.Mod/Season");
//!
//! let values: InvariantSet = ["Spring", "Summer"].into_iter().collect();
//! assert!(values.contains("SPRING"));
//!
//! let args = InputArguments::optional_single();
//! assert!(args.validate(name.as_str(), Some(&TokenInput::new("spring"))).is_ok());
//! assert!(args.validate(name.as_str(), Some(&TokenInput::new("spring, fall"))).is_err());
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod input;
mod name;
mod query;
pub mod set;

pub use error::{Error, Result};
pub use input::{is_meaningful, meaningful_value, InputArguments, TokenInput};
pub use name::{TokenName, SCOPE_SEPARATOR};
pub use query::{render_bool, QueryResult};
pub use set::{fold_case, InvariantSet, FALSE_VALUE, TRUE_VALUE};
