//! Vellum Tokens - Dynamic set-valued token providers.
//!
//! A token exposes a changing collection of string values under a stable
//! name. Hosts refresh every token once per context generation and learn which
//! tokens changed, so dependents are only recomputed when needed.
//!
//! # Core Concepts
//!
//! - `ValueProvider`: The contract every token implements (queries, bounded values, refresh)
//! - `SimpleValueProvider`: A token whose values come from a producer function
//! - `TokenRegistry`: Owns tokens, drives refreshes, acts as the `Context`
//! - `ValueChange`: What changed in a token, delivered to subscribers
//!
//! # Query Shapes
//!
//! - No input argument: enumerate the current values
//! - An input argument: answer whether it is one of the current values
//!
//! # Example
//!
//! ```rust
//! use vellum_core::{QueryResult, TokenInput};
//! use vellum_tokens::{Context, TokenRegistry};
//!
//! let mut registry = TokenRegistry::new();
//! registry.register_simple("Season", || Some(vec!["Spring", "Summer"])).unwrap();
//!
//! // Not ready until the first refresh
//! assert!(!registry.is_ready("Season"));
//! assert_eq!(registry.update_context().unwrap().len(), 1);
//!
//! let winter = TokenInput::new("winter");
//! assert_eq!(registry.query("Season", Some(&winter)).unwrap(), QueryResult::Membership(false));
//!
//! // Unchanged producer output doesn't count as a change
//! assert!(registry.update_context().unwrap().is_empty());
//! ```

#![no_std]

extern crate alloc;

pub mod change;
pub mod context;
pub mod provider;
pub mod registry;
pub mod simple;
pub mod subscription;

pub use change::{replace_if_changed, ValueChange};
pub use context::{Context, EmptyContext};
pub use provider::{ProviderState, ValueProvider};
pub use registry::{FailurePolicy, RegistryOptions, TokenId, TokenRegistry};
pub use simple::{Producer, ProducerResult, SimpleValueProvider};
pub use subscription::{ChangeCallback, Subscription, SubscriptionId, SubscriptionManager};

// Re-export commonly used types from dependencies
pub use vellum_core::{
    Error, InputArguments, InvariantSet, QueryResult, Result, TokenInput, TokenName,
};
