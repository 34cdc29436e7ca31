//! Set-valued token provider backed by a producer function.
//!
//! `SimpleValueProvider` exposes whatever its producer returns as the token's
//! values. It's ready while the producer returns at least one value, and
//! reports a change only when the case-insensitive set of values differs from
//! the previous refresh.

use crate::change::replace_if_changed;
use crate::context::Context;
use crate::provider::{ProviderState, ValueProvider};
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use tracing::trace;
use vellum_core::{
    meaningful_value, Error, InputArguments, InvariantSet, QueryResult, Result, TokenInput,
    TokenName,
};

/// A producer returning the current values, or `None` when there are none.
/// `Err` carries the producer's failure message.
pub type Producer = Box<dyn FnMut() -> ProducerResult>;

/// The output of a [`Producer`].
pub type ProducerResult = core::result::Result<Option<Vec<String>>, String>;

/// A token whose values come from a producer function.
///
/// # Example
///
/// ```rust
/// use vellum_core::{QueryResult, TokenInput};
/// use vellum_tokens::{EmptyContext, SimpleValueProvider, ValueProvider};
///
/// let mut season = SimpleValueProvider::new("Season", || Some(vec!["Spring", "Summer"])).unwrap();
/// assert!(!season.is_ready());
///
/// assert!(season.update_context(&EmptyContext).unwrap());
/// assert!(season.is_ready());
///
/// let spring = TokenInput::new("spring");
/// assert_eq!(season.query(Some(&spring)).unwrap(), QueryResult::Membership(true));
/// assert_eq!(season.get_values(Some(&spring)).unwrap(), vec!["True"]);
/// ```
pub struct SimpleValueProvider {
    state: ProviderState,
    producer: Producer,
    /// The values as of the last refresh
    values: InvariantSet,
}

impl SimpleValueProvider {
    /// Creates a provider, validating the name.
    pub fn new<F, I>(name: &str, producer: F) -> Result<Self>
    where
        F: FnMut() -> Option<I> + 'static,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Ok(Self::with_name(TokenName::new(name)?, producer))
    }

    /// Creates a provider for an already validated name.
    pub fn with_name<F, I>(name: TokenName, mut producer: F) -> Self
    where
        F: FnMut() -> Option<I> + 'static,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::from_producer(
            name,
            Box::new(move || -> ProducerResult {
                Ok(producer().map(|values| values.into_iter().map(Into::into).collect()))
            }),
        )
    }

    /// Creates a provider whose producer may fail.
    ///
    /// A failure is returned from [`update_context`](ValueProvider::update_context)
    /// as [`Error::Producer`] and leaves the previous values in place.
    pub fn fallible<F, I, E>(name: TokenName, mut producer: F) -> Self
    where
        F: FnMut() -> core::result::Result<Option<I>, E> + 'static,
        I: IntoIterator,
        I::Item: Into<String>,
        E: fmt::Display,
    {
        Self::from_producer(
            name,
            Box::new(move || -> ProducerResult {
                match producer() {
                    Ok(values) => {
                        Ok(values.map(|values| values.into_iter().map(Into::into).collect()))
                    }
                    Err(err) => Err(err.to_string()),
                }
            }),
        )
    }

    fn from_producer(name: TokenName, producer: Producer) -> Self {
        let mut state = ProviderState::new(name, true);
        state.enable_input_arguments(InputArguments::optional_single(), false);
        state.mark_ready(false);
        Self {
            state,
            producer,
            values: InvariantSet::new(),
        }
    }

    /// Returns the values as of the last refresh.
    #[inline]
    pub fn values(&self) -> &InvariantSet {
        &self.values
    }
}

impl ValueProvider for SimpleValueProvider {
    fn name(&self) -> &TokenName {
        self.state.name()
    }

    fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    fn input_arguments(&self) -> InputArguments {
        self.state.input_arguments()
    }

    fn can_have_multiple_values(&self, input: Option<&TokenInput>) -> bool {
        self.state.can_have_multiple_values(input)
    }

    /// A membership query can only answer `True` or `False`; an enumeration
    /// isn't bounded.
    fn has_bounded_values(&self, input: Option<&TokenInput>) -> Result<Option<InvariantSet>> {
        self.state.assert_input(input)?;
        Ok(meaningful_value(input).map(|_| InvariantSet::boolean()))
    }

    fn query(&self, input: Option<&TokenInput>) -> Result<QueryResult> {
        self.state.assert_input(input)?;

        if !self.state.is_ready() {
            return Ok(QueryResult::empty());
        }

        Ok(match meaningful_value(input) {
            Some(value) => QueryResult::Membership(self.values.contains(value)),
            None => QueryResult::Values(self.values.to_vec()),
        })
    }

    fn update_context(&mut self, _context: &dyn Context) -> Result<bool> {
        let produced = match (self.producer)() {
            Ok(produced) => produced,
            Err(message) => return Err(Error::producer(self.state.name().as_str(), message)),
        };
        let next: InvariantSet = produced.unwrap_or_default().into_iter().collect();

        let changed = replace_if_changed(&mut self.values, next);
        if changed {
            self.state.mark_ready(!self.values.is_empty());
        }

        trace!(
            token = %self.state.name(),
            changed,
            ready = self.state.is_ready(),
            values = self.values.len(),
            "refreshed simple token"
        );
        Ok(changed)
    }
}

impl fmt::Debug for SimpleValueProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleValueProvider")
            .field("name", self.state.name())
            .field("ready", &self.state.is_ready())
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}
