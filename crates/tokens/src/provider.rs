//! The value provider contract and the state every provider shares.

use crate::context::Context;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::RangeInclusive;
use vellum_core::{
    is_meaningful, Error, InputArguments, InvariantSet, QueryResult, Result, TokenInput, TokenName,
};

/// A named source of token values.
///
/// The host calls [`update_context`](ValueProvider::update_context) once per
/// context generation, then any number of queries until the next refresh.
/// Queries never change the provider's state.
pub trait ValueProvider {
    /// Returns the token name.
    fn name(&self) -> &TokenName;

    /// Returns true if the token currently has values to contribute.
    fn is_ready(&self) -> bool;

    /// Returns the input argument contract.
    fn input_arguments(&self) -> InputArguments;

    /// Returns true if the values may change between refreshes.
    fn is_mutable(&self) -> bool {
        true
    }

    /// Returns true if an input argument is accepted.
    fn allows_input(&self) -> bool {
        self.input_arguments().allows_input()
    }

    /// Returns true if an input argument must be given.
    fn requires_input(&self) -> bool {
        self.input_arguments().requires_input()
    }

    /// Returns true if a query with the given input may return more than one value.
    fn can_have_multiple_values(&self, input: Option<&TokenInput>) -> bool;

    /// Checks an input argument against the input contract.
    fn try_validate_input(&self, input: Option<&TokenInput>) -> Result<()> {
        self.input_arguments().validate(self.name().as_str(), input)
    }

    /// Returns the finite set of values a query with this input can return,
    /// if known without refreshing.
    ///
    /// Mutually exclusive with
    /// [`has_bounded_range_values`](ValueProvider::has_bounded_range_values).
    fn has_bounded_values(&self, input: Option<&TokenInput>) -> Result<Option<InvariantSet>> {
        self.try_validate_input(input)?;
        Ok(None)
    }

    /// Returns the numeric range of values a query with this input can return,
    /// if known without refreshing.
    fn has_bounded_range_values(
        &self,
        input: Option<&TokenInput>,
    ) -> Result<Option<RangeInclusive<i32>>> {
        self.try_validate_input(input)?;
        Ok(None)
    }

    /// Returns the input values accepted by the token, if bounded.
    fn valid_inputs(&self) -> Option<InvariantSet> {
        None
    }

    /// Checks that every value is in the bounded domain for this input, if any.
    fn try_validate_values(&self, input: Option<&TokenInput>, values: &InvariantSet) -> Result<()> {
        let Some(allowed) = self.has_bounded_values(input)? else {
            return Ok(());
        };
        match values.iter().find(|value| !allowed.contains(value)) {
            Some(value) => Err(Error::value_out_of_bounds(self.name().as_str(), value)),
            None => Ok(()),
        }
    }

    /// Queries the current values.
    ///
    /// Without a meaningful input this enumerates the values; with one it
    /// answers whether the input is among them.
    fn query(&self, input: Option<&TokenInput>) -> Result<QueryResult>;

    /// Queries the current values rendered as strings.
    fn get_values(&self, input: Option<&TokenInput>) -> Result<Vec<String>> {
        self.query(input).map(QueryResult::into_values)
    }

    /// Refreshes the provider for a new context generation.
    ///
    /// Returns true iff the observable values changed.
    fn update_context(&mut self, context: &dyn Context) -> Result<bool>;
}

/// State shared by value providers: name, readiness and input contract.
#[derive(Clone, Debug)]
pub struct ProviderState {
    name: TokenName,
    input: InputArguments,
    ready: bool,
    multiple_for_root: bool,
    multiple_for_input: bool,
}

impl ProviderState {
    /// Creates the state for a provider that starts ready and accepts no input.
    pub fn new(name: TokenName, can_have_multiple_values_for_root: bool) -> Self {
        Self {
            name,
            input: InputArguments::none(),
            ready: true,
            multiple_for_root: can_have_multiple_values_for_root,
            multiple_for_input: false,
        }
    }

    /// Declares the input argument contract.
    pub fn enable_input_arguments(
        &mut self,
        input: InputArguments,
        can_have_multiple_values_for_input: bool,
    ) {
        self.input = input;
        self.multiple_for_input = can_have_multiple_values_for_input;
    }

    /// Sets readiness.
    #[inline]
    pub fn mark_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Returns the token name.
    #[inline]
    pub fn name(&self) -> &TokenName {
        &self.name
    }

    /// Returns the input argument contract.
    #[inline]
    pub fn input_arguments(&self) -> InputArguments {
        self.input
    }

    /// Returns true if the provider is ready.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Fails if the input argument doesn't respect the input contract.
    pub fn assert_input(&self, input: Option<&TokenInput>) -> Result<()> {
        self.input.validate(self.name.as_str(), input)
    }

    /// Returns true if a query with the given input may return more than one value.
    pub fn can_have_multiple_values(&self, input: Option<&TokenInput>) -> bool {
        if is_meaningful(input) {
            self.multiple_for_input
        } else {
            self.multiple_for_root
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EmptyContext;
    use alloc::vec;

    /// A provider with a fixed bounded domain, for testing the trait defaults.
    struct Weather {
        state: ProviderState,
        current: &'static str,
    }

    impl Weather {
        fn new() -> Self {
            Self {
                state: ProviderState::new(TokenName::new("Weather").unwrap(), false),
                current: "Sun",
            }
        }
    }

    impl ValueProvider for Weather {
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

        fn has_bounded_values(&self, input: Option<&TokenInput>) -> Result<Option<InvariantSet>> {
            self.try_validate_input(input)?;
            Ok(Some(["Sun", "Rain", "Snow"].into_iter().collect()))
        }

        fn query(&self, input: Option<&TokenInput>) -> Result<QueryResult> {
            self.state.assert_input(input)?;
            Ok(QueryResult::Values(vec![self.current.into()]))
        }

        fn update_context(&mut self, _context: &dyn Context) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_state_defaults() {
        let state = ProviderState::new(TokenName::new("Day").unwrap(), false);
        assert!(state.is_ready());
        assert!(!state.input_arguments().allows_input());
        assert!(!state.can_have_multiple_values(None));
    }

    #[test]
    fn test_state_input_contract() {
        let mut state = ProviderState::new(TokenName::new("Season").unwrap(), true);
        assert!(state.assert_input(Some(&TokenInput::new("spring"))).is_err());

        state.enable_input_arguments(InputArguments::optional_single(), false);
        assert!(state.assert_input(Some(&TokenInput::new("spring"))).is_ok());
        assert!(state.assert_input(Some(&TokenInput::new("spring, fall"))).is_err());
        assert!(state.can_have_multiple_values(None));
        assert!(!state.can_have_multiple_values(Some(&TokenInput::new("spring"))));
        assert!(state.can_have_multiple_values(Some(&TokenInput::new("  "))));
    }

    #[test]
    fn test_state_mark_ready() {
        let mut state = ProviderState::new(TokenName::new("Season").unwrap(), true);
        state.mark_ready(false);
        assert!(!state.is_ready());
        state.mark_ready(true);
        assert!(state.is_ready());
    }

    #[test]
    fn test_trait_defaults() {
        let mut weather = Weather::new();
        assert!(weather.is_mutable());
        assert!(!weather.allows_input());
        assert!(!weather.requires_input());
        assert!(weather.valid_inputs().is_none());
        assert_eq!(weather.has_bounded_range_values(None).unwrap(), None);
        assert_eq!(weather.get_values(None).unwrap(), vec!["Sun"]);
        assert!(!weather.update_context(&EmptyContext).unwrap());
    }

    #[test]
    fn test_try_validate_values() {
        let weather = Weather::new();
        let ok: InvariantSet = ["sun", "SNOW"].into_iter().collect();
        assert!(weather.try_validate_values(None, &ok).is_ok());

        let bad: InvariantSet = ["Sun", "Hail"].into_iter().collect();
        match weather.try_validate_values(None, &bad) {
            Err(Error::ValueOutOfBounds { token, value }) => {
                assert_eq!(token, "Weather");
                assert_eq!(value, "Hail");
            }
            other => panic!("expected ValueOutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_input_rejected_without_contract() {
        let weather = Weather::new();
        let input = TokenInput::new("Sun");
        assert!(matches!(
            weather.try_validate_input(Some(&input)),
            Err(Error::InvalidInput { .. })
        ));
        assert!(weather.query(Some(&input)).is_err());
    }
}
