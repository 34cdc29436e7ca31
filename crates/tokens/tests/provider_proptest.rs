//! Property-based tests for provider refresh and query semantics.
//!
//! These tests drive a `SimpleValueProvider` through random sequences of
//! producer outputs and check readiness, change flags and query results
//! against a lowercase model of the value set.

use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use vellum_core::{QueryResult, TokenInput};
use vellum_tokens::{EmptyContext, SimpleValueProvider, ValueProvider};

type Source = Rc<RefCell<Option<Vec<String>>>>;

/// Strategy for producer output: absent, or a short list of mixed-case words
/// drawn from a small alphabet so refreshes often repeat.
fn output_strategy() -> impl Strategy<Value = Option<Vec<String>>> {
    prop::option::weighted(
        0.85,
        prop::collection::vec("(?i)(spring|summer|fall|winter)", 0..5),
    )
}

fn provider(source: &Source) -> SimpleValueProvider {
    let reader = source.clone();
    SimpleValueProvider::new("Season", move || reader.borrow().clone()).unwrap()
}

fn folded(values: &[String]) -> HashSet<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

proptest! {
    /// Property: the change flag is true iff the folded set differs from the
    /// previous refresh, and readiness tracks non-emptiness.
    #[test]
    fn change_flag_is_exact(outputs in prop::collection::vec(output_strategy(), 1..12)) {
        let source: Source = Rc::new(RefCell::new(None));
        let mut season = provider(&source);
        let mut model: HashSet<String> = HashSet::new();

        for output in outputs {
            let next = folded(output.as_deref().unwrap_or(&[]));
            *source.borrow_mut() = output;

            let changed = season.update_context(&EmptyContext).unwrap();
            prop_assert_eq!(changed, next != model);
            model = next;

            prop_assert_eq!(season.is_ready(), !model.is_empty());
            prop_assert_eq!(season.values().len(), model.len());
        }
    }

    /// Property: enumeration returns exactly the folded set, without duplicates.
    #[test]
    fn enumeration_matches_model(output in output_strategy()) {
        let source: Source = Rc::new(RefCell::new(output.clone()));
        let mut season = provider(&source);
        season.update_context(&EmptyContext).unwrap();

        let values = season.get_values(None).unwrap();
        let model = folded(output.as_deref().unwrap_or(&[]));
        prop_assert_eq!(values.len(), model.len());
        prop_assert_eq!(folded(&values), model);
    }

    /// Property: membership agrees with the model for any casing of the queried value,
    /// and an unready token answers nothing.
    #[test]
    fn membership_matches_model(
        output in output_strategy(),
        needle in "(?i)(spring|summer|fall|winter|monday)",
    ) {
        let source: Source = Rc::new(RefCell::new(output.clone()));
        let mut season = provider(&source);
        season.update_context(&EmptyContext).unwrap();

        let model = folded(output.as_deref().unwrap_or(&[]));
        let input = TokenInput::new(needle.clone());
        let result = season.query(Some(&input)).unwrap();

        if model.is_empty() {
            prop_assert_eq!(result, QueryResult::empty());
        } else {
            let expected = model.contains(&needle.to_lowercase());
            prop_assert_eq!(result, QueryResult::Membership(expected));
        }
    }

    /// Property: queries between refreshes are idempotent.
    #[test]
    fn queries_are_idempotent(
        output in output_strategy(),
        needle in prop::option::of("(?i)(spring|winter| )"),
    ) {
        let source: Source = Rc::new(RefCell::new(output));
        let mut season = provider(&source);
        season.update_context(&EmptyContext).unwrap();

        let input = needle.map(TokenInput::new);
        prop_assert_eq!(
            season.get_values(input.as_ref()).unwrap(),
            season.get_values(input.as_ref()).unwrap()
        );
        prop_assert_eq!(
            season.has_bounded_values(input.as_ref()).unwrap(),
            season.has_bounded_values(input.as_ref()).unwrap()
        );
    }
}
