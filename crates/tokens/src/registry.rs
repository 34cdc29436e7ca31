//! Token registry and context refresh cycle.
//!
//! This module provides `TokenRegistry`, a host that owns value providers,
//! refreshes them once per context generation and notifies subscribers of
//! the tokens that changed.

use crate::change::ValueChange;
use crate::context::Context;
use crate::provider::ValueProvider;
use crate::simple::SimpleValueProvider;
use crate::subscription::{SubscriptionId, SubscriptionManager};
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use hashbrown::HashMap;
use tracing::{debug, warn};
use vellum_core::{
    fold_case, Error, InvariantSet, QueryResult, Result, TokenInput, TokenName, SCOPE_SEPARATOR,
};

/// Unique identifier for a registered token.
pub type TokenId = u64;

/// What a refresh does when a token's producer fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the refresh and return the error.
    #[default]
    Abort,
    /// Log the failure, keep the token's previous values and continue.
    Skip,
}

/// Options for a [`TokenRegistry`].
#[derive(Clone, Debug, Default)]
pub struct RegistryOptions {
    owner: Option<String>,
    on_producer_error: FailurePolicy,
}

impl RegistryOptions {
    /// Creates the default options: no owner scope, abort on producer failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scopes registered tokens to an owner, like `Owner/Name`.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the producer failure policy.
    pub fn on_producer_error(mut self, policy: FailurePolicy) -> Self {
        self.on_producer_error = policy;
        self
    }

    /// Returns the owner scope, if any.
    #[inline]
    pub fn owner_scope(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the producer failure policy.
    #[inline]
    pub fn failure_policy(&self) -> FailurePolicy {
        self.on_producer_error
    }
}

struct Entry {
    id: TokenId,
    name: TokenName,
    provider: RefCell<Box<dyn ValueProvider>>,
}

/// A registry that owns token providers and drives context refreshes.
///
/// The registry is also the [`Context`] handed to each provider during a
/// refresh. A provider reading itself through the context sees itself as not
/// ready.
///
/// # Example
///
/// ```rust
/// use vellum_core::TokenInput;
/// use vellum_tokens::{Context, RegistryOptions, TokenRegistry};
///
/// let mut registry = TokenRegistry::with_options(RegistryOptions::new().owner("Example.Mod"));
/// registry.register_simple("Season", || Some(vec!["Spring"])).unwrap();
///
/// let changed = registry.update_context().unwrap();
/// assert_eq!(changed.len(), 1);
/// assert_eq!(changed[0].as_str(), "Example.Mod/Season");
///
/// let spring = TokenInput::new("spring");
/// assert_eq!(registry.get_values("Example.Mod/Season", Some(&spring)).unwrap(), vec!["True"]);
/// ```
pub struct TokenRegistry {
    options: RegistryOptions,
    /// Folded name -> entry
    entries: HashMap<String, Entry>,
    /// Folded names in registration order
    order: Vec<String>,
    subscriptions: SubscriptionManager,
    /// Changed tokens not yet reported because a refresh was aborted
    pending: Vec<TokenName>,
    next_id: TokenId,
    generation: u64,
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRegistry {
    /// Creates a registry with default options.
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// Creates a registry with the given options.
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
            order: Vec::new(),
            subscriptions: SubscriptionManager::new(),
            pending: Vec::new(),
            next_id: 1,
            generation: 0,
        }
    }

    /// Returns the registry options.
    #[inline]
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Registers a provider and returns its ID.
    ///
    /// Fails if a token with the same name (ignoring case) is registered, or
    /// if the registry has an owner scope the name doesn't belong to.
    pub fn register(&mut self, provider: Box<dyn ValueProvider>) -> Result<TokenId> {
        let name = provider.name().clone();
        if let Some(owner) = self.options.owner_scope() {
            if !name.is_owned_by(owner) {
                return Err(Error::invalid_name(
                    name.as_str(),
                    format!("token must be scoped to owner {}", owner),
                ));
            }
        }

        let key = fold_case(name.as_str());
        if self.entries.contains_key(&key) {
            return Err(Error::duplicate_token(name.as_str()));
        }

        let id = self.next_id;
        self.next_id += 1;

        debug!(token = %name, id, "registered token");
        self.entries.insert(
            key.clone(),
            Entry {
                id,
                name,
                provider: RefCell::new(provider),
            },
        );
        self.order.push(key);

        Ok(id)
    }

    /// Builds a [`SimpleValueProvider`] under the registry's owner scope and
    /// registers it.
    pub fn register_simple<F, I>(&mut self, name: &str, producer: F) -> Result<TokenId>
    where
        F: FnMut() -> Option<I> + 'static,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let name = match self.options.owner_scope() {
            Some(owner) => TokenName::scoped(owner, name)?,
            None => TokenName::new(name)?,
        };
        self.register(Box::new(SimpleValueProvider::with_name(name, producer)))
    }

    /// Unregisters a token by name, dropping its token-specific subscriptions.
    ///
    /// Returns true if the token was found and removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let Some(key) = self.resolve_key(name) else {
            return false;
        };
        let Some(entry) = self.entries.remove(&key) else {
            return false;
        };
        self.order.retain(|k| *k != key);
        self.subscriptions.unsubscribe_token(&entry.name);
        self.pending.retain(|name| *name != entry.name);
        debug!(token = %entry.name, id = entry.id, "unregistered token");
        true
    }

    /// Returns the ID of a registered token.
    pub fn token_id(&self, name: &str) -> Option<TokenId> {
        self.entry(name).map(|entry| entry.id)
    }

    /// Returns the names of all tokens in registration order.
    pub fn names(&self) -> Vec<TokenName> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key))
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Returns the number of registered tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no registered tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of completed context generations.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Queries a token.
    pub fn query(&self, name: &str, input: Option<&TokenInput>) -> Result<QueryResult> {
        self.with_provider(name, QueryResult::empty(), |provider| provider.query(input))
    }

    /// Returns the bounded values of a token for the given input, if known.
    pub fn has_bounded_values(
        &self,
        name: &str,
        input: Option<&TokenInput>,
    ) -> Result<Option<InvariantSet>> {
        self.with_provider(name, None, |provider| provider.has_bounded_values(input))
    }

    /// Subscribes to changes of every token.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ValueChange) + 'static,
    {
        self.subscriptions.subscribe(None, callback)
    }

    /// Subscribes to changes of one token.
    pub fn subscribe_token<F>(&mut self, name: &str, callback: F) -> Result<SubscriptionId>
    where
        F: Fn(&ValueChange) + 'static,
    {
        let token = self
            .entry(name)
            .map(|entry| entry.name.clone())
            .ok_or_else(|| Error::token_not_found(name))?;
        Ok(self.subscriptions.subscribe(Some(token), callback))
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    /// Returns the number of subscriptions.
    #[inline]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Starts a new context generation: refreshes every token once in
    /// registration order and returns the names of the tokens that changed.
    ///
    /// Subscribers are notified as each change is detected. A producer
    /// failure is handled per [`FailurePolicy`]; any other error aborts the
    /// refresh. Tokens that changed before an aborted refresh are reported by
    /// the next successful one.
    pub fn update_context(&mut self) -> Result<Vec<TokenName>> {
        self.generation += 1;
        let generation = self.generation;

        let mut changed = core::mem::take(&mut self.pending);
        if let Err(err) = self.refresh_all(generation, &mut changed) {
            debug!(
                generation,
                pending = changed.len(),
                error = %err,
                "aborted token context update"
            );
            self.pending = changed;
            return Err(err);
        }

        debug!(
            generation,
            tokens = self.entries.len(),
            changed = changed.len(),
            "updated token context"
        );
        Ok(changed)
    }

    fn refresh_all(&self, generation: u64, changed: &mut Vec<TokenName>) -> Result<()> {
        for key in &self.order {
            let Some(entry) = self.entries.get(key) else {
                continue;
            };

            let listening = self.subscriptions.has_listeners(&entry.name);
            let before = if listening {
                snapshot(&**entry.provider.borrow())
            } else {
                InvariantSet::new()
            };

            let result = entry.provider.borrow_mut().update_context(self);
            match result {
                Ok(true) => {
                    if listening {
                        let provider = entry.provider.borrow();
                        let after = snapshot(&**provider);
                        let ready = provider.is_ready();
                        let change =
                            ValueChange::between(entry.name.clone(), &before, &after, ready);
                        self.subscriptions.notify_all(&change);
                    }
                    if !changed.contains(&entry.name) {
                        changed.push(entry.name.clone());
                    }
                }
                Ok(false) => {}
                Err(err @ Error::Producer { .. })
                    if self.options.failure_policy() == FailurePolicy::Skip =>
                {
                    warn!(token = %entry.name, generation, error = %err, "skipping token refresh");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn resolve_key(&self, name: &str) -> Option<String> {
        let key = fold_case(name);
        if self.entries.contains_key(&key) {
            return Some(key);
        }
        let owner = self.options.owner_scope()?;
        let scoped = fold_case(&format!("{}{}{}", owner, SCOPE_SEPARATOR, name));
        self.entries.contains_key(&scoped).then_some(scoped)
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.resolve_key(name).and_then(|key| self.entries.get(&key))
    }

    /// Runs `f` against a provider; a provider that is mid-refresh yields `busy`.
    fn with_provider<T>(
        &self,
        name: &str,
        busy: T,
        f: impl FnOnce(&dyn ValueProvider) -> Result<T>,
    ) -> Result<T> {
        let entry = self.entry(name).ok_or_else(|| Error::token_not_found(name))?;
        match entry.provider.try_borrow() {
            Ok(provider) => f(&**provider),
            Err(_) => Ok(busy),
        }
    }
}

impl Context for TokenRegistry {
    fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    fn is_ready(&self, name: &str) -> bool {
        self.entry(name)
            .and_then(|entry| entry.provider.try_borrow().ok())
            .is_some_and(|provider| provider.is_ready())
    }

    fn get_values(&self, name: &str, input: Option<&TokenInput>) -> Result<Vec<String>> {
        self.with_provider(name, Vec::new(), |provider| provider.get_values(input))
    }
}

/// Returns the enumerated values of a provider, or an empty set if it can't
/// be enumerated.
fn snapshot(provider: &dyn ValueProvider) -> InvariantSet {
    match provider.query(None) {
        Ok(QueryResult::Values(values)) => values.into_iter().collect(),
        _ => InvariantSet::new(),
    }
}
