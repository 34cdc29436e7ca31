//! Subscription management for token changes.
//!
//! This module provides subscription IDs and a manager for tracking
//! callbacks interested in token value changes.

use crate::change::ValueChange;
use alloc::boxed::Box;
use hashbrown::HashMap;
use vellum_core::TokenName;

/// Unique identifier for a subscription.
pub type SubscriptionId = u64;

/// Callback type for change notifications.
pub type ChangeCallback = Box<dyn Fn(&ValueChange)>;

/// A subscription to token changes.
pub struct Subscription {
    /// Unique identifier
    id: SubscriptionId,
    /// Only changes to this token are delivered, if set
    token: Option<TokenName>,
    /// Callback to invoke on changes
    callback: ChangeCallback,
}

impl Subscription {
    /// Creates a new subscription.
    pub fn new<F>(id: SubscriptionId, token: Option<TokenName>, callback: F) -> Self
    where
        F: Fn(&ValueChange) + 'static,
    {
        Self {
            id,
            token,
            callback: Box::new(callback),
        }
    }

    /// Returns the subscription ID.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns the token this subscription is limited to, if any.
    #[inline]
    pub fn token(&self) -> Option<&TokenName> {
        self.token.as_ref()
    }

    /// Returns true if this subscription wants changes to `token`.
    pub fn matches(&self, token: &TokenName) -> bool {
        self.token.as_ref().map_or(true, |t| t == token)
    }

    /// Notifies this subscription of a change.
    pub fn notify(&self, change: &ValueChange) {
        if self.matches(&change.token) {
            (self.callback)(change);
        }
    }
}

/// Manages subscriptions to token changes.
pub struct SubscriptionManager {
    /// Active subscriptions
    subscriptions: HashMap<SubscriptionId, Subscription>,
    /// Next subscription ID to assign
    next_id: SubscriptionId,
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionManager {
    /// Creates a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
            next_id: 1,
        }
    }

    /// Subscribes to changes, optionally limited to one token.
    ///
    /// Returns the subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&mut self, token: Option<TokenName>, callback: F) -> SubscriptionId
    where
        F: Fn(&ValueChange) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        self.subscriptions.insert(id, Subscription::new(id, token, callback));

        id
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    /// Removes every subscription limited to `token`.
    pub fn unsubscribe_token(&mut self, token: &TokenName) {
        self.subscriptions.retain(|_, sub| sub.token() != Some(token));
    }

    /// Notifies all matching subscriptions of a change.
    pub fn notify_all(&self, change: &ValueChange) {
        for sub in self.subscriptions.values() {
            sub.notify(change);
        }
    }

    /// Returns true if any subscription wants changes to `token`.
    pub fn has_listeners(&self, token: &TokenName) -> bool {
        self.subscriptions.values().any(|sub| sub.matches(token))
    }

    /// Returns the number of subscriptions.
    #[inline]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns true if there are no subscriptions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn name(value: &str) -> TokenName {
        TokenName::new(value).unwrap()
    }

    fn make_change(token: &str) -> ValueChange {
        ValueChange {
            token: name(token),
            added: vec!["Spring".into()],
            removed: vec![],
            ready: true,
        }
    }

    #[test]
    fn test_subscription_new() {
        let sub = Subscription::new(1, None, |_| {});
        assert_eq!(sub.id(), 1);
        assert!(sub.token().is_none());
    }

    #[test]
    fn test_subscription_notify() {
        let called = Rc::new(RefCell::new(false));
        let called_clone = called.clone();

        let sub = Subscription::new(1, None, move |_| {
            *called_clone.borrow_mut() = true;
        });

        sub.notify(&make_change("Season"));

        assert!(*called.borrow());
    }

    #[test]
    fn test_subscription_token_filter() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        let sub = Subscription::new(1, Some(name("season")), move |change| {
            seen_clone.borrow_mut().push(change.token.clone());
        });

        sub.notify(&make_change("Weather"));
        sub.notify(&make_change("SEASON"));

        assert_eq!(*seen.borrow(), vec![name("Season")]);
    }

    #[test]
    fn test_subscription_manager_subscribe() {
        let mut manager = SubscriptionManager::new();

        let id1 = manager.subscribe(None, |_| {});
        let id2 = manager.subscribe(Some(name("Season")), |_| {});

        assert_eq!(id1, 1);
        assert_eq!(id2, 2);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_subscription_manager_unsubscribe() {
        let mut manager = SubscriptionManager::new();

        let id = manager.subscribe(None, |_| {});
        assert_eq!(manager.len(), 1);

        assert!(manager.unsubscribe(id));
        assert!(manager.is_empty());

        assert!(!manager.unsubscribe(id)); // Already removed
    }

    #[test]
    fn test_subscription_manager_unsubscribe_token() {
        let mut manager = SubscriptionManager::new();
        manager.subscribe(Some(name("Season")), |_| {});
        manager.subscribe(Some(name("Weather")), |_| {});
        manager.subscribe(None, |_| {});

        manager.unsubscribe_token(&name("season"));

        assert_eq!(manager.len(), 2);
        assert!(manager.has_listeners(&name("Weather")));
    }

    #[test]
    fn test_subscription_manager_notify_all() {
        let mut manager = SubscriptionManager::new();

        let count = Rc::new(RefCell::new(0));
        let count1 = count.clone();
        let count2 = count.clone();
        let count3 = count.clone();

        manager.subscribe(None, move |_| {
            *count1.borrow_mut() += 1;
        });
        manager.subscribe(Some(name("Season")), move |_| {
            *count2.borrow_mut() += 1;
        });
        manager.subscribe(Some(name("Weather")), move |_| {
            *count3.borrow_mut() += 100;
        });

        manager.notify_all(&make_change("Season"));

        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_subscription_manager_has_listeners() {
        let mut manager = SubscriptionManager::new();
        assert!(!manager.has_listeners(&name("Season")));

        let id = manager.subscribe(Some(name("Season")), |_| {});
        assert!(manager.has_listeners(&name("season")));
        assert!(!manager.has_listeners(&name("Weather")));

        manager.unsubscribe(id);
        manager.subscribe(None, |_| {});
        assert!(manager.has_listeners(&name("Weather")));
    }
}
