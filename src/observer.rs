//! Observers for the action call pipeline.
//!
//! Dispatch publishes two events per request: a
//! [`BeforeCallActionEvent`] once the action arguments are resolved and an
//! [`AfterCallActionEvent`] once the action returned. Each observer takes
//! the event and hands back the (possibly modified) event for the next
//! observer, in registration order.

use std::sync::Arc;

use tracing::debug;

use crate::route::{AfterCallActionEvent, BeforeCallActionEvent};

/// Hooks around controller action calls.
///
/// Both hooks default to passing the event through unchanged, so an
/// observer only implements the phase it cares about.
///
/// # Examples
///
/// ```
/// use mika::{ActionObserver, Observers};
/// use mika::events::AfterCallActionEvent;
/// use std::sync::Arc;
///
/// struct NoCache;
///
/// impl ActionObserver for NoCache {
///     fn after_call_action(&self, mut event: AfterCallActionEvent) -> AfterCallActionEvent {
///         let response = event.response().with_header("Cache-Control", "no-store");
///         event.set_response(response);
///         event
///     }
/// }
///
/// let mut observers = Observers::new();
/// observers.add(Arc::new(NoCache));
/// assert_eq!(observers.len(), 1);
/// ```
pub trait ActionObserver: Send + Sync {
    /// Called with the resolved arguments, before the action runs.
    fn before_call_action(&self, event: BeforeCallActionEvent) -> BeforeCallActionEvent {
        event
    }

    /// Called with the action's response. The response left on the event
    /// after the last observer is the one dispatch returns.
    fn after_call_action(&self, event: AfterCallActionEvent) -> AfterCallActionEvent {
        event
    }
}

struct BeforeFn<F>(F);

impl<F> ActionObserver for BeforeFn<F>
where
    F: Fn(BeforeCallActionEvent) -> BeforeCallActionEvent + Send + Sync,
{
    fn before_call_action(&self, event: BeforeCallActionEvent) -> BeforeCallActionEvent {
        (self.0)(event)
    }
}

struct AfterFn<F>(F);

impl<F> ActionObserver for AfterFn<F>
where
    F: Fn(AfterCallActionEvent) -> AfterCallActionEvent + Send + Sync,
{
    fn after_call_action(&self, event: AfterCallActionEvent) -> AfterCallActionEvent {
        (self.0)(event)
    }
}

/// Ordered collection of registered observers.
///
/// Cheap to clone; observers are shared.
#[derive(Clone, Default)]
pub struct Observers {
    observers: Vec<Arc<dyn ActionObserver>>,
}

impl Observers {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer to the collection.
    pub fn add(&mut self, observer: Arc<dyn ActionObserver>) -> &mut Self {
        self.observers.push(observer);
        self
    }

    /// Registers a closure for the before phase.
    pub fn on_before<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(BeforeCallActionEvent) -> BeforeCallActionEvent + Send + Sync + 'static,
    {
        self.add(Arc::new(BeforeFn(hook)))
    }

    /// Registers a closure for the after phase.
    ///
    /// ```
    /// use mika::{Observers, Response};
    ///
    /// let mut observers = Observers::new();
    /// observers.on_after(|mut event| {
    ///     let body = format!("[{}]", event.response().body_text());
    ///     event.set_response(Response::new(body));
    ///     event
    /// });
    /// ```
    pub fn on_after<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(AfterCallActionEvent) -> AfterCallActionEvent + Send + Sync + 'static,
    {
        self.add(Arc::new(AfterFn(hook)))
    }

    /// Runs the before phase through every observer.
    pub fn publish_before(&self, event: BeforeCallActionEvent) -> BeforeCallActionEvent {
        self.observers
            .iter()
            .fold(event, |event, observer| observer.before_call_action(event))
    }

    /// Runs the after phase through every observer.
    pub fn publish_after(&self, event: AfterCallActionEvent) -> AfterCallActionEvent {
        self.observers
            .iter()
            .fold(event, |event, observer| observer.after_call_action(event))
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("observers", &format!("{} observers", self.observers.len()))
            .finish()
    }
}

/// Built-in observer emitting a `tracing` event for both phases.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// Creates the observer.
    pub fn new() -> Self {
        Self
    }
}

impl ActionObserver for TracingObserver {
    fn before_call_action(&self, event: BeforeCallActionEvent) -> BeforeCallActionEvent {
        debug!(
            controller = event.controller_name(),
            action = event.action_name(),
            arguments = ?event.call().action_params().names().collect::<Vec<_>>(),
            "Calling action"
        );
        event
    }

    fn after_call_action(&self, event: AfterCallActionEvent) -> AfterCallActionEvent {
        debug!(
            controller = event.controller_name(),
            action = event.action_name(),
            status = event.response().status(),
            body_len = event.response().body().len(),
            "Action returned"
        );
        event
    }
}
