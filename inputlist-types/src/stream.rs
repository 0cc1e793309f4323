use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

/// Owner of a set of subscriptions.
///
/// Every subscription registered through a [`ScopeRef`] obtained from this
/// scope stays active exactly as long as the scope is alive. Dropping the
/// scope cancels all of them at once; there is no per-subscription
/// unsubscribe.
#[derive(Debug, Default)]
pub struct Scope {
    token: Rc<()>,
}

impl Scope {
    /// Create a new, active scope.
    pub fn new() -> Self {
        Self { token: Rc::new(()) }
    }

    /// Get a handle used to register subscriptions against this scope.
    pub fn handle(&self) -> ScopeRef {
        ScopeRef(Rc::downgrade(&self.token))
    }
}

/// Weak handle to a [`Scope`].
#[derive(Debug, Clone)]
pub struct ScopeRef(Weak<()>);

impl ScopeRef {
    /// A handle whose scope never existed. Subscribing with it is a no-op.
    pub fn detached() -> Self {
        Self(Weak::new())
    }

    /// Check whether the owning scope is still alive.
    pub fn is_active(&self) -> bool {
        self.0.strong_count() > 0
    }
}

struct Subscriber<T: ?Sized> {
    scope: ScopeRef,
    listener: Box<dyn FnMut(&T)>,
}

/// A push-based broadcast of values to scoped listeners.
///
/// Listeners run synchronously, in subscription order, on every [`emit`](Self::emit).
/// A listener may subscribe new listeners or emit on other streams while it
/// runs. Listeners added during an emission first hear the next one. An
/// emit on the same stream from inside one of its listeners is dropped.
pub struct ChangeStream<T: ?Sized> {
    subscribers: RefCell<Vec<Subscriber<T>>>,
    emitting: Cell<bool>,
}

impl<T: ?Sized> Default for ChangeStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ChangeStream<T> {
    /// Create a stream with no listeners.
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            emitting: Cell::new(false),
        }
    }

    /// Register a listener that lives as long as `scope`.
    pub fn subscribe(&self, scope: &ScopeRef, listener: impl FnMut(&T) + 'static) {
        if !scope.is_active() {
            return;
        }
        self.subscribers.borrow_mut().push(Subscriber {
            scope: scope.clone(),
            listener: Box::new(listener),
        });
    }

    /// Push a value to every listener whose scope is still alive.
    ///
    /// Does nothing when called from one of this stream's own listeners.
    pub fn emit(&self, value: &T) {
        if self.emitting.replace(true) {
            trace!("nested emit on the same stream dropped");
            return;
        }
        let mut current = std::mem::take(&mut *self.subscribers.borrow_mut());
        current.retain_mut(|subscriber| {
            if !subscriber.scope.is_active() {
                return false;
            }
            (subscriber.listener)(value);
            subscriber.scope.is_active()
        });

        let mut slot = self.subscribers.borrow_mut();
        let added = std::mem::replace(&mut *slot, current);
        slot.extend(added);
        drop(slot);
        self.emitting.set(false);
    }

    /// Number of listeners whose scope is still alive.
    pub fn listener_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|subscriber| subscriber.scope.is_active())
            .count()
    }
}

impl<T: ?Sized> fmt::Debug for ChangeStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeStream")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
