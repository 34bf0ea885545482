use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::api::AppUser;

/// Auth-state change published by the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// The session accompanying a change, when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: AppUser,
}

type Listener = Rc<dyn Fn(AuthChange, Option<&SessionSnapshot>)>;

#[derive(Default)]
struct Registry {
    next_id: usize,
    listeners: Vec<(usize, Listener)>,
}

/// Explicit observer registration for auth-state changes. Subscribing
/// returns a handle the subscriber must keep and unsubscribe with at
/// teardown; the registration is a scoped resource, not ambient state.
#[derive(Clone, Default)]
pub struct AuthEvents {
    inner: Rc<RefCell<Registry>>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(AuthChange, Option<&SessionSnapshot>) + 'static,
    ) -> AuthSubscription {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));
        AuthSubscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn emit(&self, change: AuthChange, session: Option<SessionSnapshot>) {
        // snapshot first so a listener may subscribe/unsubscribe mid-emit
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(change, session.as_ref());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

pub struct AuthSubscription {
    id: usize,
    registry: Weak<RefCell<Registry>>,
}

impl AuthSubscription {
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
