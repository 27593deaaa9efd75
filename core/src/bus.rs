//! Typed publish/subscribe channel shared by sibling widgets.
//!
//! Delivery is synchronous and best-effort. A listener lives exactly as long
//! as the [`Subscription`] returned when it was registered.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::schedule::EventKind;

pub const DEFAULT_BURST: u32 = 90;
pub const WELCOME_BURST: u32 = 100;
pub const MILESTONE_BURST: u32 = 180;
pub const EVENT_REACHED_BURST: u32 = 260;
pub const OPEN_WHEN_BURST: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstReason {
    Welcome,
    Milestone(u32),
    EventReached(EventKind),
    OpenWhen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfettiBurst {
    pub count: u32,
    pub reason: Option<BurstReason>,
}

impl ConfettiBurst {
    pub fn new(count: u32, reason: BurstReason) -> Self {
        Self {
            count,
            reason: Some(reason),
        }
    }

    pub fn welcome() -> Self {
        Self::new(WELCOME_BURST, BurstReason::Welcome)
    }

    pub fn milestone(days: u32) -> Self {
        Self::new(MILESTONE_BURST, BurstReason::Milestone(days))
    }

    pub fn event_reached(kind: EventKind) -> Self {
        Self::new(EVENT_REACHED_BURST, BurstReason::EventReached(kind))
    }

    pub fn open_when() -> Self {
        Self::new(OPEN_WHEN_BURST, BurstReason::OpenWhen)
    }
}

impl Default for ConfettiBurst {
    fn default() -> Self {
        Self {
            count: DEFAULT_BURST,
            reason: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Confetti(ConfettiBurst),
    PlaySong { index: usize },
    FocusPhoto { index: usize },
    PlayEasterEgg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Confetti,
    PlaySong,
    FocusPhoto,
    PlayEasterEgg,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Confetti(_) => SignalKind::Confetti,
            Signal::PlaySong { .. } => SignalKind::PlaySong,
            Signal::FocusPhoto { .. } => SignalKind::FocusPhoto,
            Signal::PlayEasterEgg => SignalKind::PlayEasterEgg,
        }
    }
}

pub type SignalHandler = Rc<dyn Fn(&Signal)>;

struct Listener {
    id: u64,
    kind: SignalKind,
    handler: SignalHandler,
}

#[derive(Default)]
struct Registry {
    listeners: Vec<Listener>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct SignalBus {
    registry: Rc<RefCell<Registry>>,
}

impl PartialEq for SignalBus {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}

impl std::fmt::Debug for SignalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalBus")
            .field("listeners", &self.registry.borrow().listeners.len())
            .finish()
    }
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: SignalKind, handler: F) -> Subscription
    where
        F: Fn(&Signal) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        registry.next_id = registry.next_id.saturating_add(1);
        let id = registry.next_id;
        registry.listeners.push(Listener {
            id,
            kind,
            handler: Rc::new(handler),
        });
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Calls every listener registered for the signal's kind and returns how
    /// many were reached. Listeners may publish or (un)subscribe from inside
    /// their handler.
    pub fn publish(&self, signal: Signal) -> usize {
        let kind = signal.kind();
        let handlers: Vec<SignalHandler> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .map(|listener| listener.handler.clone())
            .collect();
        for handler in &handlers {
            handler(&signal);
        }
        handlers.len()
    }

    pub fn listener_count(&self, kind: SignalKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }
}

/// Registration handle; dropping it removes the listener.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|listener| listener.id != self.id);
        }
    }
}
