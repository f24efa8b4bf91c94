//! The breakpoint registry.
//!
//! A [`ResponsiveObserver`] keeps one live media query per breakpoint while it
//! has at least one subscriber, and none otherwise. Every time a query flips,
//! the full [`ScreenMap`] is sent to every subscriber.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use smallvec::SmallVec;
use strum::IntoEnumIterator;

use crate::breakpoint::{Breakpoint, ScreenMap};
use crate::grid::GridBreakpoints;
use crate::platform::{ListenerId, MatchMedia, MediaQueryList};
use crate::query::BreakpointQueryMap;

/// Identifies one subscription on one observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionToken(u64);

type Subscriber = Rc<dyn Fn(ScreenMap)>;

/// A live query handle and the listener attached to it.
struct MatchHandler {
    breakpoint: Breakpoint,
    mql: Box<dyn MediaQueryList>,
    listener: ListenerId,
}

struct ObserverState {
    platform: Rc<dyn MatchMedia>,
    responsive_map: BreakpointQueryMap,
    /// Insertion order is registration order.
    subscribers: RefCell<IndexMap<SubscriptionToken, Subscriber>>,
    next_token: Cell<u64>,
    screens: Cell<ScreenMap>,
    handlers: RefCell<SmallVec<[MatchHandler; Breakpoint::COUNT]>>,
}

/// Shared handle to a breakpoint registry. Clones refer to the same registry.
///
/// The registry is single-threaded: subscribe, unsubscribe and dispatch all run
/// synchronously on the thread that delivers viewport notifications.
#[derive(Clone)]
pub struct ResponsiveObserver {
    state: Rc<ObserverState>,
}

impl fmt::Debug for ResponsiveObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponsiveObserver")
            .field("screens", &self.state.screens.get())
            .field("subscribers", &self.subscriber_count())
            .field("registered", &self.is_registered())
            .finish()
    }
}

impl ResponsiveObserver {
    pub fn new(platform: Rc<dyn MatchMedia>, grid: &GridBreakpoints) -> Self {
        Self::with_query_map(platform, grid.query_map())
    }

    pub fn with_query_map(
        platform: Rc<dyn MatchMedia>,
        responsive_map: BreakpointQueryMap,
    ) -> Self {
        Self {
            state: Rc::new(ObserverState {
                platform,
                responsive_map,
                subscribers: RefCell::new(IndexMap::new()),
                next_token: Cell::new(0),
                screens: Cell::new(ScreenMap::new()),
                handlers: RefCell::new(SmallVec::new()),
            }),
        }
    }

    /// The breakpoint → predicate table this observer watches.
    pub fn responsive_map(&self) -> &BreakpointQueryMap {
        &self.state.responsive_map
    }

    /// The last known screen state.
    pub fn screens(&self) -> ScreenMap {
        self.state.screens.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.subscribers.borrow().len()
    }

    /// Whether the per-breakpoint listeners are currently attached.
    pub fn is_registered(&self) -> bool {
        !self.state.handlers.borrow().is_empty()
    }

    /// Register `f` and call it once with the current screen state before
    /// returning.
    ///
    /// The first subscriber attaches the per-breakpoint listeners, so the state
    /// it receives is freshly evaluated.
    pub fn subscribe(&self, f: impl Fn(ScreenMap) + 'static) -> SubscriptionToken {
        if self.state.subscribers.borrow().is_empty() {
            self.register();
        }

        let token = SubscriptionToken(self.state.next_token.get());
        self.state.next_token.set(token.0 + 1);

        let f: Subscriber = Rc::new(f);
        self.state.subscribers.borrow_mut().insert(token, f.clone());
        tracing::trace!(?token, "breakpoint subscriber added");

        f(self.state.screens.get());
        token
    }

    /// Remove a subscription. Unknown tokens are ignored.
    ///
    /// Removing the last subscriber detaches every listener.
    pub fn unsubscribe(&self, token: SubscriptionToken) {
        let (removed, now_empty) = {
            let mut subscribers = self.state.subscribers.borrow_mut();
            (subscribers.shift_remove(&token).is_some(), subscribers.is_empty())
        };
        if !removed {
            return;
        }
        tracing::trace!(?token, "breakpoint subscriber removed");
        if now_empty {
            self.unregister();
        }
    }

    /// Merge one breakpoint's new status into the screen state and send the
    /// result to every subscriber, in registration order.
    ///
    /// Only the platform listeners attached in `register` call this.
    /// Subscribers added while this runs are not notified by it; subscribers
    /// removed before their turn are skipped. Returns whether anyone was
    /// subscribed.
    pub(crate) fn dispatch(&self, breakpoint: Breakpoint, matches: bool) -> bool {
        Self::dispatch_state(&self.state, breakpoint, matches)
    }

    /// Drop every subscriber and detach the listeners.
    pub fn dispose(&self) {
        let dropped = std::mem::take(&mut *self.state.subscribers.borrow_mut());
        self.unregister();
        drop(dropped);
    }

    fn dispatch_state(state: &ObserverState, breakpoint: Breakpoint, matches: bool) -> bool {
        let screens = state.screens.get().with(breakpoint, matches);
        state.screens.set(screens);

        let snapshot: SmallVec<[(SubscriptionToken, Subscriber); 8]> = state
            .subscribers
            .borrow()
            .iter()
            .map(|(token, f)| (*token, f.clone()))
            .collect();
        tracing::trace!(
            %breakpoint,
            matches,
            subscribers = snapshot.len(),
            "breakpoint dispatch"
        );

        for (token, f) in &snapshot {
            if state.subscribers.borrow().contains_key(token) {
                f(screens);
            }
        }
        !snapshot.is_empty()
    }

    fn register(&self) {
        debug_assert!(!self.is_registered(), "breakpoint listeners registered twice");

        for breakpoint in Breakpoint::iter() {
            let query = self.state.responsive_map[breakpoint];
            let mql = self.state.platform.match_media(query);

            let weak: Weak<ObserverState> = Rc::downgrade(&self.state);
            let listener = mql.add_listener(Rc::new(move |matches: bool| {
                if let Some(state) = weak.upgrade() {
                    Self::dispatch_state(&state, breakpoint, matches);
                }
            }));
            let matches = mql.matches();

            self.state.handlers.borrow_mut().push(MatchHandler {
                breakpoint,
                mql,
                listener,
            });
            self.dispatch(breakpoint, matches);
        }
        tracing::debug!(screens = ?self.state.screens.get(), "breakpoint listeners registered");
    }

    fn unregister(&self) {
        let handlers = std::mem::take(&mut *self.state.handlers.borrow_mut());
        if handlers.is_empty() {
            return;
        }
        for handler in &handlers {
            tracing::trace!(
                breakpoint = %handler.breakpoint,
                media = %handler.mql.media(),
                "detaching listener"
            );
            handler.mql.remove_listener(handler.listener);
        }
        drop(handlers);
        tracing::debug!("breakpoint listeners unregistered");
    }
}
