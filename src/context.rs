//! One observer per consuming context.
//!
//! Views that live in the same context (typically a window) share a single
//! [`ResponsiveObserver`], so the platform only ever sees one set of listeners
//! per context. Observers are created on first use and disposed when the
//! context is released.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use crate::observer::ResponsiveObserver;

thread_local! {
    static OBSERVERS: RefCell<FxHashMap<ContextId, ResponsiveObserver>> =
        RefCell::new(FxHashMap::default());
}

/// Identity of a consuming context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(u64);

impl ContextId {
    pub fn next() -> ContextId {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        ContextId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// The observer memoized for `ctx`, built with `init` on first access.
pub fn observer_for(
    ctx: ContextId,
    init: impl FnOnce() -> ResponsiveObserver,
) -> ResponsiveObserver {
    if let Some(observer) = OBSERVERS.with(|observers| observers.borrow().get(&ctx).cloned()) {
        return observer;
    }

    // `init` runs without the map borrowed so it may look up other contexts.
    let observer = init();
    tracing::debug!(?ctx, "created breakpoint observer");
    OBSERVERS.with(|observers| {
        observers
            .borrow_mut()
            .entry(ctx)
            .or_insert(observer)
            .clone()
    })
}

pub fn has_observer(ctx: ContextId) -> bool {
    OBSERVERS.with(|observers| observers.borrow().contains_key(&ctx))
}

/// Forget the observer for `ctx`, dropping its subscribers and listeners.
///
/// Returns whether the context had one.
pub fn release_context(ctx: ContextId) -> bool {
    let observer = OBSERVERS.with(|observers| observers.borrow_mut().remove(&ctx));
    match observer {
        Some(observer) => {
            observer.dispose();
            tracing::debug!(?ctx, "released breakpoint observer");
            true
        }
        None => false,
    }
}
