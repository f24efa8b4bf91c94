//! In-process viewport for tests, benchmarks and windowless callers.
//!
//! [`SimulatedViewport`] evaluates media queries against a width that is set
//! explicitly with [`resize`](SimulatedViewport::resize), and notifies
//! listeners the same way a browser's `matchMedia` does: once per handle whose
//! match status flipped.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use floem_responsive::{Breakpoint, GridBreakpoints, ResponsiveObserver, SimulatedViewport};
//!
//! let viewport = SimulatedViewport::new(800.0);
//! let observer = ResponsiveObserver::new(Rc::new(viewport.clone()), &GridBreakpoints::default());
//!
//! observer.subscribe(|screens| println!("{screens:?}"));
//! assert!(observer.screens()[Breakpoint::Md]);
//!
//! viewport.resize(1000.0);
//! assert!(observer.screens()[Breakpoint::Lg]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::grid::GridBreakpoints;
use crate::platform::{
    ComputedStyle, DetectContext, ExecutionContext, ListenerId, MatchMedia, MediaListener,
    MediaQueryList, PseudoElement, ViewportSize,
};
use crate::query::MediaQuery;

struct HandleEntry {
    query: MediaQuery,
    matches: bool,
    listeners: IndexMap<ListenerId, MediaListener>,
}

struct ViewportState {
    width: f64,
    context: ExecutionContext,
    grid: GridBreakpoints,
    stylesheet_loaded: bool,
    /// Live handles in creation order.
    handles: IndexMap<u64, HandleEntry>,
    next_handle: u64,
    next_listener: u64,
}

/// A viewport whose width is driven by the caller.
///
/// Clones share the same viewport.
#[derive(Clone)]
pub struct SimulatedViewport {
    state: Rc<RefCell<ViewportState>>,
}

impl SimulatedViewport {
    /// An interactive viewport `width` pixels wide.
    pub fn new(width: f64) -> Self {
        Self::with_context(width, ExecutionContext::Interactive)
    }

    /// A viewport that reports a windowless execution context.
    pub fn headless() -> Self {
        Self::with_context(0.0, ExecutionContext::Headless)
    }

    fn with_context(width: f64, context: ExecutionContext) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                width,
                context,
                grid: GridBreakpoints::default(),
                stylesheet_loaded: true,
                handles: IndexMap::new(),
                next_handle: 0,
                next_listener: 0,
            })),
        }
    }

    /// Use `grid` for the generated breakpoint name exposed through
    /// [`ComputedStyle`].
    pub fn with_breakpoints(self, grid: GridBreakpoints) -> Self {
        self.state.borrow_mut().grid = grid;
        self
    }

    /// Controls whether the breakpoint stylesheet has been applied. Before it
    /// is, the generated content is empty.
    pub fn set_stylesheet_loaded(&self, loaded: bool) {
        self.state.borrow_mut().stylesheet_loaded = loaded;
    }

    pub fn width(&self) -> f64 {
        self.state.borrow().width
    }

    /// Change the width and notify the listeners of every handle whose match
    /// status flipped.
    pub fn resize(&self, width: f64) {
        let pending: SmallVec<[(u64, ListenerId, MediaListener, bool); 8]> = {
            let mut state = self.state.borrow_mut();
            state.width = width;

            let mut pending = SmallVec::new();
            for (handle, entry) in state.handles.iter_mut() {
                let matches = entry.query.matches(width);
                if matches == entry.matches {
                    continue;
                }
                entry.matches = matches;
                for (id, listener) in &entry.listeners {
                    pending.push((*handle, *id, listener.clone(), matches));
                }
            }
            pending
        };
        tracing::trace!(width, notifications = pending.len(), "viewport resized");

        for (handle, id, listener, matches) in pending {
            // An earlier listener may have detached this one.
            let attached = self
                .state
                .borrow()
                .handles
                .get(&handle)
                .is_some_and(|entry| entry.listeners.contains_key(&id));
            if attached {
                listener(matches);
            }
        }
    }

    /// Number of media query handles that have not been dropped.
    pub fn live_handles(&self) -> usize {
        self.state.borrow().handles.len()
    }

    /// Number of listeners attached across all live handles.
    pub fn listener_count(&self) -> usize {
        self.state
            .borrow()
            .handles
            .values()
            .map(|entry| entry.listeners.len())
            .sum()
    }
}

impl fmt::Debug for SimulatedViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SimulatedViewport")
            .field("width", &state.width)
            .field("context", &state.context)
            .field("live_handles", &state.handles.len())
            .finish()
    }
}

impl MatchMedia for SimulatedViewport {
    fn match_media(&self, query: MediaQuery) -> Box<dyn MediaQueryList> {
        let mut state = self.state.borrow_mut();
        let id = state.next_handle;
        state.next_handle += 1;
        let matches = query.matches(state.width);
        state.handles.insert(
            id,
            HandleEntry {
                query,
                matches,
                listeners: IndexMap::new(),
            },
        );

        Box::new(SimulatedQueryList {
            id,
            query,
            state: self.state.clone(),
        })
    }
}

impl ViewportSize for SimulatedViewport {
    fn viewport_width(&self) -> f64 {
        self.width()
    }
}

impl ComputedStyle for SimulatedViewport {
    fn generated_content(&self, anchor: &str, pseudo: PseudoElement) -> String {
        let state = self.state.borrow();
        if !state.stylesheet_loaded || anchor != "body" || pseudo != PseudoElement::Before {
            return String::new();
        }
        format!("\"{}\"", state.grid.get_width_bp(state.width))
    }
}

impl DetectContext for SimulatedViewport {
    fn execution_context(&self) -> ExecutionContext {
        self.state.borrow().context
    }
}

struct SimulatedQueryList {
    id: u64,
    query: MediaQuery,
    state: Rc<RefCell<ViewportState>>,
}

impl MediaQueryList for SimulatedQueryList {
    fn media(&self) -> MediaQuery {
        self.query
    }

    fn matches(&self) -> bool {
        self.query.matches(self.state.borrow().width)
    }

    fn add_listener(&self, listener: MediaListener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        if let Some(entry) = state.handles.get_mut(&self.id) {
            entry.listeners.insert(id, listener);
        }
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        if let Some(entry) = self.state.borrow_mut().handles.get_mut(&self.id) {
            entry.listeners.shift_remove(&id);
        }
    }
}

impl Drop for SimulatedQueryList {
    fn drop(&mut self) {
        self.state.borrow_mut().handles.shift_remove(&self.id);
    }
}
