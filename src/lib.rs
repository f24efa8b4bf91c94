//! # Floem Responsive
//! Viewport breakpoint tracking for Floem views.
//!
//! Six named breakpoints, `xs` through `xxl`, split the viewport width into
//! ranges. Two ways of following them are provided:
//!
//! - [`ResponsiveObserver`] watches one media query per breakpoint and sends the
//!   full [`ScreenMap`] to its subscribers whenever any query flips. Listeners
//!   are only attached while somebody is subscribed.
//! - [`BreakpointReader`] reads the single active breakpoint name that a
//!   stylesheet publishes as generated content.
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//! use floem_responsive::{Breakpoint, GridBreakpoints, ResponsiveObserver, SimulatedViewport};
//!
//! let viewport = SimulatedViewport::new(800.0);
//! let observer = ResponsiveObserver::new(Rc::new(viewport.clone()), &GridBreakpoints::default());
//!
//! let token = observer.subscribe(|screens| {
//!     if screens[Breakpoint::Lg] {
//!         println!("large layout");
//!     }
//! });
//!
//! viewport.resize(1000.0);
//! observer.unsubscribe(token);
//! assert_eq!(viewport.live_handles(), 0);
//! ```
//!
//! Use [`observer_for`] to share one observer between every view of a context,
//! and [`release_context`] once the context goes away.
//!
//! The platform side is abstracted by the traits in [`platform`]. A browser
//! backend implements them on top of `matchMedia`; [`SimulatedViewport`]
//! implements them in-process for tests and windowless execution.

mod breakpoint;
mod context;
mod error;
mod grid;
mod observer;
pub mod platform;
mod query;
mod reader;
mod simulated;

pub use breakpoint::{Breakpoint, RESPONSIVE_ARRAY, ScreenMap};
pub use context::{ContextId, has_observer, observer_for, release_context};
pub use error::{BreakpointError, Result};
pub use grid::GridBreakpoints;
pub use observer::{ResponsiveObserver, SubscriptionToken};
pub use query::{BreakpointQueryMap, MediaQuery};
pub use reader::BreakpointReader;
pub use simulated::SimulatedViewport;
