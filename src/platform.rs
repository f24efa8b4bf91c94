//! The capabilities the observer and reader need from the rendering
//! environment.
//!
//! A browser backend maps these onto `matchMedia`, `innerWidth` and
//! `getComputedStyle`; [`SimulatedViewport`](crate::SimulatedViewport) provides
//! an in-process implementation.

use std::rc::Rc;

use crate::query::MediaQuery;

/// Callback invoked with the new match status whenever it flips.
pub type MediaListener = Rc<dyn Fn(bool)>;

/// Identifies a listener attached to one [`MediaQueryList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A live, continuously evaluated predicate handle.
///
/// Dropping the handle releases it.
pub trait MediaQueryList {
    fn media(&self) -> MediaQuery;

    fn matches(&self) -> bool;

    fn add_listener(&self, listener: MediaListener) -> ListenerId;

    /// Detach a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

/// The predicate service: creates live handles for media queries.
pub trait MatchMedia {
    fn match_media(&self, query: MediaQuery) -> Box<dyn MediaQueryList>;
}

/// Tracks the current viewport width.
pub trait ViewportSize {
    fn viewport_width(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PseudoElement {
    Before,
    After,
}

impl PseudoElement {
    pub fn selector(self) -> &'static str {
        match self {
            PseudoElement::Before => "::before",
            PseudoElement::After => "::after",
        }
    }
}

/// Access to computed style values.
pub trait ComputedStyle {
    /// The raw `content` value generated for `pseudo` on the element matched by
    /// `anchor`, quotes included. Empty when no stylesheet defines it.
    fn generated_content(&self, anchor: &str, pseudo: PseudoElement) -> String;
}

/// Whether the code runs with a viewport at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
    Interactive,
    /// Server-side or otherwise windowless execution.
    Headless,
}

pub trait DetectContext {
    fn execution_context(&self) -> ExecutionContext;
}
