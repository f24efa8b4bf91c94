//! Reads the active breakpoint name from a stylesheet.
//!
//! Instead of watching one query per breakpoint, a stylesheet can publish the
//! current breakpoint as generated content, e.g.
//! `body::before { content: "md"; display: none; }` inside each width range.
//! [`BreakpointReader`] reads that value back and re-reads it when the viewport
//! width changes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::breakpoint::Breakpoint;
use crate::platform::{ComputedStyle, DetectContext, ExecutionContext, PseudoElement, ViewportSize};

#[derive(Debug)]
pub struct BreakpointReader<E> {
    env: Rc<E>,
    anchor: String,
    pseudo: PseudoElement,
    /// Width of the last read and the name it produced.
    cached: RefCell<Option<(f64, String)>>,
}

impl<E> BreakpointReader<E>
where
    E: ComputedStyle + ViewportSize + DetectContext,
{
    /// Reads `body::before`.
    pub fn new(env: Rc<E>) -> Self {
        Self {
            env,
            anchor: "body".to_string(),
            pseudo: PseudoElement::Before,
            cached: RefCell::new(None),
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>, pseudo: PseudoElement) -> Self {
        self.anchor = anchor.into();
        self.pseudo = pseudo;
        self.cached = RefCell::new(None);
        self
    }

    /// The breakpoint name published by the stylesheet, or `None` when there is
    /// no viewport.
    ///
    /// The name is only re-read when the width differs from the previous call.
    /// Before the stylesheet applies this is the empty string.
    pub fn current_breakpoint(&self) -> Option<String> {
        if self.env.execution_context() == ExecutionContext::Headless {
            return None;
        }

        let width = self.env.viewport_width();
        if let Some((cached_width, name)) = &*self.cached.borrow() {
            if *cached_width == width {
                return Some(name.clone());
            }
        }
        Some(self.read(width))
    }

    /// Re-read the generated content regardless of the width.
    pub fn refresh(&self) -> Option<String> {
        if self.env.execution_context() == ExecutionContext::Headless {
            return None;
        }
        Some(self.read(self.env.viewport_width()))
    }

    /// [`current_breakpoint`](Self::current_breakpoint) parsed into a
    /// [`Breakpoint`]. Empty or unknown names give `None`.
    pub fn breakpoint(&self) -> Option<Breakpoint> {
        self.current_breakpoint()?.parse().ok()
    }

    fn read(&self, width: f64) -> String {
        let raw = self.env.generated_content(&self.anchor, self.pseudo);
        let name = strip_quotes(&raw).to_string();
        tracing::trace!(
            width,
            %name,
            anchor = %self.anchor,
            pseudo = self.pseudo.selector(),
            "read breakpoint from style"
        );
        *self.cached.borrow_mut() = Some((width, name.clone()));
        name
    }
}

/// Remove one pair of matching wrapping quotes.
fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::strip_quotes;

    #[test]
    fn strips_wrapping_quotes() {
        assert_eq!(strip_quotes("\"md\""), "md");
        assert_eq!(strip_quotes("'xl'"), "xl");
        assert_eq!(strip_quotes("lg"), "lg");
        assert_eq!(strip_quotes(""), "");
        assert_eq!(strip_quotes("\"\""), "");
    }

    #[test]
    fn mismatched_quotes_are_kept() {
        assert_eq!(strip_quotes("\"sm'"), "\"sm'");
        assert_eq!(strip_quotes("\""), "\"");
    }
}
