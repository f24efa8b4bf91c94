use std::{cell::Cell, rc::Rc};

use floem_responsive::{
    Breakpoint, BreakpointReader, GridBreakpoints, SimulatedViewport,
    platform::{ComputedStyle, DetectContext, ExecutionContext, PseudoElement, ViewportSize},
};

#[test]
fn headless_context_has_no_breakpoint() {
    let viewport = SimulatedViewport::headless();
    let reader = BreakpointReader::new(Rc::new(viewport.clone()));

    assert_eq!(reader.current_breakpoint(), None);
    viewport.resize(1300.0);
    assert_eq!(reader.current_breakpoint(), None);
    assert_eq!(reader.refresh(), None);
    assert_eq!(reader.breakpoint(), None);
}

#[test]
fn reads_name_for_current_width() {
    let viewport = SimulatedViewport::new(800.0);
    let reader = BreakpointReader::new(Rc::new(viewport.clone()));

    assert_eq!(reader.current_breakpoint().as_deref(), Some("md"));
    assert_eq!(reader.breakpoint(), Some(Breakpoint::Md));

    viewport.resize(1000.0);
    assert_eq!(reader.breakpoint(), Some(Breakpoint::Lg));

    viewport.resize(320.0);
    assert_eq!(reader.breakpoint(), Some(Breakpoint::Xs));
}

#[test]
fn follows_configured_grid() {
    let grid = GridBreakpoints::from_json(r#"{"xxl": 1400}"#).unwrap();
    let viewport = SimulatedViewport::new(1500.0).with_breakpoints(grid);
    let reader = BreakpointReader::new(Rc::new(viewport));

    assert_eq!(reader.breakpoint(), Some(Breakpoint::Xxl));
}

#[test]
fn unloaded_stylesheet_gives_empty_name() {
    let viewport = SimulatedViewport::new(800.0);
    viewport.set_stylesheet_loaded(false);
    let reader = BreakpointReader::new(Rc::new(viewport.clone()));

    assert_eq!(reader.current_breakpoint().as_deref(), Some(""));
    assert_eq!(reader.breakpoint(), None);

    // Same width: the cached empty value is kept until a refresh.
    viewport.set_stylesheet_loaded(true);
    assert_eq!(reader.current_breakpoint().as_deref(), Some(""));
    assert_eq!(reader.refresh().as_deref(), Some("md"));
    assert_eq!(reader.current_breakpoint().as_deref(), Some("md"));
}

#[test]
fn other_anchor() {
    let viewport = SimulatedViewport::new(800.0);
    let reader =
        BreakpointReader::new(Rc::new(viewport)).with_anchor("body", PseudoElement::After);

    assert_eq!(reader.current_breakpoint().as_deref(), Some(""));
}

struct CountingStyle {
    width: Cell<f64>,
    reads: Cell<usize>,
}

impl ComputedStyle for CountingStyle {
    fn generated_content(&self, _anchor: &str, _pseudo: PseudoElement) -> String {
        self.reads.set(self.reads.get() + 1);
        "'sm'".to_string()
    }
}

impl ViewportSize for CountingStyle {
    fn viewport_width(&self) -> f64 {
        self.width.get()
    }
}

impl DetectContext for CountingStyle {
    fn execution_context(&self) -> ExecutionContext {
        ExecutionContext::Interactive
    }
}

#[test]
fn recomputes_only_on_width_change() {
    let env = Rc::new(CountingStyle {
        width: Cell::new(600.0),
        reads: Cell::new(0),
    });
    let reader = BreakpointReader::new(env.clone());

    assert_eq!(reader.breakpoint(), Some(Breakpoint::Sm));
    assert_eq!(reader.breakpoint(), Some(Breakpoint::Sm));
    assert_eq!(env.reads.get(), 1);

    env.width.set(700.0);
    assert_eq!(reader.current_breakpoint().as_deref(), Some("sm"));
    assert_eq!(env.reads.get(), 2);

    reader.refresh();
    assert_eq!(env.reads.get(), 3);
}
