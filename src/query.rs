use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::breakpoint::Breakpoint;
use crate::error::BreakpointError;

/// A boolean predicate over the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaQuery {
    /// `(min-width: Npx)`
    MinWidth(u32),
    /// `(max-width: Npx)`
    MaxWidth(u32),
}

impl MediaQuery {
    /// Evaluate the predicate for a viewport `width` pixels wide.
    ///
    /// Both bounds are inclusive, so a fractional width between `xs`'s
    /// `max-width` and `sm`'s `min-width` matches neither.
    pub fn matches(&self, width: f64) -> bool {
        match *self {
            MediaQuery::MinWidth(px) => width >= f64::from(px),
            MediaQuery::MaxWidth(px) => width <= f64::from(px),
        }
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaQuery::MinWidth(px) => write!(f, "(min-width: {px}px)"),
            MediaQuery::MaxWidth(px) => write!(f, "(max-width: {px}px)"),
        }
    }
}

impl FromStr for MediaQuery {
    type Err = BreakpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BreakpointError::InvalidQuery(s.to_string());

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (feature, value) = inner.split_once(':').ok_or_else(invalid)?;
        let px = value
            .trim()
            .strip_suffix("px")
            .and_then(|n| n.trim_end().parse::<u32>().ok())
            .ok_or_else(invalid)?;

        match feature.trim() {
            "min-width" => Ok(MediaQuery::MinWidth(px)),
            "max-width" => Ok(MediaQuery::MaxWidth(px)),
            _ => Err(invalid()),
        }
    }
}

/// The fixed breakpoint → predicate table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakpointQueryMap {
    queries: [MediaQuery; Breakpoint::COUNT],
}

impl Default for BreakpointQueryMap {
    fn default() -> Self {
        crate::GridBreakpoints::default().query_map()
    }
}

impl BreakpointQueryMap {
    pub(crate) fn from_fn(mut f: impl FnMut(Breakpoint) -> MediaQuery) -> Self {
        let mut queries = [MediaQuery::MinWidth(0); Breakpoint::COUNT];
        for bp in Breakpoint::iter() {
            queries[bp.index()] = f(bp);
        }
        Self { queries }
    }

    pub fn get(&self, breakpoint: Breakpoint) -> MediaQuery {
        self.queries[breakpoint.index()]
    }

    /// Every `(breakpoint, query)` pair, narrowest first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, MediaQuery)> + '_ {
        Breakpoint::iter().map(|bp| (bp, self.get(bp)))
    }
}

impl Index<Breakpoint> for BreakpointQueryMap {
    type Output = MediaQuery;

    fn index(&self, breakpoint: Breakpoint) -> &MediaQuery {
        &self.queries[breakpoint.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_display_agree() {
        for text in ["(min-width: 768px)", "(max-width: 575px)"] {
            let query: MediaQuery = text.parse().unwrap();
            assert_eq!(query.to_string(), text);
        }
    }

    #[test]
    fn parse_tolerates_whitespace() {
        assert_eq!(
            " ( min-width :992px ) ".parse::<MediaQuery>().unwrap(),
            MediaQuery::MinWidth(992)
        );
        assert_eq!(
            "(min-width :  992 px)".parse::<MediaQuery>().unwrap(),
            MediaQuery::MinWidth(992)
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in [
            "min-width: 768px",
            "(min-width: 768)",
            "(min-height: 768px)",
            "(min-width: -1px)",
            "(min-width: wide)",
        ] {
            let parsed = text.parse::<MediaQuery>();
            assert!(
                matches!(parsed, Err(BreakpointError::InvalidQuery(ref q)) if q == text),
                "{text} should not parse"
            );
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(MediaQuery::MinWidth(768).matches(768.0));
        assert!(!MediaQuery::MinWidth(768).matches(767.9));
        assert!(MediaQuery::MaxWidth(575).matches(575.0));
        assert!(!MediaQuery::MaxWidth(575).matches(575.5));
    }

    #[test]
    fn every_width_matches_xs_or_sm() {
        let queries = BreakpointQueryMap::default();
        for width in 0..3000 {
            let width = f64::from(width);
            assert_ne!(
                queries[Breakpoint::Xs].matches(width),
                queries[Breakpoint::Sm].matches(width)
            );
        }
    }
}
