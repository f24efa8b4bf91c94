use std::fmt;
use std::ops::Index;

use bitflags::bitflags;
use strum::IntoEnumIterator;

use crate::grid::GridBreakpoints;

bitflags! {
  #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
  struct SizeFlags: u8 {
    const XS = 1;
    const SM = 2;
    const MD = 4;
    const LG = 8;
    const XL = 16;
    const XXL = 32;
  }
}

/// A named viewport-width category.
///
/// Variants are declared from narrowest to widest, so the derived ordering
/// follows the pixel thresholds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

/// Every breakpoint, widest first.
pub const RESPONSIVE_ARRAY: [Breakpoint; 6] = [
    Breakpoint::Xxl,
    Breakpoint::Xl,
    Breakpoint::Lg,
    Breakpoint::Md,
    Breakpoint::Sm,
    Breakpoint::Xs,
];

impl Breakpoint {
    pub const COUNT: usize = 6;

    /// Position in the narrow-to-wide table.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    fn flag(self) -> SizeFlags {
        match self {
            Breakpoint::Xs => SizeFlags::XS,
            Breakpoint::Sm => SizeFlags::SM,
            Breakpoint::Md => SizeFlags::MD,
            Breakpoint::Lg => SizeFlags::LG,
            Breakpoint::Xl => SizeFlags::XL,
            Breakpoint::Xxl => SizeFlags::XXL,
        }
    }
}

/// Whether each breakpoint's predicate currently holds.
///
/// Several entries may be true at once: a 1000px viewport is `sm`, `md` and
/// `lg` simultaneously.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct ScreenMap {
    flags: SizeFlags,
}

impl ScreenMap {
    /// A map with every breakpoint inactive.
    pub const fn new() -> Self {
        Self {
            flags: SizeFlags::empty(),
        }
    }

    /// The map a viewport of `width` pixels produces under `grid`.
    pub fn from_width(width: f64, grid: &GridBreakpoints) -> Self {
        let queries = grid.query_map();
        Breakpoint::iter().fold(Self::new(), |map, bp| {
            map.with(bp, queries[bp].matches(width))
        })
    }

    pub fn get(&self, breakpoint: Breakpoint) -> bool {
        self.flags.contains(breakpoint.flag())
    }

    pub fn set(&mut self, breakpoint: Breakpoint, matches: bool) {
        self.flags.set(breakpoint.flag(), matches);
    }

    /// Copy of this map with a single entry replaced.
    pub fn with(mut self, breakpoint: Breakpoint, matches: bool) -> Self {
        self.set(breakpoint, matches);
        self
    }

    /// All six entries, narrowest first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, bool)> + '_ {
        Breakpoint::iter().map(|bp| (bp, self.get(bp)))
    }

    pub fn active(&self) -> impl Iterator<Item = Breakpoint> + '_ {
        Breakpoint::iter().filter(|bp| self.get(*bp))
    }

    /// The widest active breakpoint, if any.
    pub fn widest(&self) -> Option<Breakpoint> {
        RESPONSIVE_ARRAY.into_iter().find(|bp| self.get(*bp))
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl Index<Breakpoint> for ScreenMap {
    type Output = bool;

    fn index(&self, breakpoint: Breakpoint) -> &bool {
        if self.get(breakpoint) { &true } else { &false }
    }
}

impl fmt::Debug for ScreenMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(bp, matches)| (bp.name(), matches)))
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ScreenMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Breakpoint::COUNT))?;
        for (bp, matches) in self.iter() {
            map.serialize_entry(bp.name(), &matches)?;
        }
        map.end()
    }
}
