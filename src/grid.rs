use crate::breakpoint::Breakpoint;
use crate::error::{BreakpointError, Result};
use crate::query::{BreakpointQueryMap, MediaQuery};

/// Width breakpoints in pixels.
///
/// `xs` has no threshold of its own: it covers everything narrower than `sm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridBreakpoints {
    sm: u32,
    md: u32,
    lg: u32,
    xl: u32,
    xxl: u32,
}

impl Default for GridBreakpoints {
    fn default() -> Self {
        Self {
            sm: 576,
            md: 768,
            lg: 992,
            xl: 1200,
            xxl: 1600,
        }
    }
}

impl GridBreakpoints {
    /// Build a threshold table, rejecting a zero `sm` or any threshold that is
    /// not strictly above the previous one.
    pub fn new(sm: u32, md: u32, lg: u32, xl: u32, xxl: u32) -> Result<Self> {
        let grid = Self {
            sm,
            md,
            lg,
            xl,
            xxl,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Read thresholds from a JSON object such as `{"md": 800}`.
    ///
    /// Keys that are left out keep their default value.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        #[serde(default, deny_unknown_fields)]
        struct Overrides {
            sm: u32,
            md: u32,
            lg: u32,
            xl: u32,
            xxl: u32,
        }

        impl Default for Overrides {
            fn default() -> Self {
                let grid = GridBreakpoints::default();
                Self {
                    sm: grid.sm,
                    md: grid.md,
                    lg: grid.lg,
                    xl: grid.xl,
                    xxl: grid.xxl,
                }
            }
        }

        let Overrides { sm, md, lg, xl, xxl } = serde_json::from_str(json)?;
        Self::new(sm, md, lg, xl, xxl)
    }

    /// The lowest width, in pixels, at which `breakpoint` applies.
    pub fn threshold(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Xs => 0,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
            Breakpoint::Xxl => self.xxl,
        }
    }

    /// The widest breakpoint whose threshold `width` reaches.
    pub fn get_width_bp(&self, width: f64) -> Breakpoint {
        crate::RESPONSIVE_ARRAY
            .into_iter()
            .find(|bp| width >= f64::from(self.threshold(*bp)))
            .unwrap_or(Breakpoint::Xs)
    }

    /// Predicates for every breakpoint. `xs` is the complement of `sm`.
    pub fn query_map(&self) -> BreakpointQueryMap {
        BreakpointQueryMap::from_fn(|bp| match bp {
            Breakpoint::Xs => MediaQuery::MaxWidth(self.sm - 1),
            bp => MediaQuery::MinWidth(self.threshold(bp)),
        })
    }

    fn validate(&self) -> Result<()> {
        if self.sm == 0 {
            return Err(BreakpointError::ZeroThreshold);
        }
        let ordered = [
            Breakpoint::Sm,
            Breakpoint::Md,
            Breakpoint::Lg,
            Breakpoint::Xl,
            Breakpoint::Xxl,
        ];
        for pair in ordered.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            let (lower_px, upper_px) = (self.threshold(lower), self.threshold(upper));
            if lower_px >= upper_px {
                return Err(BreakpointError::NotIncreasing {
                    lower,
                    upper,
                    lower_px,
                    upper_px,
                });
            }
        }
        Ok(())
    }
}
