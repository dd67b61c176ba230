use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::PayloadBounds;

// ---------------------------------------------------------------------------
// SiteFilter – "all sites" sentinel or one specific site
// ---------------------------------------------------------------------------

/// Dropdown token meaning "do not filter by site".
pub const ALL_SITES_TOKEN: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SiteFilter {
    #[default]
    AllSites,
    /// A site identifier. Not validated: unknown sites simply match nothing.
    Site(String),
}

impl SiteFilter {
    /// Parse a raw control token. The sentinel is matched case-insensitively
    /// (`ALL`, `All`, `All Sites`); anything else is taken as a site id.
    pub fn from_token(token: &str) -> Self {
        let t = token.trim();
        if t.eq_ignore_ascii_case(ALL_SITES_TOKEN) || t.eq_ignore_ascii_case("all sites") {
            SiteFilter::AllSites
        } else {
            SiteFilter::Site(t.to_string())
        }
    }

    pub fn site(&self) -> Option<&str> {
        match self {
            SiteFilter::AllSites => None,
            SiteFilter::Site(s) => Some(s),
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::AllSites => write!(f, "All Sites"),
            SiteFilter::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Selection – raw filter state delivered by the input provider
// ---------------------------------------------------------------------------

/// The user's current filter choice, exactly as the controls reported it.
///
/// A `None` bound means "unset" and defaults to the dataset's global bound.
/// Bounds may be inverted, out of range or non-finite; [`Selection::normalize`]
/// resolves all of that before any filtering happens.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub site: SiteFilter,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl Selection {
    pub fn new(site: SiteFilter, low: f64, high: f64) -> Self {
        Selection {
            site,
            low: Some(low),
            high: Some(high),
        }
    }

    /// A selection for `site` with both payload bounds unset.
    pub fn unbounded(site: SiteFilter) -> Self {
        Selection {
            site,
            low: None,
            high: None,
        }
    }

    /// Resolve this selection against the dataset's payload bounds.
    ///
    /// * unset or non-finite bounds take the global bound for their side;
    /// * an inverted range is swapped;
    /// * bounds are clamped into `[min, max]`.
    ///
    /// Filtering uses an open interval, so a bound that lies beyond a global
    /// extreme (including an unset one) is placed one ULP outside that
    /// extreme: the clamp never drops a record the raw range admitted.
    /// Swapping happens first so both sides get that treatment.
    pub fn normalize(&self, bounds: PayloadBounds) -> NormalizedSelection {
        let mut adjusted = [self.low, self.high]
            .into_iter()
            .flatten()
            .any(|v| !bounds.contains(v));

        let mut raw_low = self.low.filter(|v| v.is_finite());
        let mut raw_high = self.high.filter(|v| v.is_finite());
        if let (Some(l), Some(h)) = (raw_low, raw_high) {
            if l > h {
                std::mem::swap(&mut raw_low, &mut raw_high);
                adjusted = true;
            }
        }

        // Ordered raw bounds stay ordered after clamping.
        let low = clamp_bound(raw_low, bounds, Side::Low);
        let high = clamp_bound(raw_high, bounds, Side::High);

        NormalizedSelection {
            site: self.site.clone(),
            low,
            high,
            adjusted,
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Low,
    High,
}

fn clamp_bound(value: Option<f64>, bounds: PayloadBounds, side: Side) -> f64 {
    match (value, side) {
        (None, Side::Low) => next_below(bounds.min),
        (None, Side::High) => next_above(bounds.max),
        (Some(v), Side::Low) if v < bounds.min => next_below(bounds.min),
        (Some(v), Side::High) if v > bounds.max => next_above(bounds.max),
        (Some(v), _) => v.clamp(bounds.min, bounds.max),
    }
}

/// Largest `f64` strictly below `x` (finite `x` only).
fn next_below(x: f64) -> f64 {
    if x == 0.0 {
        -f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

/// Smallest `f64` strictly above `x` (finite `x` only).
fn next_above(x: f64) -> f64 {
    -next_below(-x)
}

// ---------------------------------------------------------------------------
// NormalizedSelection – what the engine actually filters with
// ---------------------------------------------------------------------------

/// A selection whose range is finite, ordered and inside the dataset bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSelection {
    pub site: SiteFilter,
    pub low: f64,
    pub high: f64,
    /// Whether normalization had to change anything the provider sent.
    pub adjusted: bool,
}
