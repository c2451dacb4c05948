//! Brand classification for directory locations.
//!
//! The brand is never stored alongside a location in the directory table;
//! it is derived from the location name by prefix convention, exactly once
//! per directory read. Classification is a pure, total function: every name
//! resolves to exactly one brand.

use serde::{Deserialize, Serialize};

/// Name prefixes that mark a Five Guys location as US-side.
const FIVE_GUYS_USA_PREFIXES: [&str; 2] = ["FG - OR", "FG - WA"];

/// The closed set of brands the dashboard reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Brand {
    BlazePizza,
    FiveGuysUsa,
    FiveGuysCanada,
}

impl Brand {
    /// Derives the brand from a location name.
    ///
    /// Prefix rules, checked in order: `BZ` is Blaze Pizza, a US region
    /// prefix (`FG - OR`, `FG - WA`) is Five Guys USA, and everything else
    /// is Five Guys Canada.
    #[must_use]
    pub fn classify(location_name: &str) -> Self {
        if location_name.starts_with("BZ") {
            Brand::BlazePizza
        } else if FIVE_GUYS_USA_PREFIXES
            .iter()
            .any(|p| location_name.starts_with(p))
        {
            Brand::FiveGuysUsa
        } else {
            Brand::FiveGuysCanada
        }
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Brand::BlazePizza => write!(f, "Blaze Pizza"),
            Brand::FiveGuysUsa => write!(f, "Five Guys USA"),
            Brand::FiveGuysCanada => write!(f, "Five Guys Canada"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_bz_prefix_is_blaze_pizza() {
        assert_eq!(Brand::classify("BZ01"), Brand::BlazePizza);
        assert_eq!(Brand::classify("BZ Downtown"), Brand::BlazePizza);
    }

    #[test]
    fn classify_us_region_prefixes_are_five_guys_usa() {
        assert_eq!(Brand::classify("FG - OR1"), Brand::FiveGuysUsa);
        assert_eq!(Brand::classify("FG - WA12"), Brand::FiveGuysUsa);
    }

    #[test]
    fn classify_everything_else_is_five_guys_canada() {
        assert_eq!(Brand::classify("FG - TOR1"), Brand::FiveGuysCanada);
        assert_eq!(Brand::classify("FG Portland"), Brand::FiveGuysCanada);
        assert_eq!(Brand::classify(""), Brand::FiveGuysCanada);
    }

    #[test]
    fn classify_directory_scenario() {
        let names = ["BZ01", "FG - OR1", "FG - TOR1"];
        let brands: Vec<Brand> = names.iter().map(|n| Brand::classify(n)).collect();
        assert_eq!(
            brands,
            vec![Brand::BlazePizza, Brand::FiveGuysUsa, Brand::FiveGuysCanada]
        );
    }

    #[test]
    fn classify_is_idempotent() {
        for name in ["BZ99", "FG - WA3", "FG - QC2"] {
            assert_eq!(Brand::classify(name), Brand::classify(name));
        }
    }

    #[test]
    fn brand_display_labels() {
        assert_eq!(Brand::BlazePizza.to_string(), "Blaze Pizza");
        assert_eq!(Brand::FiveGuysUsa.to_string(), "Five Guys USA");
        assert_eq!(Brand::FiveGuysCanada.to_string(), "Five Guys Canada");
    }
}
