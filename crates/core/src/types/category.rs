//! Category filter used by the catalog grid.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sentinel value that selects every category.
pub const ALL_CATEGORIES: &str = "all";

/// Which products the catalog grid shows.
///
/// Matching is an exact, case-sensitive comparison on the category label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Only products whose category equals this label.
    Only(String),
}

impl CategoryFilter {
    /// Returns `true` if a product in `category` passes the filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => label == category,
        }
    }

    /// The value carried by filter controls (`"all"` or the label).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(label) => label,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map_or(Self::All, Self::from)
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel() {
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.as_str(), "all");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let filter = CategoryFilter::from("electronics");
        assert!(filter.matches("electronics"));
        assert!(!filter.matches("Electronics"));
        assert!(!CategoryFilter::from("All").matches("jewelery"));
    }

    #[test]
    fn test_all_matches_everything() {
        assert!(CategoryFilter::All.matches("jewelery"));
        assert!(CategoryFilter::All.matches(""));
    }
}
