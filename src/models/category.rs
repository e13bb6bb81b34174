use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of labels an item can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ของสด")]
    FreshFood,
    #[serde(rename = "ของใช้ในบ้าน")]
    Household,
    #[serde(rename = "เครื่องดื่ม")]
    Drinks,
    #[serde(rename = "ของหวาน")]
    Sweets,
}

impl Category {
    /// Display order; the first entry is the default for new items
    pub const ALL: [Category; 4] = [
        Category::FreshFood,
        Category::Household,
        Category::Drinks,
        Category::Sweets,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::FreshFood => "ของสด",
            Category::Household => "ของใช้ในบ้าน",
            Category::Drinks => "เครื่องดื่ม",
            Category::Sweets => "ของหวาน",
        }
    }

    fn position(&self) -> usize {
        Category::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    pub fn next(&self) -> Category {
        Category::ALL[(self.position() + 1) % Category::ALL.len()]
    }

    pub fn previous(&self) -> Category {
        let len = Category::ALL.len();
        Category::ALL[(self.position() + len - 1) % len]
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::ALL[0]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category selection used only when viewing the list, never stored on an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "ทั้งหมด";

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    /// All -> each category in order -> All
    pub fn cycle(&self) -> CategoryFilter {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::ALL[0]),
            CategoryFilter::Only(c) if *c == Category::ALL[Category::ALL.len() - 1] => {
                CategoryFilter::All
            }
            CategoryFilter::Only(c) => CategoryFilter::Only(c.next()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => Self::ALL_LABEL,
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::FreshFood).expect("Failed to serialize");
        assert_eq!(json, "\"ของสด\"");

        let parsed: Category =
            serde_json::from_str("\"เครื่องดื่ม\"").expect("Failed to deserialize");
        assert_eq!(parsed, Category::Drinks);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        assert!(serde_json::from_str::<Category>("\"ทั้งหมด\"").is_err());
        assert!(serde_json::from_str::<Category>("\"Sweets\"").is_err());
    }

    #[test]
    fn test_category_cycling_wraps() {
        assert_eq!(Category::Sweets.next(), Category::FreshFood);
        assert_eq!(Category::FreshFood.previous(), Category::Sweets);
        assert_eq!(Category::default(), Category::FreshFood);
    }

    #[test]
    fn test_filter_cycle_visits_every_category_then_all() {
        let mut filter = CategoryFilter::All;
        let mut seen = Vec::new();
        for _ in 0..Category::ALL.len() {
            filter = filter.cycle();
            seen.push(filter);
        }

        assert_eq!(
            seen,
            Category::ALL
                .iter()
                .map(|c| CategoryFilter::Only(*c))
                .collect::<Vec<_>>()
        );
        assert_eq!(filter.cycle(), CategoryFilter::All);
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Household));
        assert!(CategoryFilter::Only(Category::Drinks).matches(Category::Drinks));
        assert!(!CategoryFilter::Only(Category::Drinks).matches(Category::Sweets));
        assert_eq!(CategoryFilter::All.label(), "ทั้งหมด");
    }
}
