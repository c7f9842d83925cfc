/// Categories a fresh ledger starts with, in registration order.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food",
    "Rent",
    "Transport",
    "Clothing",
    "Internet",
    "Beautiful",
    "Marketplaces",
    "Nalogi",
    "Health",
    "Gifts",
];

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Selects which categories a statistics or export operation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(category: impl Into<String>) -> Self {
        CategoryFilter::Only(category.into())
    }

    /// Interpret free-form user input: blank means every category.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(input.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => name == category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input() {
        assert_eq!(CategoryFilter::from_input(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_input("   "), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_input(" Food "),
            CategoryFilter::only("Food")
        );
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let filter = CategoryFilter::only("Food");
        assert!(filter.matches("Food"));
        assert!(!filter.matches("food"));
        assert!(CategoryFilter::All.matches("anything"));
    }

    #[test]
    fn test_default_categories_order() {
        let categories = default_categories();
        assert_eq!(categories.len(), 10);
        assert_eq!(categories[0], "Food");
        assert_eq!(categories[1], "Rent");
        assert_eq!(categories[9], "Gifts");
    }
}
