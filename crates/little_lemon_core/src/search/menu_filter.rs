//! Category and text filters over menu items.
//!
//! # Responsibility
//! - Provide pure, composable filters for the menu list.
//!
//! # Invariants
//! - Filters never reorder their input.
//! - Category is applied before text search.
//! - An empty query is the identity; no other query is special-cased.

use crate::model::menu::{Category, MenuItem};

/// Selection driving the rendered menu list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuQuery {
    pub category: Category,
    /// Free text typed into the search field.
    pub text: String,
}

impl MenuQuery {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

impl Default for MenuQuery {
    /// Initial picker state: starters, no search text.
    fn default() -> Self {
        Self::new(Category::Starters, "")
    }
}

/// Keeps items whose category equals `category`, in input order.
pub fn by_category<'a, I>(items: I, category: Category) -> Vec<&'a MenuItem>
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    items
        .into_iter()
        .filter(|item| item.category() == category)
        .collect()
}

/// Keeps items whose name or description contains `query`, ignoring case.
///
/// Returns the input unchanged when `query` is empty.
pub fn by_search<'a, I>(items: I, query: &str) -> Vec<&'a MenuItem>
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    if query.is_empty() {
        return items.into_iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| matches_text(item, &needle))
        .collect()
}

/// Applies the category facet, then the text search.
pub fn filter_menu<'a, I>(items: I, query: &MenuQuery) -> Vec<&'a MenuItem>
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    by_search(by_category(items, query.category), &query.text)
}

fn matches_text(item: &MenuItem, lowered_query: &str) -> bool {
    item.name().to_lowercase().contains(lowered_query)
        || item.description().to_lowercase().contains(lowered_query)
}

#[cfg(test)]
mod tests {
    use super::{by_category, by_search, filter_menu, MenuQuery};
    use crate::model::menu::{Category, MenuItem, Price};

    fn item(name: &str, description: &str, category: Category) -> MenuItem {
        MenuItem::new(name, description, Price::from_cents(100), "img", category)
    }

    #[test]
    fn by_category_preserves_relative_order() {
        let items = vec![
            item("a", "", Category::Drinks),
            item("b", "", Category::Mains),
            item("c", "", Category::Drinks),
        ];
        let names = by_category(&items, Category::Drinks)
            .into_iter()
            .map(MenuItem::name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn by_category_returns_empty_when_nothing_matches() {
        let items = vec![item("a", "", Category::Drinks)];
        assert!(by_category(&items, Category::Dessert).is_empty());
    }

    #[test]
    fn by_search_matches_description_case_insensitively() {
        let items = vec![
            item("Pasta", "Penne with GARLIC", Category::Mains),
            item("Fish", "Capers", Category::Mains),
        ];
        let hits = by_search(&items, "garlic");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Pasta");
    }

    #[test]
    fn by_search_lowercases_non_ascii_text() {
        let items = vec![item("CRÈME BRÛLÉE", "", Category::Dessert)];
        assert_eq!(by_search(&items, "brûlée").len(), 1);
    }

    #[test]
    fn whitespace_query_is_not_treated_as_empty() {
        let items = vec![
            item("Greek Salad", "", Category::Starters),
            item("Bruschetta", "", Category::Starters),
        ];
        let hits = by_search(&items, " ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Greek Salad");
    }

    #[test]
    fn filter_menu_defaults_to_all_starters() {
        let items = vec![
            item("Greek Salad", "", Category::Starters),
            item("Pasta", "", Category::Mains),
        ];
        let hits = filter_menu(&items, &MenuQuery::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Greek Salad");
    }
}
