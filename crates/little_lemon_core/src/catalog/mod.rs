//! Immutable menu catalog.
//!
//! # Responsibility
//! - Own the fixed list of orderable items.
//! - Provide the built-in Little Lemon menu.
//!
//! # Invariants
//! - A catalog is never empty.
//! - Item order is insertion order and never changes.
//! - No API mutates a catalog after construction, so it can be shared across
//!   threads without locking.

use crate::model::menu::{Category, MenuItem, MenuItemId, Price};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "catalog must contain at least one item"),
        }
    }
}

impl Error for CatalogError {}

/// Ordered, read-only set of menu items.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Builds a catalog from items in display order.
    ///
    /// # Errors
    /// - Returns [`CatalogError::Empty`] when `items` is empty.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { items })
    }

    /// The restaurant's built-in menu.
    pub fn little_lemon() -> Self {
        let item = |name: &str, description: &str, cents: u32, image: &str, category| {
            MenuItem::new(name, description, Price::from_cents(cents), image, category)
        };

        Self {
            items: vec![
                item(
                    "Greek Salad",
                    "The famous greek salad of crispy lettuce, peppers, olives...",
                    1299,
                    "greek_salad",
                    Category::Starters,
                ),
                item(
                    "Bruschetta",
                    "Our Bruschetta is made from grilled bread smeared with garlic...",
                    799,
                    "bruschetta",
                    Category::Starters,
                ),
                item(
                    "Grilled Fish",
                    "Barbequed catch of the day with red onion, crisp capers...",
                    2000,
                    "grilled_fish",
                    Category::Mains,
                ),
                item(
                    "Pasta",
                    "Penne with fried aubergines, tomato sauce, fresh chilli, garlic...",
                    1899,
                    "pasta",
                    Category::Mains,
                ),
                item(
                    "Lemon Dessert",
                    "Light and fluffy traditional homemade Italian Lemon cake...",
                    699,
                    "lemon_dessert",
                    Category::Dessert,
                ),
                item("Whiskey", "", 1599, "whiskey", Category::Drinks),
                item("Lemonade", "", 799, "lemonade", Category::Drinks),
            ],
        }
    }

    /// All items in insertion order.
    pub fn all(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false` for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError};
    use crate::model::menu::Category;

    #[test]
    fn new_rejects_empty_item_list() {
        assert_eq!(Catalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn little_lemon_menu_keeps_insertion_order() {
        let catalog = Catalog::little_lemon();
        let names = catalog
            .all()
            .iter()
            .map(|item| item.name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "Greek Salad",
                "Bruschetta",
                "Grilled Fish",
                "Pasta",
                "Lemon Dessert",
                "Whiskey",
                "Lemonade"
            ]
        );
        assert_eq!(catalog.len(), 7);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn every_category_has_at_least_one_item() {
        let catalog = Catalog::little_lemon();
        for category in Category::ALL {
            assert!(catalog.all().iter().any(|item| item.category() == category));
        }
    }

    #[test]
    fn find_resolves_stable_ids() {
        let catalog = Catalog::little_lemon();
        let pasta = &catalog.all()[3];
        let found = catalog.find(pasta.id()).expect("pasta should be found");
        assert_eq!(found.name(), "Pasta");
        assert_eq!(found.price().to_string(), "$18.99");
    }
}
