//! Menu item domain model.
//!
//! # Responsibility
//! - Define the orderable item record rendered by the menu list.
//! - Define the closed category set used by the category picker.
//!
//! # Invariants
//! - `id` is generated once at construction and never reused.
//! - Item fields are private; no API mutates an item after construction.
//! - Prices are non-negative by construction.

use rust_decimal::Decimal;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a menu item for the process lifetime.
pub type MenuItemId = Uuid;

/// Menu section an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Starters,
    Mains,
    Dessert,
    Drinks,
}

impl Category {
    /// All categories in picker order.
    pub const ALL: [Category; 4] = [
        Category::Starters,
        Category::Mains,
        Category::Dessert,
        Category::Drinks,
    ];

    /// Display label shown on category buttons.
    pub fn label(self) -> &'static str {
        match self {
            Self::Starters => "Starters",
            Self::Mains => "Mains",
            Self::Dessert => "Dessert",
            Self::Drinks => "Drinks",
        }
    }

    /// Parses a label case-insensitively, ignoring surrounding whitespace.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(value))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Non-negative monetary amount with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Builds a price from whole cents, e.g. `1299` for `12.99`.
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Orderable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    id: MenuItemId,
    name: String,
    description: String,
    price: Price,
    image_name: String,
    category: Category,
}

impl MenuItem {
    /// Creates an item with a freshly generated stable ID.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        image_name: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            price,
            image_name: image_name.into(),
            category,
        }
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short marketing text; empty for items without one.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Opaque asset reference resolved by the rendering layer.
    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn category(&self) -> Category {
        self.category
    }
}
