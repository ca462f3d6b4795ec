//! # Menu Catalog
//!
//! The shop's static menu and a linear search over it.
//!
//! Prices here are list prices only. The ledger copies them into a line item
//! at add time, so editing the catalog never touches an open cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::NewLineItem;
use crate::validation::validate_search_query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Category {
    Coffee,
    NonCoffee,
    Pastry,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Coffee => "Coffee",
            Category::NonCoffee => "Non-Coffee",
            Category::Pastry => "Pastry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price_cents: i64,
    pub image: Option<String>,
    /// Sold out items stay listed but cannot be ordered.
    pub available: bool,
}

impl MenuItem {
    fn new(id: &str, name: &str, category: Category, price_cents: i64) -> Self {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            category,
            price_cents,
            image: Some(format!("/images/menu/{}.jpg", id)),
            available: true,
        }
    }

    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Ledger input carrying this item's current name and price.
    pub fn to_line_item(&self) -> NewLineItem {
        NewLineItem {
            image: self.image.clone(),
            ..NewLineItem::new(self.id.clone(), self.name.clone(), self.price())
        }
    }

    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.category.label().to_lowercase().contains(needle)
    }
}

/// Read-only menu.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Catalog { items }
    }

    /// The house menu served by the storefront.
    pub fn house_menu() -> Self {
        use Category::*;

        let mut items = vec![
            MenuItem::new("americano", "Americano", Coffee, 21000),
            MenuItem::new("cafe-latte", "Cafe Latte", Coffee, 24000),
            MenuItem::new("spanish-latte", "Spanish Latte", Coffee, 27000),
            MenuItem::new("cappuccino", "Cappuccino", Coffee, 24000),
            MenuItem::new("caramel-macchiato", "Caramel Macchiato", Coffee, 29000),
            MenuItem::new("cold-brew", "Cold Brew", Coffee, 23000),
            MenuItem::new("matcha-latte", "Matcha Latte", NonCoffee, 26000),
            MenuItem::new("chocolate", "Dark Chocolate", NonCoffee, 22000),
            MenuItem::new("strawberry-milk", "Strawberry Milk", NonCoffee, 20000),
            MenuItem::new("croissant", "Butter Croissant", Pastry, 12000),
            MenuItem::new("cinnamon-roll", "Cinnamon Roll", Pastry, 14000),
            MenuItem::new("banana-bread", "Banana Bread", Pastry, 11000),
        ];
        if let Some(item) = items.iter_mut().find(|item| item.id == "cinnamon-roll") {
            item.available = false;
        }

        Catalog::new(items)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> CoreResult<&MenuItem> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Looks up an item that can be ordered right now.
    pub fn orderable(&self, id: &str) -> CoreResult<&MenuItem> {
        let item = self.get(id)?;
        if !item.available {
            return Err(CoreError::ProductUnavailable(id.to_string()));
        }
        Ok(item)
    }

    /// Case-insensitive substring match on name and category label,
    /// optionally restricted to one category. Menu order is preserved.
    pub fn search(&self, query: &str, category: Option<Category>) -> CoreResult<Vec<&MenuItem>> {
        let needle = validate_search_query(query)?.to_lowercase();

        Ok(self
            .items
            .iter()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .filter(|item| item.matches(&needle))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_lists_everything() {
        let catalog = Catalog::house_menu();
        let all = catalog.search("", None).unwrap();
        assert_eq!(all.len(), catalog.items().len());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::house_menu();
        let hits = catalog.search("LATTE", None).unwrap();
        let ids: Vec<_> = hits.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["cafe-latte", "spanish-latte", "matcha-latte"]);
    }

    #[test]
    fn test_search_by_category() {
        let catalog = Catalog::house_menu();
        let pastries = catalog.search("", Some(Category::Pastry)).unwrap();
        assert_eq!(pastries.len(), 3);

        let hits = catalog.search("latte", Some(Category::NonCoffee)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "matcha-latte");
    }

    #[test]
    fn test_search_matches_category_label() {
        let catalog = Catalog::house_menu();
        let hits = catalog.search("non-coffee", None).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_get_unknown_item() {
        let catalog = Catalog::house_menu();
        assert!(catalog.get("americano").is_ok());
        assert!(matches!(catalog.get("tea"), Err(CoreError::ProductNotFound(_))));
    }

    #[test]
    fn test_sold_out_item_is_listed_but_not_orderable() {
        let catalog = Catalog::house_menu();
        assert!(!catalog.get("cinnamon-roll").unwrap().available);
        assert!(matches!(
            catalog.orderable("cinnamon-roll"),
            Err(CoreError::ProductUnavailable(_))
        ));
        assert!(catalog.orderable("croissant").is_ok());
    }

    #[test]
    fn test_to_line_item_snapshots_price() {
        let catalog = Catalog::house_menu();
        let line = catalog.get("spanish-latte").unwrap().to_line_item();
        assert_eq!(line.unit_price_cents, 27000);
        assert_eq!(line.name, "Spanish Latte");
    }
}
