//! Shopping cart: an ordered sequence of product lines.
//!
//! Invariants held by every operation:
//! - at most one line per product id
//! - no line with quantity zero (removal happens instead)
//! - insertion order is first-added order; re-incrementing an existing
//!   line does not move it

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::id::ProductId;
use super::price::Price;

/// A single cart entry referencing a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Id of the product in the catalog.
    pub product_id: ProductId,
    /// Quantity, always >= 1.
    pub quantity: u32,
}

/// A cart line projected into the shape the remote checkout call expects.
///
/// Prices come from the current catalog at projection time, never from a
/// snapshot taken when the line was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product display name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Per-unit price in minor units.
    pub unit_amount: Price,
    /// Quantity, always >= 1.
    pub quantity: u32,
}

/// An ordered collection of [`CartLine`] entries.
///
/// The cart holds product references only; prices are resolved against
/// the catalog on demand so `total()` always reflects current prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Increment the line for `product_id`, appending a new line with
    /// quantity 1 if none exists. An existing line keeps its position.
    ///
    /// The caller is responsible for validating the id against the
    /// catalog first; the cart itself holds no catalog reference.
    pub fn increment(&mut self, product_id: ProductId) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product_id,
                quantity: 1,
            });
        }
    }

    /// Set the quantity of an existing line in place, without reordering.
    ///
    /// A quantity of zero removes the line. If no line exists for the id
    /// this is a no-op - it does not create a line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove the line for `product_id`. Returns whether a line existed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price x quantity over all lines, at current catalog prices.
    ///
    /// Lines whose product is missing from the catalog contribute
    /// nothing; with a static catalog and validated adds that path is
    /// unreachable in practice.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Price {
        self.lines
            .iter()
            .filter_map(|line| {
                catalog
                    .get(&line.product_id)
                    .map(|p| p.price.saturating_mul(u64::from(line.quantity)))
            })
            .fold(Price::ZERO, |acc, line_total| acc.saturating_add(line_total))
    }

    /// Project every line into the remote checkout shape. Pure; no side
    /// effects. Lines with no catalog counterpart are skipped.
    #[must_use]
    pub fn line_items(&self, catalog: &Catalog) -> Vec<LineItem> {
        self.lines
            .iter()
            .filter_map(|line| {
                catalog.get(&line.product_id).map(|product| LineItem {
                    name: product.name.clone(),
                    description: product.description.clone(),
                    unit_amount: product.price,
                    quantity: line.quantity,
                })
            })
            .collect()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::catalog::Product;

    fn catalog() -> Catalog {
        let products = vec![
            Product {
                id: ProductId::new("coffee"),
                name: "Coffee".to_owned(),
                description: "Specialty roast".to_owned(),
                price: Price::from_minor_units(499),
                category: "drinks".to_owned(),
                allows_custom_amount: false,
            },
            Product {
                id: ProductId::new("book"),
                name: "Book".to_owned(),
                description: "Web programming guide".to_owned(),
                price: Price::from_minor_units(1999),
                category: "digital".to_owned(),
                allows_custom_amount: false,
            },
        ];
        Catalog::new(products).expect("valid catalog")
    }

    #[test]
    fn test_increment_merges_lines() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new("coffee"));
        cart.increment(ProductId::new("coffee"));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_increment_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new("coffee"));
        cart.increment(ProductId::new("book"));
        cart.increment(ProductId::new("coffee"));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["coffee", "book"]);
    }

    #[test]
    fn test_total_uses_current_prices() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new("coffee"));
        cart.increment(ProductId::new("coffee"));
        cart.increment(ProductId::new("book"));

        // 499 * 2 + 1999 * 1
        assert_eq!(cart.total(&catalog()).minor_units(), 2997);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut with_set = Cart::new();
        with_set.increment(ProductId::new("coffee"));
        with_set.increment(ProductId::new("book"));
        with_set.set_quantity(&ProductId::new("coffee"), 0);

        let mut with_remove = Cart::new();
        with_remove.increment(ProductId::new("coffee"));
        with_remove.increment(ProductId::new("book"));
        with_remove.remove(&ProductId::new("coffee"));

        assert_eq!(with_set, with_remove);
    }

    #[test]
    fn test_set_quantity_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new("coffee"));
        cart.set_quantity(&ProductId::new("book"), 5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id.as_str(), "coffee");
    }

    #[test]
    fn test_set_quantity_updates_in_place() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new("coffee"));
        cart.increment(ProductId::new("book"));
        cart.set_quantity(&ProductId::new("coffee"), 7);

        assert_eq!(cart.lines()[0].product_id.as_str(), "coffee");
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_remove_absent_is_silent() {
        let mut cart = Cart::new();
        assert!(!cart.remove(&ProductId::new("coffee")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_no_duplicates_or_zero_quantities_after_any_sequence() {
        let mut cart = Cart::new();
        let coffee = ProductId::new("coffee");
        let book = ProductId::new("book");

        cart.increment(coffee.clone());
        cart.increment(book.clone());
        cart.increment(coffee.clone());
        cart.set_quantity(&book, 3);
        cart.remove(&coffee);
        cart.increment(coffee.clone());
        cart.set_quantity(&coffee, 0);
        cart.increment(coffee.clone());

        let mut seen = std::collections::HashSet::new();
        for line in cart.lines() {
            assert!(line.quantity >= 1);
            assert!(seen.insert(line.product_id.clone()), "duplicate line");
        }
    }

    #[test]
    fn test_line_items_projection() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new("book"));
        cart.increment(ProductId::new("book"));

        let items = cart.line_items(&catalog());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Book");
        assert_eq!(items[0].unit_amount.minor_units(), 1999);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_clear_and_counts() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new("coffee"));
        cart.increment(ProductId::new("coffee"));
        cart.increment(ProductId::new("book"));
        assert_eq!(cart.item_count(), 3);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(&catalog()), Price::ZERO);
    }

    #[test]
    fn test_serde_roundtrip_preserves_order() {
        let mut cart = Cart::new();
        cart.increment(ProductId::new("book"));
        cart.increment(ProductId::new("coffee"));

        let json = serde_json::to_string(&cart).expect("serialize");
        let restored: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, cart);
    }
}
