//! The built-in tutorial catalog.
//!
//! Six sample products covering the shapes the demo cares about: plain
//! items, a couple of categories, and one custom-amount donation.

use corner_shop_core::{Catalog, Price, Product, ProductId};

/// Build the static tutorial catalog.
///
/// Prices are in euro cents. The product set is fixed at process start;
/// ids are unique by construction, so the `expect` cannot fire.
#[must_use]
pub fn tutorial_catalog() -> Catalog {
    let products = vec![
        Product {
            id: ProductId::new("prod_tutorial_coffee"),
            name: "Premium Coffee".to_owned(),
            description: "Specialty coffee, small-batch roasted".to_owned(),
            price: Price::from_minor_units(499),
            category: "drinks".to_owned(),
            allows_custom_amount: false,
        },
        Product {
            id: ProductId::new("prod_tutorial_book"),
            name: "Digital Book".to_owned(),
            description: "Complete guide to web programming".to_owned(),
            price: Price::from_minor_units(1999),
            category: "digital".to_owned(),
            allows_custom_amount: false,
        },
        Product {
            id: ProductId::new("prod_tutorial_course"),
            name: "Online Course".to_owned(),
            description: "Full access to the JavaScript course".to_owned(),
            price: Price::from_minor_units(4999),
            category: "courses".to_owned(),
            allows_custom_amount: false,
        },
        Product {
            id: ProductId::new("prod_tutorial_tshirt"),
            name: "Dev T-Shirt".to_owned(),
            description: "\"Hello World\" limited edition tee".to_owned(),
            price: Price::from_minor_units(2499),
            category: "merch".to_owned(),
            allows_custom_amount: false,
        },
        Product {
            id: ProductId::new("prod_tutorial_sticker"),
            name: "Sticker Pack".to_owned(),
            description: "Pack of 10 stickers for developers".to_owned(),
            price: Price::from_minor_units(999),
            category: "merch".to_owned(),
            allows_custom_amount: false,
        },
        Product {
            id: ProductId::new("prod_tutorial_donation"),
            name: "Donation".to_owned(),
            description: "Support the project".to_owned(),
            price: Price::from_minor_units(100),
            category: "donation".to_owned(),
            allows_custom_amount: true,
        },
    ];

    Catalog::new(products).expect("tutorial catalog ids are unique")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorial_catalog_contents() {
        let catalog = tutorial_catalog();
        assert_eq!(catalog.len(), 6);

        let coffee = catalog
            .get(&ProductId::new("prod_tutorial_coffee"))
            .expect("coffee");
        assert_eq!(coffee.price.minor_units(), 499);

        let donation = catalog
            .get(&ProductId::new("prod_tutorial_donation"))
            .expect("donation");
        assert!(donation.allows_custom_amount);
    }
}
