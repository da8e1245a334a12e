//! Integration tests for the item page parser using fixture files.

use ebay_crawler::ebay::parser::Parser;
use ebay_crawler::{Quantity, Shipping};
use serde_json::json;

const ITEM_FIXTURE: &str = include_str!("fixtures/item_page.html");
const NOT_SHIPPED_FIXTURE: &str = include_str!("fixtures/not_shipped_page.html");

const ITEM_URL: &str = "https://www.ebay.co.uk/itm/374871820791?hash=item57481a09f7";

#[test]
fn test_parse_item_page() {
    let parser = Parser::new().with_strict(true);
    let record = parser.extract(ITEM_FIXTURE, ITEM_URL).unwrap();

    assert_eq!(record.url, ITEM_URL);
    assert_eq!(record.name.as_deref(), Some("Nikon F3 35mm SLR Film Camera Body - Tested"));
    assert_eq!(record.condition.as_deref(), Some("Used"));

    // Primary and converted price
    assert_eq!(record.prices.len(), 2);
    assert_eq!(record.prices.get("GBP"), Some(1249.99));
    assert_eq!(record.prices.get("US"), Some(1587.31));

    // Duplicate and zoom-less carousel images are dropped
    let images = record.images.as_ref().unwrap();
    assert_eq!(images.len(), 2);
    assert!(images.contains(&"https://i.ebayimg.com/images/g/abc/s-l1600.jpg".to_string()));
    assert!(images.contains(&"https://i.ebayimg.com/images/g/def/s-l1600.jpg".to_string()));

    assert_eq!(record.seller_name.as_deref(), Some("filmcamerahub"));
    assert_eq!(record.seller_url.as_deref(), Some("https://www.ebay.co.uk/str/filmcamerahub"));

    assert_eq!(
        record.options,
        Some(vec![
            "Body only".to_string(),
            "With 50mm f/1.4".to_string(),
            "With 35mm f/2".to_string(),
        ])
    );

    assert_eq!(record.quantity, Some(Quantity::Count(4.0)));

    let Some(Shipping::Costs(costs)) = &record.shipping else {
        panic!("expected shipping costs, got {:?}", record.shipping);
    };
    assert_eq!(costs.len(), 2);
    assert_eq!(costs.get("GBP"), Some(25.0));
    assert_eq!(costs.get("US"), Some(31.75));
}

#[test]
fn test_item_page_serialized_keys() {
    let record = Parser::new().extract(ITEM_FIXTURE, ITEM_URL).unwrap();
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["url"], ITEM_URL);
    assert_eq!(value["price_GBP"], json!(1249.99));
    assert_eq!(value["price_US"], json!(1587.31));
    assert_eq!(value["quantity_available"], json!(4.0));
    assert_eq!(value["ship_price_GBP"], json!(25.0));
    assert_eq!(value["ship_price_US"], json!(31.75));
    assert!(value.get("ship_price").is_none());
}

#[test]
fn test_parse_not_shipped_page() {
    let record = Parser::new().with_strict(true).extract(NOT_SHIPPED_FIXTURE, ITEM_URL).unwrap();

    assert_eq!(record.name.as_deref(), Some("Vintage Leica M3 Rangefinder"));
    assert_eq!(record.prices.get("US"), Some(2450.0));
    assert_eq!(record.quantity, Some(Quantity::LastOne));
    assert_eq!(record.shipping, Some(Shipping::NotShipped));

    let value = serde_json::to_value(&record).unwrap();
    let obj = value.as_object().unwrap();

    assert_eq!(obj["ship_price"], json!("N/A"));
    assert_eq!(obj["quantity_available"], json!(1));
    assert!(!obj.keys().any(|k| k.starts_with("ship_price_")));

    // Fields without a matching node are absent, not null
    for key in ["condition", "img", "seller_name", "seller_url", "options"] {
        assert!(!obj.contains_key(key), "unexpected key {}", key);
    }
}
