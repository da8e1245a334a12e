//! Data model for a scraped eBay item listing.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Ordered `(currency label, amount)` pairs read from a page.
///
/// Labels come from the page text ("US", "$", "EUR"), so they form
/// dynamic keys like `price_US` once serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyAmounts(Vec<(String, f64)>);

impl CurrencyAmounts {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an amount under `label`, replacing an earlier amount with the same label.
    pub fn insert(&mut self, label: impl Into<String>, amount: f64) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = amount,
            None => self.0.push((label, amount)),
        }
    }

    /// Returns the amount stored for `label`.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, a)| (l.as_str(), *a))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Units available for purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    /// The page reports a single remaining unit ("Last one").
    LastOne,
    /// Parsed count from the availability text.
    Count(f64),
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::LastOne => serializer.serialize_u8(1),
            Quantity::Count(n) => serializer.serialize_f64(*n),
        }
    }
}

/// Shipping cost information.
#[derive(Debug, Clone, PartialEq)]
pub enum Shipping {
    /// The seller does not ship to the requesting location.
    NotShipped,
    /// One amount per currency shown (primary and approximate).
    Costs(CurrencyAmounts),
}

/// Literal stored under `ship_price` when the item is not shipped.
pub const NOT_SHIPPED: &str = "N/A";

/// One extracted item listing.
///
/// Fields whose source node was missing stay `None` and are left out of
/// the serialized record entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// The URL the page was fetched from, as given.
    pub url: String,
    /// Listing title
    pub name: Option<String>,
    /// Primary and approximate (converted) prices
    pub prices: CurrencyAmounts,
    /// Item condition text
    pub condition: Option<String>,
    /// Distinct zoom image URLs from the carousel
    pub images: Option<Vec<String>>,
    /// Seller display name
    pub seller_name: Option<String>,
    /// Link to the seller's page
    pub seller_url: Option<String>,
    /// Variant labels
    pub options: Option<Vec<String>>,
    /// Available quantity
    pub quantity: Option<Quantity>,
    /// Shipping cost
    pub shipping: Option<Shipping>,
}

impl ItemRecord {
    /// Creates a record with only the source URL set.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            prices: CurrencyAmounts::new(),
            condition: None,
            images: None,
            seller_name: None,
            seller_url: None,
            options: None,
            quantity: None,
            shipping: None,
        }
    }

    /// Returns the first (primary) price and its label.
    pub fn primary_price(&self) -> Option<(&str, f64)> {
        self.prices.iter().next()
    }

    /// Returns true if the listing states it cannot be shipped.
    pub fn is_not_shipped(&self) -> bool {
        matches!(self.shipping, Some(Shipping::NotShipped))
    }
}

impl Serialize for ItemRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("url", &self.url)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        for (label, amount) in self.prices.iter() {
            map.serialize_entry(&format!("price_{}", label), &amount)?;
        }
        if let Some(condition) = &self.condition {
            map.serialize_entry("condition", condition)?;
        }
        if let Some(images) = &self.images {
            map.serialize_entry("img", images)?;
        }
        if let Some(seller_name) = &self.seller_name {
            map.serialize_entry("seller_name", seller_name)?;
        }
        if let Some(seller_url) = &self.seller_url {
            map.serialize_entry("seller_url", seller_url)?;
        }
        if let Some(options) = &self.options {
            map.serialize_entry("options", options)?;
        }
        if let Some(quantity) = &self.quantity {
            map.serialize_entry("quantity_available", quantity)?;
        }
        match &self.shipping {
            Some(Shipping::NotShipped) => map.serialize_entry("ship_price", NOT_SHIPPED)?,
            Some(Shipping::Costs(costs)) => {
                for (label, amount) in costs.iter() {
                    map.serialize_entry(&format!("ship_price_{}", label), &amount)?;
                }
            }
            None => {}
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn make_test_record() -> ItemRecord {
        let mut record = ItemRecord::new("https://www.ebay.com/itm/123");
        record.name = Some("Vintage Camera".to_string());
        record.prices.insert("US", 45.0);
        record.prices.insert("EUR", 41.5);
        record.images = Some(vec!["a.jpg".to_string()]);
        record.quantity = Some(Quantity::Count(3.0));
        record
    }

    #[test]
    fn test_currency_amounts_insert_replaces_label() {
        let mut amounts = CurrencyAmounts::new();
        amounts.insert("US", 10.0);
        amounts.insert("EUR", 9.0);
        amounts.insert("US", 12.0);

        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts.get("US"), Some(12.0));
        assert_eq!(amounts.iter().next(), Some(("US", 12.0)));
    }

    #[test]
    fn test_record_new_is_bare() {
        let record = ItemRecord::new("https://example.com/itm/1");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({ "url": "https://example.com/itm/1" }));
    }

    #[test]
    fn test_record_dynamic_price_keys() {
        let value = serde_json::to_value(make_test_record()).unwrap();
        assert_eq!(value["price_US"], json!(45.0));
        assert_eq!(value["price_EUR"], json!(41.5));
        assert!(value.get("price").is_none());
    }

    #[test]
    fn test_record_omits_missing_fields() {
        let value = serde_json::to_value(make_test_record()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("condition"));
        assert!(!obj.contains_key("seller_name"));
        assert!(!obj.contains_key("seller_url"));
        assert!(!obj.contains_key("options"));
        assert!(!obj.contains_key("ship_price"));
        assert!(obj.values().all(|v| !v.is_null()));
    }

    #[test]
    fn test_quantity_last_one_serializes_as_integer() {
        let mut record = ItemRecord::new("u");
        record.quantity = Some(Quantity::LastOne);
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains("\"quantity_available\":1}"));
    }

    #[test]
    fn test_not_shipped_serialization() {
        let mut record = ItemRecord::new("u");
        record.shipping = Some(Shipping::NotShipped);
        assert!(record.is_not_shipped());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["ship_price"], json!("N/A"));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert!(!keys.iter().any(|k| k.starts_with("ship_price_")));
    }

    #[test]
    fn test_shipping_costs_serialization() {
        let mut costs = CurrencyAmounts::new();
        costs.insert("US", 12.99);
        costs.insert("EUR", 11.5);
        let mut record = ItemRecord::new("u");
        record.shipping = Some(Shipping::Costs(costs));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["ship_price_US"], json!(12.99));
        assert_eq!(value["ship_price_EUR"], json!(11.5));
        assert_eq!(value.get("ship_price"), None::<&Value>);
    }

    #[test]
    fn test_primary_price() {
        let record = make_test_record();
        assert_eq!(record.primary_price(), Some(("US", 45.0)));
        assert_eq!(ItemRecord::new("u").primary_price(), None);
    }
}
