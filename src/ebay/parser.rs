//! HTML extraction for eBay item pages.

use crate::ebay::error::ExtractError;
use crate::ebay::models::{CurrencyAmounts, ItemRecord, Quantity, Shipping};
use crate::ebay::selectors::item;
use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::{debug, trace, warn};

/// Phrases in the first shipping run meaning the item is not shipped.
const NOT_SHIPPED_PHRASES: [&str; 4] = ["not ship", "don't ship", "don\u{2019}t ship", "doesn't ship"];

/// Fields read from an item page, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    Condition,
    Images,
    SellerName,
    SellerUrl,
    Options,
    Quantity,
    Shipping,
}

impl Field {
    /// Every field, in the order they appear in a record.
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Price,
        Field::Condition,
        Field::Images,
        Field::SellerName,
        Field::SellerUrl,
        Field::Options,
        Field::Quantity,
        Field::Shipping,
    ];

    /// Record key (or key prefix for currency-keyed fields).
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Condition => "condition",
            Field::Images => "img",
            Field::SellerName => "seller_name",
            Field::SellerUrl => "seller_url",
            Field::Options => "options",
            Field::Quantity => "quantity_available",
            Field::Shipping => "ship_price",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Parser for eBay item pages.
///
/// In lenient mode (the default) a field that cannot be normalized is
/// logged and left out of the record. In strict mode the first such
/// field fails the whole extraction.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    strict: bool,
}

impl Parser {
    /// Creates a lenient parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether field errors abort extraction.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Extracts an item record from page markup.
    ///
    /// `url` is stored verbatim as the record's source.
    pub fn extract(&self, html: &str, url: &str) -> Result<ItemRecord> {
        let document = Html::parse_document(html);
        let mut record = ItemRecord::new(url);

        for field in Field::ALL {
            match self.extract_field(field, &document, &mut record) {
                Ok(()) => trace!("Extracted {}", field),
                Err(e) if self.strict => {
                    return Err(e)
                        .with_context(|| format!("Failed to extract {} from {}", field, url));
                }
                Err(e) => warn!("Skipping {} for {}: {}", field, url, e),
            }
        }

        debug!(
            "Extracted item {:?} ({} prices, {} images)",
            record.name.as_deref().unwrap_or("<untitled>"),
            record.prices.len(),
            record.images.as_ref().map_or(0, Vec::len)
        );

        Ok(record)
    }

    /// Fills one field of `record`. Missing nodes leave the field unset.
    fn extract_field(
        &self,
        field: Field,
        document: &Html,
        record: &mut ItemRecord,
    ) -> Result<(), ExtractError> {
        match field {
            Field::Name => record.name = select_text(document, &item::TITLE),
            Field::Price => record.prices = self.parse_prices(document)?,
            Field::Condition => record.condition = select_text(document, &item::CONDITION),
            Field::Images => record.images = self.parse_images(document),
            Field::SellerName => record.seller_name = select_text(document, &item::SELLER_NAME),
            Field::SellerUrl => {
                if let Some(link) = document.select(&item::SELLER_LINK).next() {
                    let href = link
                        .value()
                        .attr("href")
                        .ok_or(ExtractError::MissingAttribute { attr: "href" })?;
                    record.seller_url = Some(href.to_string());
                }
            }
            Field::Options => {
                record.options =
                    document.select(&item::OPTIONS_SELECT).next().map(|s| self.parse_options(s));
            }
            Field::Quantity => {
                if let Some(text) = select_text(document, &item::QUANTITY) {
                    record.quantity = Some(self.parse_quantity(&text)?);
                }
            }
            Field::Shipping => record.shipping = self.parse_shipping(document)?,
        }

        Ok(())
    }

    /// Reads the primary and approximate prices, keyed by their leading label.
    fn parse_prices(&self, document: &Html) -> Result<CurrencyAmounts, ExtractError> {
        let mut prices = CurrencyAmounts::new();

        for selector in [&item::PRICE_PRIMARY, &item::PRICE_APPROX] {
            let Some(element) = document.select(selector).next() else {
                continue;
            };
            let (label, amount) = self.parse_labeled_price(&element_text(element))?;
            prices.insert(label, amount);
        }

        Ok(prices)
    }

    /// Splits "US $45.00" into ("US", 45.0).
    fn parse_labeled_price(&self, text: &str) -> Result<(String, f64), ExtractError> {
        let mut tokens = text.split_whitespace();
        let label =
            tokens.next().ok_or_else(|| ExtractError::MissingLabel { text: text.to_string() })?;
        let rest = tokens.collect::<Vec<_>>().join(" ");

        Ok((label.to_string(), parse_number(&rest)?))
    }

    /// Collects distinct zoom image URLs, first occurrence wins.
    ///
    /// Returns `None` when the carousel has no images at all.
    fn parse_images(&self, document: &Html) -> Option<Vec<String>> {
        let nodes: Vec<ElementRef> = document.select(&item::IMAGES).collect();
        if nodes.is_empty() {
            return None;
        }

        let mut images: Vec<String> = Vec::new();
        for src in nodes.iter().filter_map(|e| e.value().attr(item::IMAGE_ZOOM_ATTR)) {
            if !images.iter().any(|seen| seen == src) {
                images.push(src.to_string());
            }
        }

        Some(images)
    }

    /// Lists variant labels, skipping the "- Select -" placeholder.
    fn parse_options(&self, select: ElementRef) -> Vec<String> {
        select
            .select(&item::OPTION)
            .filter(|option| option.value().attr("value") != Some(item::OPTION_SENTINEL))
            .map(|option| element_text(option).trim().to_string())
            .collect()
    }

    /// Parses availability text like "3 available" or "Last one".
    fn parse_quantity(&self, text: &str) -> Result<Quantity, ExtractError> {
        if text.to_lowercase().contains("last one") {
            return Ok(Quantity::LastOne);
        }

        parse_number(text).map(Quantity::Count)
    }

    /// Reads up to two shipping runs such as "US $12.99" and "(approx EUR 11.50)".
    fn parse_shipping(&self, document: &Html) -> Result<Option<Shipping>, ExtractError> {
        let Some(block) = document.select(&item::SHIPPING).next() else {
            return Ok(None);
        };

        let runs: Vec<String> = block.select(&item::SHIPPING_SPAN).take(2).map(element_text).collect();

        let Some(first) = runs.first() else {
            return Ok(None);
        };

        let first = first.to_lowercase();
        if NOT_SHIPPED_PHRASES.iter().any(|phrase| first.contains(phrase)) {
            return Ok(Some(Shipping::NotShipped));
        }

        let mut costs = CurrencyAmounts::new();
        for text in &runs {
            let cleaned = text.replace(['(', ')'], "").replace("approx", "");
            let mut tokens = cleaned.split_whitespace();

            let label =
                tokens.next().ok_or_else(|| ExtractError::MissingLabel { text: text.clone() })?;
            let amount =
                tokens.next().ok_or_else(|| ExtractError::MissingAmount { text: text.clone() })?;

            costs.insert(label, parse_number(amount)?);
        }

        Ok(Some(Shipping::Costs(costs)))
    }
}

/// Parses a number out of display text.
///
/// Keeps digits, `.` and `,`, drops every `,` as a thousands separator,
/// and parses what is left: `"$1,234.50 USD"` gives `1234.5`.
pub fn parse_number(text: &str) -> Result<f64, ExtractError> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect::<String>()
        .replace(',', "");

    cleaned.parse().map_err(|_| ExtractError::NotANumber { text: text.to_string() })
}

/// All descendant text of an element, concatenated.
fn element_text(element: ElementRef) -> String {
    element.text().collect()
}

/// Text of the first element matching `selector`.
fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}
