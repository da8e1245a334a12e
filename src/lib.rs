//! ebay-crawler - Stateless eBay item listing scraper
//!
//! Fetches item pages, extracts a flat record per listing,
//! and saves the results as JSON.

pub mod commands;
pub mod config;
pub mod ebay;
pub mod format;
pub mod store;

pub use config::Config;
pub use ebay::models::{CurrencyAmounts, ItemRecord, Quantity, Shipping};
