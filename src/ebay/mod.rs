//! eBay-specific modules for HTTP fetching, parsing, and data models.

pub mod client;
pub mod error;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{EbayClient, ItemSource};
pub use error::ExtractError;
pub use models::{CurrencyAmounts, ItemRecord, Quantity, Shipping};
pub use parser::{Field, Parser};
