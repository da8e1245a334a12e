//! Output formatting for item records (table, JSON, markdown).

use crate::config::OutputFormat;
use crate::ebay::{CurrencyAmounts, ItemRecord, Quantity, Shipping};

/// Formats records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single record.
    pub fn format_record(&self, record: &ItemRecord) -> String {
        match self.format {
            OutputFormat::Json => self.json(record, "{}"),
            OutputFormat::Table => self.table_single(record),
            OutputFormat::Markdown => self.markdown_single(record),
        }
    }

    /// Formats multiple records.
    pub fn format_records(&self, records: &[ItemRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No items scraped.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json(records, "[]"),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
        }
    }

    // JSON formatting

    fn json<T: serde::Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
    }

    // Table formatting

    fn table_single(&self, record: &ItemRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Title:     {}", record.name.as_deref().map(str::trim).unwrap_or("N/A")));
        lines.push(format!("URL:       {}", record.url));
        lines.push(format!("Price:     {}", amounts_str(&record.prices)));

        if let Some(condition) = &record.condition {
            lines.push(format!("Condition: {}", condition.trim()));
        }

        if let Some(seller) = &record.seller_name {
            match &record.seller_url {
                Some(url) => lines.push(format!("Seller:    {} ({})", seller.trim(), url)),
                None => lines.push(format!("Seller:    {}", seller.trim())),
            }
        }

        lines.push(format!("Quantity:  {}", quantity_str(record.quantity.as_ref())));
        lines.push(format!("Shipping:  {}", shipping_str(record.shipping.as_ref())));

        if let Some(options) = record.options.as_ref().filter(|o| !o.is_empty()) {
            lines.push(format!("Options:   {}", options.join(", ")));
        }

        if let Some(images) = &record.images {
            lines.push(format!("Images:    {}", images.len()));
        }

        lines.join("\n")
    }

    fn table_records(&self, records: &[ItemRecord]) -> String {
        let price_width = 20;
        let qty_width = 8;
        let ship_width = 14;
        let title_width = 50;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<price_width$}  {:<qty_width$}  {:<ship_width$}  {}",
            "Price", "Qty", "Shipping", "Title"
        ));
        lines.push(format!(
            "{:-<price_width$}  {:-<qty_width$}  {:-<ship_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        // Rows
        for record in records {
            let price_str = match record.primary_price() {
                Some((label, amount)) => format!("{} {:.2}", label, amount),
                None => "N/A".to_string(),
            };

            let ship_str = match &record.shipping {
                Some(Shipping::Costs(costs)) => match costs.iter().next() {
                    Some((label, amount)) => format!("{} {:.2}", label, amount),
                    None => "N/A".to_string(),
                },
                Some(Shipping::NotShipped) | None => "N/A".to_string(),
            };

            let title = truncate(record.name.as_deref().unwrap_or("N/A").trim(), title_width);

            lines.push(format!(
                "{:<price_width$}  {:<qty_width$}  {:<ship_width$}  {}",
                price_str,
                quantity_str(record.quantity.as_ref()),
                ship_str,
                title
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} items", records.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, record: &ItemRecord) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", record.name.as_deref().map(str::trim).unwrap_or("Untitled item")));
        lines.push(String::new());

        lines.push(format!("- **URL:** [View on eBay]({})", record.url));
        lines.push(format!("- **Price:** {}", amounts_str(&record.prices)));

        if let Some(condition) = &record.condition {
            lines.push(format!("- **Condition:** {}", condition.trim()));
        }

        if let Some(seller) = &record.seller_name {
            match &record.seller_url {
                Some(url) => lines.push(format!("- **Seller:** [{}]({})", seller.trim(), url)),
                None => lines.push(format!("- **Seller:** {}", seller.trim())),
            }
        }

        lines.push(format!("- **Quantity:** {}", quantity_str(record.quantity.as_ref())));
        lines.push(format!("- **Shipping:** {}", shipping_str(record.shipping.as_ref())));

        if let Some(options) = record.options.as_ref().filter(|o| !o.is_empty()) {
            lines.push(format!("- **Options:** {}", options.join(", ")));
        }

        if let Some(image) = record.images.as_ref().and_then(|i| i.first()) {
            lines.push(String::new());
            lines.push(format!("![image]({})", image));
        }

        lines.join("\n")
    }

    fn markdown_records(&self, records: &[ItemRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Price | Qty | Shipping | Title |".to_string());
        lines.push("|-------|-----|----------|-------|".to_string());

        for record in records {
            let title = truncate(record.name.as_deref().unwrap_or("Untitled").trim(), 40);

            lines.push(format!(
                "| {} | {} | {} | [{}]({}) |",
                amounts_str(&record.prices),
                quantity_str(record.quantity.as_ref()),
                shipping_str(record.shipping.as_ref()),
                title,
                record.url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} items scraped*", records.len()));

        lines.join("\n")
    }
}

/// "US 45.00 / EUR 41.50", or "N/A" when empty.
fn amounts_str(amounts: &CurrencyAmounts) -> String {
    if amounts.is_empty() {
        return "N/A".to_string();
    }

    amounts
        .iter()
        .map(|(label, amount)| format!("{} {:.2}", label, amount))
        .collect::<Vec<_>>()
        .join(" / ")
}

fn quantity_str(quantity: Option<&Quantity>) -> String {
    match quantity {
        Some(Quantity::LastOne) => "Last one".to_string(),
        Some(Quantity::Count(n)) => format!("{}", n),
        None => "N/A".to_string(),
    }
}

fn shipping_str(shipping: Option<&Shipping>) -> String {
    match shipping {
        Some(Shipping::NotShipped) => "Not shipped".to_string(),
        Some(Shipping::Costs(costs)) => amounts_str(costs),
        None => "N/A".to_string(),
    }
}

/// Cuts `s` to at most `width` characters, ending in "..." when shortened.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        format!("{}...", s.chars().take(width.saturating_sub(3)).collect::<String>())
    } else {
        s.to_string()
    }
}
