//! CSS selectors for eBay item pages.
//!
//! All selectors used for extracting listing fields live here.
//! Update this file when eBay changes their item page markup.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the item ("/itm/") page.
pub mod item {
    use super::*;

    /// Listing title.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h1.x-item-title__mainTitle span").unwrap());

    /// Displayed price in the seller's currency.
    pub static PRICE_PRIMARY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.x-price-primary span").unwrap());

    /// Converted price shown for foreign-currency listings.
    pub static PRICE_APPROX: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.x-price-approx__price span").unwrap());

    /// Condition text ("New", "Used", ...).
    pub static CONDITION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.x-item-condition-text div span.clipped").unwrap());

    /// Carousel images.
    pub static IMAGES: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.ux-image-carousel img").unwrap());

    /// Full-size image attribute on carousel images.
    pub const IMAGE_ZOOM_ATTR: &str = "data-zoom-src";

    /// Seller display name.
    pub static SELLER_NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.x-sellercard-atf__info__about-seller span").unwrap());

    /// Seller store link.
    pub static SELLER_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.x-sellercard-atf__info__about-seller a").unwrap());

    /// Variant drop-down.
    pub static OPTIONS_SELECT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("select.x-msku__select-box").unwrap());

    /// Entries inside the variant drop-down.
    pub static OPTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("option").unwrap());

    /// Value of the "- Select -" placeholder entry.
    pub const OPTION_SENTINEL: &str = "-1";

    /// Availability text ("3 available", "Last one").
    pub static QUANTITY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.d-quantity__availability.evo span").unwrap());

    /// Shipping value block.
    pub static SHIPPING: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "div.vim.d-shipping-minview \
             div.ux-labels-values__values-content div",
        )
        .unwrap()
    });

    /// Text runs inside the shipping value block.
    pub static SHIPPING_SPAN: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span").unwrap());
}
