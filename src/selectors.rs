//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for anchor elements with hrefs.
pub static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Selector for images with a source.
pub static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img[src]").expect("valid img selector"));

/// Selector for metadata tags with name/property attributes.
pub static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name], meta[property]").expect("valid metadata selector"));

/// Selector for `<link rel="canonical">`.
pub static CANONICAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("link[rel=\"canonical\"][href]").expect("valid canonical selector")
});

/// Selector for iframes with a source.
pub static IFRAME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("iframe[src]").expect("valid iframe selector"));

/// Selector for elements carrying a `data-url` attribute.
pub static DATA_URL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[data-url]").expect("valid data-url selector"));
