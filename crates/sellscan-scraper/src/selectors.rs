//! DOM locator catalog for the known storefront layout variants.
//!
//! Pure data: each role lists alternative locators in the order they should
//! be tried, so the extraction code stays free of hardcoded query strings.
//! The offer-listing surface has shipped in at least three shapes (the
//! classic `/gp/offer-listing` page, the "all offers display" side panel,
//! and the product-page buybox), and the catalog carries locators for all
//! of them.

/// Named DOM locators grouped by logical role.
#[derive(Debug, Clone)]
pub struct SelectorCatalog {
    /// Seller link in the product-page buybox.
    pub primary_seller_link: &'static [&'static str],
    /// Entry points into the "other sellers" surface.
    pub other_sellers_ingress: &'static [&'static str],
    /// Containers enumerating offers.
    pub offer_containers: &'static [&'static str],
    /// One offer row/card within a container.
    pub offer_items: &'static [&'static str],
    /// Seller links within an offer item.
    pub offer_seller_links: &'static [&'static str],
    /// Top-level heading of a seller profile page.
    pub profile_heading: &'static [&'static str],
    /// Elements that may carry the "Detailed Seller Information" heading.
    pub detailed_info_heading: &'static [&'static str],
    /// Class names identifying the content block enclosing the detailed
    /// seller information heading.
    pub detail_container_classes: &'static [&'static str],
    /// The anti-bot challenge form.
    pub captcha_form: &'static [&'static str],
}

impl Default for SelectorCatalog {
    fn default() -> Self {
        Self {
            primary_seller_link: &["#sellerProfileTriggerId", "#merchant-info a"],
            other_sellers_ingress: &["#aod-ingress-link", "a[href*='/gp/offer-listing/']"],
            offer_containers: &[
                "#aod-offer-list",
                "#olpOfferList",
                "#all-offers-display",
                ".olp-offer-list",
            ],
            offer_items: &["#aod-offer", "div[id^='aod-offer']", ".olpOffer"],
            offer_seller_links: &[
                "#aod-offer-soldBy a",
                ".olpSellerName a",
                "a[href*='seller=']",
            ],
            profile_heading: &["h1#sellerName", "h1"],
            detailed_info_heading: &["h1", "h2", "h3", "span.a-text-bold"],
            detail_container_classes: &["a-box", "a-section", "a-spacing-top-large"],
            captcha_form: &["form[action*='validateCaptcha']"],
        }
    }
}

impl SelectorCatalog {
    /// Join a role's alternatives into one CSS selector list for a single
    /// query/wait round trip.
    #[must_use]
    pub fn combined(locators: &[&str]) -> String {
        locators.join(", ")
    }
}
