//! Domain types for seller discovery and profile extraction.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sellscan_core::Marketplace;

/// One unit of work: a product on one regional storefront.
#[derive(Debug, Clone)]
pub struct ProductMarketplaceTarget {
    pub product_id: String,
    pub marketplace: Marketplace,
}

impl ProductMarketplaceTarget {
    #[must_use]
    pub fn new(product_id: impl Into<String>, marketplace: Marketplace) -> Self {
        Self {
            product_id: product_id.into(),
            marketplace,
        }
    }

    /// The offer-listing surface enumerating all merchants for the product.
    #[must_use]
    pub fn offer_listing_url(&self) -> String {
        format!(
            "https://{}/gp/offer-listing/{}?ie=UTF8&f_new=true",
            self.marketplace.domain, self.product_id
        )
    }

    /// A seller's profile page, synthesized from the seller id rather than
    /// taken from the discovered href so the URL format is uniform.
    #[must_use]
    pub fn seller_profile_url(&self, seller_id: &str) -> String {
        format!(
            "https://{}/sp?seller={}&asin={}",
            self.marketplace.domain, seller_id, self.product_id
        )
    }
}

/// Which extraction strategy produced a [`SellerReference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStrategy {
    /// Anchor addressed to the seller-profile route.
    StorefrontLink,
    /// Anchor whose href carries a seller-identifier query parameter.
    SellerParam,
    /// Anchor wrapped by or following a "Sold by"-equivalent label.
    LabelProximity,
}

impl std::fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryStrategy::StorefrontLink => write!(f, "storefront_link"),
            DiscoveryStrategy::SellerParam => write!(f, "seller_param"),
            DiscoveryStrategy::LabelProximity => write!(f, "label_proximity"),
        }
    }
}

/// A seller as discovered on an offer-listing surface.
///
/// `seller_id` is the platform-assigned identifier extracted from the link;
/// it is the dedup key within a marketplace. `display_text` is the anchor
/// text, used for first-party filtering and as a fallback display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerReference {
    pub display_text: String,
    pub seller_id: String,
    pub source_url: String,
    pub strategy: DiscoveryStrategy,
}

/// Parsed contents of one seller profile page.
///
/// Every data field is optional; absence is a valid terminal state, not an
/// error. `extraction_failed` marks a profile visit that could not be
/// completed at all (navigation failure), which callers treat as "no data
/// available".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerProfile {
    pub seller_display_name: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub trade_register_number: Option<String>,
    pub vat_number: Option<String>,
    pub phone_number: Option<String>,
    pub customer_service_phone: Option<String>,
    pub email: Option<String>,
    pub business_address: Option<String>,
    pub customer_service_address: Option<String>,
    /// Star rating on the 0–5 scale.
    pub rating: Option<f64>,
    /// Percentage of positive feedback, 0–100.
    pub positive_percent: Option<u8>,
    pub rating_count: Option<u64>,
    /// Whether a "Detailed Seller Information" block was present.
    pub has_detailed_info: bool,
    pub extraction_failed: bool,
}

impl SellerProfile {
    /// The error-indicator profile returned when a profile page could not be
    /// visited or read.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            extraction_failed: true,
            ..Self::default()
        }
    }
}

/// The output unit: one (product, marketplace, seller) triple.
///
/// Created once by the orchestrator, appended to the sink, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerRecord {
    pub product_id: String,
    pub marketplace_code: String,
    pub marketplace_domain: String,
    pub reference: SellerReference,
    pub profile: SellerProfile,
    /// Marketplace code on which this seller id was first emitted during
    /// the run.
    pub first_seen_on_marketplace: String,
    pub is_duplicate: bool,
    pub captured_at: DateTime<Utc>,
}

/// Timing knobs for navigation and extraction waits.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Upper bound for a single navigation.
    pub nav_timeout: Duration,
    /// Upper bound for waiting on an element locator.
    pub element_wait: Duration,
    /// Fixed delay allowing asynchronous page content to finish rendering.
    pub settle_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            nav_timeout: Duration::from_secs(30),
            element_wait: Duration::from_secs(5),
            settle_delay: Duration::from_millis(2000),
        }
    }
}
