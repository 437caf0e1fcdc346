//! Seller discovery and business-registration extraction for marketplace
//! product listings.
//!
//! The pipeline walks one browser page through offer listings and seller
//! profiles: [`discover_sellers`] locates every third-party merchant offering
//! a product, [`extract_profile`] parses a merchant's public registration
//! block, and [`orchestrator::run`] drives the product × marketplace matrix
//! with cross-marketplace deduplication.

pub mod discovery;
pub mod error;
pub mod identity;
pub mod orchestrator;
pub mod page;
pub mod profile;
pub mod selectors;
pub mod sink;
mod text;
pub mod types;

pub use discovery::discover_sellers;
pub use error::PageError;
pub use identity::{is_first_party_seller, normalize_seller_key};
pub use orchestrator::{run, RunOptions, RunReport};
pub use page::{BrowserPage, WebDriverPage};
pub use profile::extract_profile;
pub use selectors::SelectorCatalog;
pub use sink::{JsonlSink, RecordSink, SinkError};
pub use types::{
    DiscoveryStrategy, ProductMarketplaceTarget, SellerProfile, SellerRecord, SellerReference,
    Timing,
};
