//! Offer discovery: every distinct seller visible on a product's
//! offer-listing surface.
//!
//! Extraction strategies run in priority order (storefront links,
//! seller-parameter links, label proximity) and accumulate into one
//! candidate list; candidates are deduplicated by seller id, keeping the
//! first occurrence. Unrecoverable conditions (navigation failure,
//! not-found page, bot challenge) yield an empty result, never an error.

mod strategies;

use std::collections::HashSet;
use std::time::Duration;

use scraper::Html;
use url::Url;

use crate::page::BrowserPage;
use crate::selectors::SelectorCatalog;
use crate::types::{DiscoveryStrategy, ProductMarketplaceTarget, SellerReference, Timing};

use strategies::{label_proximity_links, seller_param_links, storefront_links, Candidate};

/// Title fragments of terminal negative pages (lowercase).
const NEGATIVE_TITLE_MARKERS: &[&str] = &[
    "page not found",
    "document not found",
    "looking for something?",
    "sorry! something went wrong",
    "404",
];

/// URL fragments of terminal negative pages.
const NEGATIVE_URL_MARKERS: &[&str] = &["/errors/", "/404"];

/// Discover every distinct seller offering the target product.
///
/// Never fails: any unrecoverable condition for this (product, marketplace)
/// unit resolves to an empty sequence and a log line, and the caller moves
/// on. Running twice against an unchanged page yields the same seller ids
/// in the same order.
pub async fn discover_sellers(
    page: &dyn BrowserPage,
    target: &ProductMarketplaceTarget,
    catalog: &SelectorCatalog,
    timing: &Timing,
) -> Vec<SellerReference> {
    let url = target.offer_listing_url();

    if let Err(e) = page.navigate(&url, timing.nav_timeout).await {
        tracing::warn!(
            product_id = %target.product_id,
            marketplace = %target.marketplace.code,
            error = %e,
            "offer listing navigation failed"
        );
        return Vec::new();
    }

    let title = page.title().await.unwrap_or_default();
    let current_url = page.current_url().await.unwrap_or_default();
    if is_terminal_page(&title, &current_url) {
        tracing::info!(
            product_id = %target.product_id,
            marketplace = %target.marketplace.code,
            title,
            "offer listing is a terminal negative page"
        );
        return Vec::new();
    }

    // Bot challenge: skip this unit entirely. Retrying within the run is
    // deliberately not attempted.
    let captcha = SelectorCatalog::combined(catalog.captcha_form);
    if page
        .wait_for(&captcha, Duration::ZERO)
        .await
        .unwrap_or(false)
    {
        tracing::warn!(
            product_id = %target.product_id,
            marketplace = %target.marketplace.code,
            "bot challenge page encountered — skipping unit"
        );
        return Vec::new();
    }

    // Some layouts render sellers without any recognized offer container, so
    // a missing container is not fatal: fall back to a fixed delay and
    // extract anyway.
    let containers = SelectorCatalog::combined(catalog.offer_containers);
    let container_found = page
        .wait_for(&containers, timing.element_wait)
        .await
        .unwrap_or(false);
    if !container_found {
        let ingress = SelectorCatalog::combined(catalog.other_sellers_ingress);
        let ingress_present = page
            .wait_for(&ingress, Duration::ZERO)
            .await
            .unwrap_or(false);
        tracing::debug!(
            product_id = %target.product_id,
            marketplace = %target.marketplace.code,
            ingress_present,
            "no offer container detected — extracting after fallback delay"
        );
        tokio::time::sleep(timing.settle_delay).await;
    }

    let html = match page.content().await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(
                product_id = %target.product_id,
                marketplace = %target.marketplace.code,
                error = %e,
                "could not read offer listing content"
            );
            return Vec::new();
        }
    };

    let base = match Url::parse(&format!("https://{}/", target.marketplace.domain)) {
        Ok(base) => base,
        Err(e) => {
            tracing::warn!(
                marketplace = %target.marketplace.code,
                error = %e,
                "marketplace domain does not form a valid base url"
            );
            return Vec::new();
        }
    };

    let sellers = extract_sellers(&html, catalog, &base);
    tracing::info!(
        product_id = %target.product_id,
        marketplace = %target.marketplace.code,
        count = sellers.len(),
        "discovered sellers"
    );
    sellers
}

/// Run all extraction strategies over the rendered document and dedup by
/// seller id, keeping the first occurrence (strategy priority, then DOM
/// order).
fn extract_sellers(html: &str, catalog: &SelectorCatalog, base: &Url) -> Vec<SellerReference> {
    let doc = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut sellers = Vec::new();

    // Strategy 1: direct storefront links on the seller-profile route.
    accumulate(
        &mut seen,
        &mut sellers,
        DiscoveryStrategy::StorefrontLink,
        storefront_links(&doc, catalog, base),
    );

    // Strategy 2: any link carrying a seller-identifier parameter.
    accumulate(
        &mut seen,
        &mut sellers,
        DiscoveryStrategy::SellerParam,
        seller_param_links(&doc, base),
    );

    // Strategy 3: anchors in "Sold by" label proximity.
    accumulate(
        &mut seen,
        &mut sellers,
        DiscoveryStrategy::LabelProximity,
        label_proximity_links(&doc, base),
    );

    sellers
}

fn accumulate(
    seen: &mut HashSet<String>,
    sellers: &mut Vec<SellerReference>,
    strategy: DiscoveryStrategy,
    found: Vec<Candidate>,
) {
    let mut added = 0usize;
    for candidate in found {
        if seen.insert(candidate.seller_id.clone()) {
            sellers.push(SellerReference {
                display_text: candidate.display_text,
                seller_id: candidate.seller_id,
                source_url: candidate.source_url,
                strategy,
            });
            added += 1;
        }
    }
    tracing::debug!(strategy = %strategy, added, "extraction strategy finished");
}

fn is_terminal_page(title: &str, url: &str) -> bool {
    let title = title.to_lowercase();
    if NEGATIVE_TITLE_MARKERS
        .iter()
        .any(|marker| title.contains(marker))
    {
        return true;
    }
    let url = url.to_lowercase();
    NEGATIVE_URL_MARKERS
        .iter()
        .any(|marker| url.contains(marker))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
