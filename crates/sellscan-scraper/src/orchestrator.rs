//! Drives the product × marketplace matrix through discovery and profile
//! extraction, with run-scoped cross-marketplace deduplication.
//!
//! Execution is strictly sequential in caller order: cross-marketplace
//! provenance ("first seen on") is only well-defined because marketplaces
//! are processed in a fixed order and the seen-map is consulted and updated
//! within a single step per seller. No failure at any level halts the run,
//! and nothing is ever retried.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use sellscan_core::Marketplace;

use crate::discovery::discover_sellers;
use crate::identity::{is_first_party_seller, normalize_seller_key};
use crate::page::BrowserPage;
use crate::profile::extract_profile;
use crate::selectors::SelectorCatalog;
use crate::sink::RecordSink;
use crate::types::{ProductMarketplaceTarget, SellerRecord, Timing};

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Drop sellers that resolve to the platform's own storefront.
    pub skip_first_party: bool,
    /// Pause between consecutive page visits and between marketplaces.
    pub delay_between_requests: Duration,
}

/// Run-scoped mutable state, passed explicitly so runs stay isolated.
#[derive(Default)]
struct RunContext {
    /// seller id → marketplace code it was first emitted on. The single
    /// source of truth for provenance.
    seen: HashMap<String, String>,
    records: Vec<SellerRecord>,
}

/// Human-facing run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub total_records: usize,
    pub distinct_sellers: usize,
    pub products_processed: usize,
    pub marketplaces_checked: usize,
    pub records_with_phone: usize,
    pub records_with_email: usize,
}

/// Process every (product, marketplace) pair in the given order and emit one
/// record per discovered seller.
///
/// Records are pushed to `sink` as they are produced and also retained for
/// the returned report. Sink failures are logged and do not stop the run.
pub async fn run(
    page: &dyn BrowserPage,
    product_ids: &[String],
    marketplaces: &[Marketplace],
    options: &RunOptions,
    catalog: &SelectorCatalog,
    timing: &Timing,
    sink: &mut dyn RecordSink,
) -> RunReport {
    let mut ctx = RunContext::default();

    for product_id in product_ids {
        for marketplace in marketplaces {
            let target = ProductMarketplaceTarget::new(product_id.clone(), marketplace.clone());
            process_target(page, &mut ctx, &target, options, catalog, timing, sink).await;

            // Pace before moving to the next marketplace, sellers or not.
            tokio::time::sleep(options.delay_between_requests).await;
        }
    }

    build_report(&ctx, product_ids.len(), marketplaces.len())
}

async fn process_target(
    page: &dyn BrowserPage,
    ctx: &mut RunContext,
    target: &ProductMarketplaceTarget,
    options: &RunOptions,
    catalog: &SelectorCatalog,
    timing: &Timing,
    sink: &mut dyn RecordSink,
) {
    let discovered = discover_sellers(page, target, catalog, timing).await;

    let sellers: Vec<_> = if options.skip_first_party {
        discovered
            .into_iter()
            .filter(|seller| {
                if is_first_party_seller(Some(&seller.display_text)) {
                    tracing::info!(
                        seller = %seller.display_text,
                        marketplace = %target.marketplace.code,
                        "skipping first-party seller"
                    );
                    false
                } else {
                    true
                }
            })
            .collect()
    } else {
        discovered
    };

    if sellers.is_empty() {
        return;
    }

    for reference in sellers {
        tokio::time::sleep(options.delay_between_requests).await;

        let profile_url = target.seller_profile_url(&reference.seller_id);
        let profile = extract_profile(page, &profile_url, catalog, timing).await;

        let key = normalize_seller_key(&reference.seller_id);
        let (is_duplicate, first_seen_on_marketplace) = match ctx.seen.get(&key) {
            Some(first) => (true, first.clone()),
            None => {
                ctx.seen.insert(key, target.marketplace.code.clone());
                (false, target.marketplace.code.clone())
            }
        };

        let record = SellerRecord {
            product_id: target.product_id.clone(),
            marketplace_code: target.marketplace.code.clone(),
            marketplace_domain: target.marketplace.domain.clone(),
            reference,
            profile,
            first_seen_on_marketplace,
            is_duplicate,
            captured_at: Utc::now(),
        };

        if let Err(e) = sink.append(&record) {
            tracing::warn!(
                seller_id = %record.reference.seller_id,
                error = %e,
                "failed to append record to sink"
            );
        }
        ctx.records.push(record);
    }
}

fn build_report(ctx: &RunContext, products: usize, marketplaces: usize) -> RunReport {
    RunReport {
        total_records: ctx.records.len(),
        distinct_sellers: ctx.seen.len(),
        products_processed: products,
        marketplaces_checked: marketplaces,
        records_with_phone: ctx
            .records
            .iter()
            .filter(|r| r.profile.phone_number.is_some())
            .count(),
        records_with_email: ctx
            .records
            .iter()
            .filter(|r| r.profile.email.is_some())
            .count(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
