//! Seller profile extraction: display name, aggregate rating statistics,
//! and the detailed business-registration block.
//!
//! Every extraction step has a defined "absent" value; a profile page
//! missing any section still produces a valid (partial) profile. Only a
//! failed page visit produces the error-indicator profile.

mod details;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::page::BrowserPage;
use crate::selectors::SelectorCatalog;
use crate::text::{rendered_lines, rendered_text};
use crate::types::{SellerProfile, Timing};

use details::parse_detail_lines;

/// Heading text that marks the business-registration block (lowercase).
const DETAILED_INFO_HEADING: &str = "detailed seller information";

/// Visit one seller profile page and parse it.
///
/// Never fails: a navigation or read failure yields the error-indicator
/// profile, which callers treat as "no data available" rather than aborting
/// the run.
pub async fn extract_profile(
    page: &dyn BrowserPage,
    profile_url: &str,
    catalog: &SelectorCatalog,
    timing: &Timing,
) -> SellerProfile {
    if let Err(e) = page.navigate(profile_url, timing.nav_timeout).await {
        tracing::warn!(profile_url, error = %e, "seller profile navigation failed");
        return SellerProfile::failed();
    }

    // Profile pages render parts of their content asynchronously.
    tokio::time::sleep(timing.settle_delay).await;

    let html = match page.content().await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(profile_url, error = %e, "could not read seller profile content");
            return SellerProfile::failed();
        }
    };

    let profile = parse_profile_document(&html, catalog);
    tracing::debug!(
        profile_url,
        has_detailed_info = profile.has_detailed_info,
        display_name = profile.seller_display_name.as_deref().unwrap_or(""),
        "seller profile extracted"
    );
    profile
}

/// Parse a rendered profile document. Pure; exercised directly by tests.
pub(crate) fn parse_profile_document(html: &str, catalog: &SelectorCatalog) -> SellerProfile {
    let doc = Html::parse_document(html);
    let mut profile = SellerProfile::default();

    profile.seller_display_name = page_heading(&doc, catalog);

    let page_text = rendered_text(doc.root_element());
    profile.rating = parse_rating(&page_text);
    profile.positive_percent = parse_positive_percent(&page_text);
    profile.rating_count = parse_rating_count(&page_text);

    if let Some(block) = find_detail_block(&doc, catalog) {
        profile.has_detailed_info = true;
        let lines = rendered_lines(block);
        let fields = parse_detail_lines(&lines);
        profile.business_name = fields.business_name;
        profile.business_type = fields.business_type;
        profile.trade_register_number = fields.trade_register_number;
        profile.vat_number = fields.vat_number;
        profile.phone_number = fields.phone_number;
        profile.email = fields.email;
        profile.business_address = fields.business_address;
        profile.customer_service_address = fields.customer_service_address;
    }

    // The customer-service phone lives outside the detailed block on several
    // layouts, so it is scanned for independently. A phone number from the
    // detailed block takes precedence.
    if let Some(phone) = parse_customer_service_phone(&page_text) {
        if profile.phone_number.is_none() {
            profile.phone_number = Some(phone.clone());
        }
        profile.customer_service_phone = Some(phone);
    }

    profile
}

/// The page's top-level heading, used as the seller display name.
fn page_heading(doc: &Html, catalog: &SelectorCatalog) -> Option<String> {
    for locator in catalog.profile_heading {
        let Ok(selector) = Selector::parse(locator) else {
            continue;
        };
        if let Some(heading) = doc.select(&selector).next() {
            let text = collapse_text(heading);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Locate the content block enclosing the "Detailed Seller Information"
/// heading: the nearest ancestor with a known container class, else the
/// heading's grandparent element.
fn find_detail_block<'a>(doc: &'a Html, catalog: &SelectorCatalog) -> Option<ElementRef<'a>> {
    for locator in catalog.detailed_info_heading {
        let Ok(selector) = Selector::parse(locator) else {
            continue;
        };
        for heading in doc.select(&selector) {
            let text = collapse_text(heading).to_lowercase();
            if text.contains(DETAILED_INFO_HEADING) {
                return Some(enclosing_block(heading, catalog));
            }
        }
    }
    None
}

fn enclosing_block<'a>(heading: ElementRef<'a>, catalog: &SelectorCatalog) -> ElementRef<'a> {
    for ancestor in heading.ancestors().filter_map(ElementRef::wrap) {
        let Some(classes) = ancestor.value().attr("class") else {
            continue;
        };
        let known = classes
            .split_whitespace()
            .any(|class| catalog.detail_container_classes.contains(&class));
        if known {
            return ancestor;
        }
    }
    heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .nth(1)
        .unwrap_or(heading)
}

fn collapse_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_rating(text: &str) -> Option<f64> {
    let re = Regex::new(r"(\d(?:[.,]\d+)?) out of 5 stars").expect("valid regex");
    let captures = re.captures(text)?;
    captures[1].replace(',', ".").parse().ok()
}

fn parse_positive_percent(text: &str) -> Option<u8> {
    let re = Regex::new(r"(\d{1,3})%\s+positive").expect("valid regex");
    let captures = re.captures(text)?;
    captures[1].parse::<u8>().ok().filter(|p| *p <= 100)
}

fn parse_rating_count(text: &str) -> Option<u64> {
    let re = Regex::new(r"\((\d[\d,.]*)\s+(?:lifetime\s+)?ratings?\)").expect("valid regex");
    let captures = re.captures(text)?;
    let digits: String = captures[1].chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn parse_customer_service_phone(text: &str) -> Option<String> {
    let re = Regex::new(r"(?i)customer service phone:\s*(\+?[0-9][0-9 ()/\-]*[0-9])")
        .expect("valid regex");
    let captures = re.captures(text)?;
    Some(captures[1].trim().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
