//! Extraction strategies for the offer-listing surface.
//!
//! Each strategy is a pure function over a parsed document: it yields
//! `(display text, seller id, absolute url)` candidates and nothing else, so
//! strategies can be unit-tested against fixture documents. The engine runs
//! all of them and accumulates — a layout may expose some sellers via one
//! strategy and others via another on the same page.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::selectors::SelectorCatalog;
use crate::text::rendered_text;

/// Query parameters that carry a seller identifier.
const SELLER_ID_PARAMS: &[&str] = &["seller", "m"];

/// Path of the seller-profile route.
const SELLER_PROFILE_ROUTE: &str = "/sp";

/// Label variants that precede or wrap a seller link.
const SOLD_BY_LABELS: &[&str] = &[
    "sold by",
    "ships from and sold by",
    "dispatched from and sold by",
];

/// A seller link candidate before dedup. Both fields are guaranteed
/// non-empty by the producing strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub display_text: String,
    pub seller_id: String,
    pub source_url: String,
}

/// Anchors addressed directly to the seller-profile route: seller links
/// within recognized offer items, plus the product-page buybox seller link.
pub(crate) fn storefront_links(
    doc: &Html,
    catalog: &SelectorCatalog,
    base: &Url,
) -> Vec<Candidate> {
    let mut found = Vec::new();

    for item_locator in catalog.offer_items {
        let Ok(item_selector) = Selector::parse(item_locator) else {
            continue;
        };
        for item in doc.select(&item_selector) {
            for link_locator in catalog.offer_seller_links {
                let Ok(link_selector) = Selector::parse(link_locator) else {
                    continue;
                };
                for anchor in item.select(&link_selector) {
                    push_profile_route_candidate(anchor, base, &mut found);
                }
            }
        }
    }

    for locator in catalog.primary_seller_link {
        let Ok(selector) = Selector::parse(locator) else {
            continue;
        };
        for anchor in doc.select(&selector) {
            push_profile_route_candidate(anchor, base, &mut found);
        }
    }

    found
}

fn push_profile_route_candidate(anchor: ElementRef<'_>, base: &Url, out: &mut Vec<Candidate>) {
    let Some(href) = anchor.value().attr("href") else {
        return;
    };
    let Ok(resolved) = base.join(href) else {
        return;
    };
    if resolved.path() != SELLER_PROFILE_ROUTE {
        return;
    }
    let Some(seller_id) = seller_id_from_query(&resolved) else {
        return;
    };
    if let Some(found) = candidate(anchor, seller_id, resolved) {
        out.push(found);
    }
}

/// Any anchor whose href carries a seller-identifier query parameter,
/// regardless of route or position.
pub(crate) fn seller_param_links(doc: &Html, base: &Url) -> Vec<Candidate> {
    anchors(doc)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let resolved = base.join(href).ok()?;
            let seller_id = seller_id_from_query(&resolved)?;
            candidate(anchor, seller_id, resolved)
        })
        .collect()
}

/// Anchors wrapped by or immediately following a "Sold by"-equivalent label.
///
/// The label lives in the anchor's enclosing element, so the parent's
/// rendered text is inspected. The seller id may come from a query parameter
/// or a `/seller/{id}` path segment.
pub(crate) fn label_proximity_links(doc: &Html, base: &Url) -> Vec<Candidate> {
    anchors(doc)
        .filter_map(|anchor| {
            let parent = anchor.parent().and_then(ElementRef::wrap)?;
            let context = rendered_text(parent).to_lowercase();
            if !SOLD_BY_LABELS.iter().any(|label| context.contains(label)) {
                return None;
            }
            let href = anchor.value().attr("href")?;
            let resolved = base.join(href).ok()?;
            let seller_id =
                seller_id_from_query(&resolved).or_else(|| seller_id_from_path(&resolved))?;
            candidate(anchor, seller_id, resolved)
        })
        .collect()
}

fn candidate(anchor: ElementRef<'_>, seller_id: String, resolved: Url) -> Option<Candidate> {
    let display_text = anchor_text(anchor);
    if display_text.is_empty() || seller_id.is_empty() {
        return None;
    }
    Some(Candidate {
        display_text,
        seller_id,
        source_url: resolved.to_string(),
    })
}

fn anchors(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    let selector = Selector::parse("a[href]").expect("valid selector");
    doc.select(&selector).collect::<Vec<_>>().into_iter()
}

/// The anchor's text with whitespace collapsed.
fn anchor_text(anchor: ElementRef<'_>) -> String {
    anchor
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Seller identifier from a recognized query parameter.
pub(crate) fn seller_id_from_query(url: &Url) -> Option<String> {
    url.query_pairs().find_map(|(key, value)| {
        if SELLER_ID_PARAMS.contains(&key.as_ref()) && !value.is_empty() {
            Some(value.into_owned())
        } else {
            None
        }
    })
}

/// Seller identifier from a `/seller/{id}` path segment.
pub(crate) fn seller_id_from_path(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    while let Some(segment) = segments.next() {
        if segment == "seller" {
            return segments
                .next()
                .filter(|id| !id.is_empty())
                .map(str::to_owned);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.amazon.de/").expect("valid base url")
    }

    fn catalog() -> SelectorCatalog {
        SelectorCatalog::default()
    }

    fn offer_item(link: &str) -> String {
        format!(r#"<div id="aod-offer"><div id="aod-offer-soldBy">{link}</div></div>"#)
    }

    // -----------------------------------------------------------------------
    // seller id extraction
    // -----------------------------------------------------------------------

    #[test]
    fn seller_id_from_seller_param() {
        let url = Url::parse("https://www.amazon.de/sp?ie=UTF8&seller=A2XYZSELLER").unwrap();
        assert_eq!(seller_id_from_query(&url).as_deref(), Some("A2XYZSELLER"));
    }

    #[test]
    fn seller_id_from_merchant_param() {
        let url = Url::parse("https://www.amazon.de/gp/offer-listing/B00X?m=A3MERCHANT7").unwrap();
        assert_eq!(seller_id_from_query(&url).as_deref(), Some("A3MERCHANT7"));
    }

    #[test]
    fn empty_seller_param_yields_none() {
        let url = Url::parse("https://www.amazon.de/sp?seller=").unwrap();
        assert_eq!(seller_id_from_query(&url), None);
    }

    #[test]
    fn seller_id_from_path_segment() {
        let url = Url::parse("https://www.amazon.de/shops/seller/A4PATHSELLER/about").unwrap();
        assert_eq!(seller_id_from_path(&url).as_deref(), Some("A4PATHSELLER"));
    }

    #[test]
    fn unrelated_url_yields_no_seller_id() {
        let url = Url::parse("https://www.amazon.de/dp/B00X?ref=nav").unwrap();
        assert_eq!(seller_id_from_query(&url), None);
        assert_eq!(seller_id_from_path(&url), None);
    }

    // -----------------------------------------------------------------------
    // storefront_links
    // -----------------------------------------------------------------------

    #[test]
    fn storefront_links_find_seller_links_within_offer_items() {
        let html = offer_item(
            r#"Sold by <a href="/sp?ie=UTF8&seller=A2XYZSELLER&asin=B00X">Gadget Haus</a>"#,
        );
        let doc = Html::parse_document(&html);
        let found = storefront_links(&doc, &catalog(), &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_text, "Gadget Haus");
        assert_eq!(found[0].seller_id, "A2XYZSELLER");
        assert!(found[0].source_url.starts_with("https://www.amazon.de/sp?"));
    }

    #[test]
    fn storefront_links_find_the_buybox_seller_link() {
        let doc = Html::parse_document(
            r#"<a id="sellerProfileTriggerId" href="/sp?seller=A7BUYBOX77">Brightstore</a>"#,
        );
        let found = storefront_links(&doc, &catalog(), &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].seller_id, "A7BUYBOX77");
    }

    #[test]
    fn storefront_links_ignore_links_off_the_profile_route() {
        let html = offer_item(r#"<a href="/gp/aag/main?seller=A3ELSEWHERE">Elsewhere</a>"#);
        let doc = Html::parse_document(&html);
        assert!(storefront_links(&doc, &catalog(), &base()).is_empty());
    }

    #[test]
    fn storefront_links_ignore_profile_route_without_seller_param() {
        let html = offer_item(r#"<a href="/sp?ie=UTF8">Somebody</a>"#);
        let doc = Html::parse_document(&html);
        assert!(storefront_links(&doc, &catalog(), &base()).is_empty());
    }

    #[test]
    fn storefront_links_reject_empty_anchor_text() {
        let html = offer_item(r#"<a href="/sp?seller=A2XYZSELLER"><img src="x.png"></a>"#);
        let doc = Html::parse_document(&html);
        assert!(storefront_links(&doc, &catalog(), &base()).is_empty());
    }

    // -----------------------------------------------------------------------
    // seller_param_links
    // -----------------------------------------------------------------------

    #[test]
    fn seller_param_links_match_any_route() {
        let doc = Html::parse_document(
            r#"<a href="/gp/aag/main?ie=UTF8&seller=A3THIRD33">Third Trader</a>"#,
        );
        let found = seller_param_links(&doc, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].seller_id, "A3THIRD33");
    }

    #[test]
    fn seller_param_links_resolve_absolute_hrefs() {
        let doc = Html::parse_document(
            r#"<a href="https://www.amazon.de/sp?seller=A2XYZSELLER">Gadget Haus</a>"#,
        );
        let found = seller_param_links(&doc, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].source_url,
            "https://www.amazon.de/sp?seller=A2XYZSELLER"
        );
    }

    // -----------------------------------------------------------------------
    // label_proximity_links
    // -----------------------------------------------------------------------

    #[test]
    fn label_proximity_requires_sold_by_context() {
        let doc = Html::parse_document(
            r#"<div>Sold by <a href="/shops/seller/A4PATHSELLER">Vier Handel</a></div>
               <div>Related <a href="/shops/seller/A5OTHER55">Other Shop</a></div>"#,
        );
        let found = label_proximity_links(&doc, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].seller_id, "A4PATHSELLER");
        assert_eq!(found[0].display_text, "Vier Handel");
    }

    #[test]
    fn label_proximity_accepts_dispatched_variant() {
        let doc = Html::parse_document(
            r#"<div>Dispatched from and sold by <a href="/gp/aag/main?seller=A6DISPATCH">Brightstore</a>.</div>"#,
        );
        let found = label_proximity_links(&doc, &base());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].seller_id, "A6DISPATCH");
    }

    #[test]
    fn label_proximity_ignores_links_without_extractable_id() {
        let doc = Html::parse_document(r#"<div>Sold by <a href="/dp/B00X">Someone</a></div>"#);
        assert!(label_proximity_links(&doc, &base()).is_empty());
    }
}
