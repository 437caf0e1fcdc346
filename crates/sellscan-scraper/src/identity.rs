//! First-party seller detection and seller dedup keys.

/// Known display-name variants of the platform acting as merchant of record:
/// generic names plus one entry per marketplace locale. All lowercase.
const FIRST_PARTY_SELLER_NAMES: &[&str] = &[
    "amazon",
    "amazon.com",
    "amazon.com services llc",
    "amazon.co.uk",
    "amazon.de",
    "amazon.fr",
    "amazon.it",
    "amazon.es",
    "amazon eu s.\u{e0} r.l.",
    "amazon eu sarl",
    "amazon us",
    "amazon warehouse",
];

/// Whether `name` denotes the platform's own storefront rather than a third
/// party.
///
/// The name is trimmed and lowercased, then matched by substring in either
/// direction against the maintained first-party list: this tolerates both
/// abbreviated storefront names ("Amazon EU") and longer localized legal
/// names ("Amazon EU S.à r.l., Niederlassung Deutschland"). An absent or
/// empty name is treated as unknown, never first-party, so it is not
/// silently dropped.
#[must_use]
pub fn is_first_party_seller(name: Option<&str>) -> bool {
    let Some(name) = name else {
        return false;
    };
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    FIRST_PARTY_SELLER_NAMES
        .iter()
        .any(|known| normalized.contains(known) || known.contains(normalized.as_str()))
}

/// Dedup key for a seller.
///
/// The platform-assigned identifier is already stable across locales, so the
/// key is the identifier verbatim. No fuzzy matching: two distinct
/// identifiers are always distinct sellers even when display names collide.
#[must_use]
pub fn normalize_seller_key(seller_id: &str) -> String {
    seller_id.to_owned()
}
