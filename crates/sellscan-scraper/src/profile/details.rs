//! Line-oriented parsing of the "Detailed Seller Information" block.
//!
//! The block's rendered text degrades to "label: value" lines whose markup
//! varies by locale and over time, so parsing the rendered lines is the most
//! layout-resilient approach. Address labels open a multi-line value that
//! runs until the next labelled line or a terminator phrase.

/// Lowercase labels whose single-line value is copied verbatim.
const BUSINESS_NAME: &str = "business name";
const BUSINESS_TYPE: &str = "business type";
const TRADE_REGISTER_NUMBER: &str = "trade register number";
const VAT_NUMBER: &str = "vat number";
const PHONE_NUMBER: &str = "phone number";
const EMAIL: &str = "email";

/// Lowercase labels that open a multi-line address value.
const BUSINESS_ADDRESS: &str = "business address";
const CUSTOMER_SERVICES_ADDRESS: &str = "customer services address";

/// Phrases that terminate a multi-line address value ("This seller has…",
/// "This seller is committed to…", and similar boilerplate).
const ADDRESS_TERMINATORS: &[&str] = &["this seller"];

/// Fields parsed out of the detailed seller information block.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct DetailFields {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub trade_register_number: Option<String>,
    pub vat_number: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub business_address: Option<String>,
    pub customer_service_address: Option<String>,
}

/// Parse the block's visible lines as label:value pairs, splitting on the
/// first colon. Unrecognized labels are skipped; every field is independently
/// optional.
pub(crate) fn parse_detail_lines(lines: &[String]) -> DetailFields {
    let mut fields = DetailFields::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;
        if line.is_empty() {
            continue;
        }

        let (label, value) = match line.split_once(':') {
            Some((label, value)) => (label.trim().to_lowercase(), value.trim().to_string()),
            None => (line.to_lowercase(), String::new()),
        };

        if value.is_empty()
            && (label == BUSINESS_ADDRESS || label == CUSTOMER_SERVICES_ADDRESS)
        {
            // Multi-line value: collect until the next labelled line or a
            // terminator phrase, leaving that line for the outer loop.
            let mut parts = Vec::new();
            while i < lines.len() {
                let next = lines[i].trim();
                if next.contains(':') || is_address_terminator(next) {
                    break;
                }
                if !next.is_empty() {
                    parts.push(next.to_string());
                }
                i += 1;
            }
            if !parts.is_empty() {
                let collected = parts.join(", ");
                if label == BUSINESS_ADDRESS {
                    fields.business_address = Some(collected);
                } else {
                    fields.customer_service_address = Some(collected);
                }
            }
            continue;
        }

        if value.is_empty() {
            continue;
        }
        match label.as_str() {
            BUSINESS_NAME => fields.business_name = Some(value),
            BUSINESS_TYPE => fields.business_type = Some(value),
            TRADE_REGISTER_NUMBER => fields.trade_register_number = Some(value),
            VAT_NUMBER => fields.vat_number = Some(value),
            PHONE_NUMBER => fields.phone_number = Some(value),
            EMAIL => fields.email = Some(value),
            _ => {}
        }
    }

    fields
}

fn is_address_terminator(line: &str) -> bool {
    let line = line.to_lowercase();
    ADDRESS_TERMINATORS
        .iter()
        .any(|terminator| line.contains(terminator))
}
