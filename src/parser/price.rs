use std::sync::OnceLock;

use regex::Regex;

/// Collapse runs of whitespace and trim. Returns `None` for an empty result.
pub fn clean_text(raw: &str) -> Option<String> {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Strip currency markers and thousands separators from a plain amount.
///
/// `"NT$ 12,990"` becomes `"12990"`. Text that is not a plain amount
/// (`"12,990起"`, `"價格洽詢"`) is returned trimmed but otherwise untouched.
pub fn normalize_price(raw: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(?:NT\$|NT|\$|＄)?\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*元?$").unwrap()
    });

    let text = clean_text(raw)?;
    match re.captures(&text) {
        Some(caps) => Some(caps[1].replace(',', "")),
        None => Some(text),
    }
}

/// Find an `NT$ 1,234` style amount anywhere in free text.
pub fn find_nt_price(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"NT\$?\s*([0-9][0-9,]*)").unwrap());
    re.captures(text).map(|caps| caps[1].replace(',', ""))
}
