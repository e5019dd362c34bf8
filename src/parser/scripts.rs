use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::price::{clean_text, normalize_price};
use crate::product::Product;

/// Pull products out of inline `<script>` data such as
/// `{goodsName:"...", ..., price:"12,990"}` or its quoted-key JSON form.
/// The price key may be any lowercase `...price` key (`saleprice`), taking the first after the name.
pub fn extract(document: &Html) -> Vec<Product> {
    static SCRIPT: OnceLock<Selector> = OnceLock::new();
    static RE: OnceLock<Regex> = OnceLock::new();
    let script = SCRIPT.get_or_init(|| Selector::parse("script").unwrap());
    let re = RE.get_or_init(|| {
        Regex::new(
            r#"goodsName"?\s*:\s*(?:"((?:[^"\\]|\\.)*)"|([^,"{}\s][^,"{}]*))[^{}]*?price"?\s*:?\s*"?([0-9][0-9,]*(?:\.[0-9]+)?)"#,
        )
        .unwrap()
    });

    let mut products = Vec::new();
    for node in document.select(script) {
        let text = node.text().collect::<String>();
        for caps in re.captures_iter(&text) {
            let Some(raw_title) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            let Some(title) = clean_text(&unescape(raw_title.as_str())) else {
                continue;
            };
            let Some(price) = normalize_price(&caps[3]) else {
                continue;
            };
            products.push(Product {
                title,
                price,
                category: None,
            });
        }
    }
    products
}

/// Decode JS string escapes (`\"`, `\u6a5f`). Falls back to the raw text.
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).unwrap_or_else(|_| raw.to_string())
}
