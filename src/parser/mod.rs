pub mod cards;
pub mod price;
pub mod scripts;

use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;
use tracing::debug;

use crate::error::ParseError;
use crate::product::Product;

/// Two strategies: listing cards first, inline script data only if no card matched.
pub fn extract_products(html: &str) -> Result<Vec<Product>, ParseError> {
    validate(html)?;
    let document = Html::parse_document(html);

    let products = cards::extract(&document);
    if !products.is_empty() {
        debug!("Extracted {} products from listing cards", products.len());
        return Ok(products);
    }

    let products = scripts::extract(&document);
    debug!("No listing cards matched, {} products from inline scripts", products.len());
    Ok(products)
}

/// html5ever accepts any input, so reject bodies that do not open with markup before parsing.
fn validate(html: &str) -> Result<(), ParseError> {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"^<[A-Za-z!?]").unwrap());

    let body = html.trim_start_matches('\u{feff}').trim_start();
    if body.trim_end().is_empty() {
        return Err(ParseError::Empty);
    }
    if !tag.is_match(body) {
        return Err(ParseError::NotHtml);
    }
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn category_page() {
        let products = extract_products(&fixture("category")).unwrap();
        let titles: Vec<&str> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Samsung Galaxy S24 Ultra 12G/256G",
                "Apple iPhone 16 Pro 256G",
                "Google Pixel 9 Pro 16G/128G",
                "Samsung Galaxy S24 Ultra 12G/256G",
                "ASUS Zenfone 11 Ultra 12G/256G",
            ]
        );
        let prices: Vec<&str> = products.iter().map(|p| p.price.as_str()).collect();
        assert_eq!(prices, ["36900", "36900", "32990", "35900", "24990"]);
        assert_eq!(products[0].category.as_deref(), Some("AI手機"));
        assert_eq!(products[4].category.as_deref(), Some("旗艦手機"));
    }

    #[test]
    fn deterministic() {
        let html = fixture("category");
        assert_eq!(extract_products(&html).unwrap(), extract_products(&html).unwrap());
    }

    #[test]
    fn script_fallback() {
        let products = extract_products(&fixture("script_only")).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Sony Xperia 1 VI");
        assert_eq!(products[0].price, "41900");
        assert_eq!(products[1].title, "OPPO Find X8");
        assert_eq!(products[1].price, "27990");
    }

    #[test]
    fn scripts_ignored_when_cards_match() {
        let html = r#"<html><body>
            <ul><li class="goodsItemLi"><h3>Card</h3><span class="price">100</span></li></ul>
            <script>var d = {goodsName:"Script",price:"200"};</script>
            </body></html>"#;
        let products = extract_products(html).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Card");
    }

    #[test]
    fn no_products_is_ok() {
        let products = extract_products(&fixture("empty_category")).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn empty_body_is_error() {
        assert_eq!(extract_products(""), Err(ParseError::Empty));
        assert_eq!(extract_products("  \n\t "), Err(ParseError::Empty));
    }

    #[test]
    fn non_html_is_error() {
        assert_eq!(
            extract_products(r#"{"error":"rate limited","price":"1 < 2"}"#),
            Err(ParseError::NotHtml)
        );
        assert_eq!(extract_products("Service Unavailable"), Err(ParseError::NotHtml));
    }

    #[test]
    fn markup_inside_json_is_error() {
        assert_eq!(
            extract_products(r#"{"error":"access denied","detail":"<b>blocked</b>"}"#),
            Err(ParseError::NotHtml)
        );
        assert_eq!(
            extract_products("Blocked by upstream: <html><body></body></html>"),
            Err(ParseError::NotHtml)
        );
    }

    #[test]
    fn leading_bom_and_whitespace_allowed() {
        let html = "\u{feff}\n  <!DOCTYPE html><html><body><p>none</p></body></html>";
        assert_eq!(extract_products(html), Ok(vec![]));
        assert_eq!(extract_products("\u{feff}  "), Err(ParseError::Empty));
    }
}
