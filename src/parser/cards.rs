use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use super::price::{clean_text, find_nt_price, normalize_price};
use crate::product::Product;

const CARD_SELECTOR: &str = "li[data-index], li.goodsItemLi, li[class*=prd], li[class*=goodsItem]";
const TITLE_SELECTOR: &str = "h3, p.prdName, p[class*=name], div[class*=name]";
const TITLE_LINK_SELECTOR: &str = "a[title]";
const PRICE_SELECTOR: &str = "span.price, span[class*=price], em[class*=price], b[class*=price]";

/// Attributes that may carry the card's tracking JSON, in lookup order.
const METADATA_ATTRS: [&str; 3] = ["data-ec", "ec-data", "data-gtm"];

struct Selectors {
    card: Selector,
    title: Selector,
    title_link: Selector,
    price: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| Selectors {
        card: Selector::parse(CARD_SELECTOR).unwrap(),
        title: Selector::parse(TITLE_SELECTOR).unwrap(),
        title_link: Selector::parse(TITLE_LINK_SELECTOR).unwrap(),
        price: Selector::parse(PRICE_SELECTOR).unwrap(),
    })
}

/// Extract one product per listing card, in document order.
/// Cards without both a title and a price are skipped.
pub fn extract(document: &Html) -> Vec<Product> {
    let sel = selectors();
    document
        .select(&sel.card)
        .filter_map(|card| {
            let title = card_title(card, sel)?;
            let price = card_price(card, sel)?;
            Some(Product {
                title,
                price,
                category: card_category(card),
            })
        })
        .collect()
}

fn element_text(el: ElementRef) -> Option<String> {
    clean_text(&el.text().collect::<String>())
}

fn card_title(card: ElementRef, sel: &Selectors) -> Option<String> {
    if let Some(node) = card.select(&sel.title).next() {
        return element_text(node);
    }
    let link = card.select(&sel.title_link).next()?;
    element_text(link).or_else(|| link.value().attr("title").and_then(clean_text))
}

fn card_price(card: ElementRef, sel: &Selectors) -> Option<String> {
    match card.select(&sel.price).next() {
        Some(node) => normalize_price(&node.text().collect::<String>()),
        None => find_nt_price(&card.text().collect::<String>()),
    }
}

fn card_category(card: ElementRef) -> Option<String> {
    let raw = METADATA_ATTRS
        .iter()
        .find_map(|attr| card.value().attr(attr))?;
    let meta: Value = serde_json::from_str(raw).ok()?;
    ["cateLevel2Name", "cateLevel1Name"]
        .iter()
        .filter_map(|key| meta.get(key).and_then(Value::as_str))
        .find_map(clean_text)
}
