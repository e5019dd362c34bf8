use serde::Serialize;

/// One listed item on a category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub title: String,
    pub price: String,
    /// Category name from the card's tracking metadata. Only used for keyword filtering.
    #[serde(skip)]
    pub category: Option<String>,
}

impl Product {
    /// Spaces and case are ignored on both sides.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = squash(keyword);
        let haystack = match &self.category {
            Some(category) => format!("{} {}", category, self.title),
            None => self.title.clone(),
        };
        squash(&haystack).contains(&needle)
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn filter_by_keyword(products: Vec<Product>, keyword: &str) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| p.matches_keyword(keyword))
        .collect()
}
