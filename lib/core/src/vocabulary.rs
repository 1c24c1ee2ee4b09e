//! Closed vocabularies driving criteria extraction and price filtering.
//!
//! Entries are matched verbatim against lowercased query text, so an entry
//! containing upper-case letters (`SPF`) can never match.

use crate::criteria::PriceRange;

/// Tag stored in `product_type` for every recognized product noun
pub const PRODUCT_CATEGORY: &str = "product";

/// Product nouns that mark a query as asking about a product
pub const PRODUCT_WORDS: &[&str] = &["moisturizer", "cleanser", "sunscreen", "cream"];

/// Substrings that put a query in the affordable tier
pub const AFFORDABLE_KEYWORDS: &[&str] = &["affordable", "cheap"];

/// Substrings that put a query in the premium tier
pub const PREMIUM_KEYWORDS: &[&str] = &["premium", "expensive"];

/// Entity surface texts accepted as ingredients
pub const INGREDIENT_ENTITIES: &[&str] = &[
    "aloe vera",
    "hyaluronic acid",
    "SPF",
    "glycerin",
    "ceramides",
];

/// Single tokens accepted as ingredients
pub const INGREDIENT_KEYWORDS: &[&str] = &["aloe", "SPF", "hyaluronic", "glycerin", "ceramides"];

/// Terms OR-ed into the description match for a price tier
pub fn price_synonyms(range: PriceRange) -> &'static [&'static str] {
    match range {
        PriceRange::Affordable => &["affordable", "cheap", "below $20"],
        PriceRange::Premium => &["premium", "luxury", "above $20"],
    }
}

pub fn is_product_word(lowered: &str) -> bool {
    PRODUCT_WORDS.contains(&lowered)
}

pub fn is_ingredient_entity(lowered: &str) -> bool {
    INGREDIENT_ENTITIES.contains(&lowered)
}

pub fn is_ingredient_keyword(lowered: &str) -> bool {
    INGREDIENT_KEYWORDS.contains(&lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        assert!(is_product_word("cream"));
        assert!(!is_product_word("serum"));
        assert!(is_ingredient_entity("aloe vera"));
        assert!(is_ingredient_keyword("aloe"));
        assert!(!is_ingredient_keyword("vera"));
    }

    #[test]
    fn test_uppercase_entries_never_match_lowered_text() {
        assert!(!is_ingredient_keyword("spf"));
        assert!(!is_ingredient_entity("spf"));
    }

    #[test]
    fn test_price_synonyms() {
        assert_eq!(
            price_synonyms(PriceRange::Affordable),
            &["affordable", "cheap", "below $20"]
        );
        assert_eq!(
            price_synonyms(PriceRange::Premium),
            &["premium", "luxury", "above $20"]
        );
    }
}
