// Document predicates built from query criteria
use crate::criteria::Criteria;
use crate::document::{Document, DESCRIPTION_FIELD, TYPE_FIELD};
use crate::vocabulary::price_synonyms;
use crate::{Error, Result};
use regex::Regex;
use serde_json::{json, Value};

pub trait Filter {
    fn matches(&self, document: &Document) -> bool;
}

/// Case-insensitive "contains any of these terms" matcher.
///
/// Terms are literal text; regex metacharacters in them carry no meaning.
#[derive(Debug, Clone)]
pub struct TermPattern {
    terms: Vec<String>,
    source: String,
    regex: Regex,
}

impl TermPattern {
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!("(?i){}", alternation))
            .map_err(|e| Error::InvalidPattern(e.to_string()))?;
        Ok(Self {
            terms,
            source: alternation,
            regex,
        })
    }

    /// Whether `text` contains at least one term. A pattern without terms
    /// matches nothing.
    pub fn is_match(&self, text: &str) -> bool {
        !self.terms.is_empty() && self.regex.is_match(text)
    }

    /// The alternation without flags, as sent with `$options: "i"`
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for TermPattern {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    Equals { field: String, value: Value },
    ContainsAny { field: String, pattern: TermPattern },
    And(Vec<FilterCondition>),
}

impl FilterCondition {
    fn matches(&self, document: &Document) -> bool {
        match self {
            FilterCondition::Equals { field, value } => {
                document.get(field).map(|v| v == value).unwrap_or(false)
            }
            FilterCondition::ContainsAny { field, pattern } => document
                .get_str(field)
                .map(|text| pattern.is_match(text))
                .unwrap_or(false),
            FilterCondition::And(conditions) => conditions.iter().all(|c| c.matches(document)),
        }
    }

    /// Store-style JSON rendering, used for logging
    pub fn to_json(&self) -> Value {
        match self {
            FilterCondition::Equals { field, value } => {
                let mut fields = serde_json::Map::new();
                fields.insert(field.clone(), value.clone());
                Value::Object(fields)
            }
            FilterCondition::ContainsAny { field, pattern } => {
                let mut fields = serde_json::Map::new();
                fields.insert(
                    field.clone(),
                    json!({ "$regex": pattern.as_str(), "$options": "i" }),
                );
                Value::Object(fields)
            }
            FilterCondition::And(conditions) => {
                let mut merged = serde_json::Map::new();
                for condition in conditions {
                    if let Value::Object(fields) = condition.to_json() {
                        merged.extend(fields);
                    }
                }
                Value::Object(merged)
            }
        }
    }
}

/// Predicate a catalog is queried with
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    condition: FilterCondition,
}

impl ProductFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    /// Filter that accepts every document
    pub fn match_all() -> Self {
        Self::new(FilterCondition::And(Vec::new()))
    }

    /// Build the predicate for a criteria record.
    ///
    /// Price synonyms only join the description match when ingredient terms
    /// are present, and they widen it (OR) instead of narrowing it. A price
    /// range on its own does not filter anything.
    pub fn from_criteria(criteria: &Criteria) -> Result<Self> {
        let mut conditions = Vec::new();

        if let Some(product_type) = &criteria.product_type {
            conditions.push(FilterCondition::Equals {
                field: TYPE_FIELD.to_string(),
                value: Value::String(product_type.clone()),
            });
        }

        if let Some(ingredients) = criteria.ingredients() {
            let mut terms: Vec<String> = ingredients.iter().cloned().collect();
            // TODO: apply the price tier on its own once catalog entries carry a price field
            if let Some(range) = criteria.price_range {
                terms.extend(price_synonyms(range).iter().map(|s| s.to_string()));
            }
            conditions.push(FilterCondition::ContainsAny {
                field: DESCRIPTION_FIELD.to_string(),
                pattern: TermPattern::new(terms)?,
            });
        }

        Ok(Self::new(FilterCondition::And(conditions)))
    }

    pub fn to_json(&self) -> Value {
        self.condition.to_json()
    }
}

impl Filter for ProductFilter {
    fn matches(&self, document: &Document) -> bool {
        self.condition.matches(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::PriceRange;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        let filter = ProductFilter::from_criteria(&Criteria::new()).unwrap();
        assert_eq!(filter, ProductFilter::match_all());
        assert!(filter.matches(&doc(json!({}))));
        assert!(filter.matches(&doc(json!({"type": "other", "description": "x"}))));
        assert_eq!(filter.to_json(), json!({}));
    }

    #[test]
    fn test_product_type_requires_exact_type() {
        let filter =
            ProductFilter::from_criteria(&Criteria::new().with_product_type("product")).unwrap();
        assert!(filter.matches(&doc(json!({"type": "product"}))));
        assert!(!filter.matches(&doc(json!({"type": "Product"}))));
        assert!(!filter.matches(&doc(json!({"description": "product"}))));
    }

    #[test]
    fn test_ingredients_match_any_case_insensitive() {
        let criteria = Criteria::new().with_ingredients(["glycerin", "ceramides"]);
        let filter = ProductFilter::from_criteria(&criteria).unwrap();
        assert!(filter.matches(&doc(json!({"description": "Rich in CERAMIDES"}))));
        assert!(filter.matches(&doc(json!({"description": "with glycerin"}))));
        assert!(!filter.matches(&doc(json!({"description": "plain water"}))));
        assert!(!filter.matches(&doc(json!({"product_name": "glycerin soap"}))));
    }

    #[test]
    fn test_price_alone_has_no_effect() {
        let criteria = Criteria::new().with_price_range(PriceRange::Premium);
        let filter = ProductFilter::from_criteria(&criteria).unwrap();
        assert_eq!(filter, ProductFilter::match_all());
        assert!(filter.matches(&doc(json!({"description": "bargain bin"}))));
    }

    #[test]
    fn test_price_widens_ingredient_match() {
        let criteria = Criteria::new()
            .with_ingredients(["aloe"])
            .with_price_range(PriceRange::Affordable);
        let filter = ProductFilter::from_criteria(&criteria).unwrap();
        assert!(filter.matches(&doc(json!({"description": "Only $5, very cheap"}))));
        assert!(filter.matches(&doc(json!({"description": "below $20 and gentle"}))));
        assert!(filter.matches(&doc(json!({"description": "aloe gel"}))));
        assert!(!filter.matches(&doc(json!({"description": "luxury serum"}))));
    }

    #[test]
    fn test_dollar_sign_is_literal() {
        let pattern = TermPattern::new(["above $20"]).unwrap();
        assert!(pattern.is_match("priced above $20"));
        assert!(!pattern.is_match("priced above 20"));
    }

    #[test]
    fn test_regex_metacharacters_in_terms_are_literal() {
        let pattern = TermPattern::new(["vitamin c (10%)"]).unwrap();
        assert!(pattern.is_match("Serum with Vitamin C (10%)"));
        assert!(!pattern.is_match("vitamin c 10%"));
    }

    #[test]
    fn test_to_json_rendering() {
        let criteria = Criteria::new()
            .with_product_type("product")
            .with_ingredients(["aloe"])
            .with_price_range(PriceRange::Affordable);
        let filter = ProductFilter::from_criteria(&criteria).unwrap();
        assert_eq!(
            filter.to_json(),
            json!({
                "type": "product",
                "description": {"$regex": r"aloe|affordable|cheap|below \$20", "$options": "i"}
            })
        );
    }
}
