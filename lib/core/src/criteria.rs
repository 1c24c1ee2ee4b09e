//! Structured criteria and the rule-based extractor that produces them
//! from free text.

use crate::parser::{LinguisticParser, RuleBasedParser};
use crate::vocabulary;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Affordable,
    Premium,
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceRange::Affordable => write!(f, "affordable"),
            PriceRange::Premium => write!(f, "premium"),
        }
    }
}

/// Filter criteria for one query. A `None` field leaves that dimension
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    /// Lowercase, duplicate-free and never empty when present
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_ingredients"
    )]
    ingredients: Option<BTreeSet<String>>,
}

impl Criteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    #[must_use]
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Set the ingredient terms; an empty iterator clears the dimension
    #[must_use]
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ingredients = ingredient_set(ingredients);
        self
    }

    pub fn ingredients(&self) -> Option<&BTreeSet<String>> {
        self.ingredients.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.product_type.is_none() && self.price_range.is_none() && self.ingredients.is_none()
    }
}

fn ingredient_set<I, S>(ingredients: I) -> Option<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: BTreeSet<String> = ingredients
        .into_iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

fn deserialize_ingredients<'de, D>(deserializer: D) -> Result<Option<BTreeSet<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(ingredient_set))
}

/// Maps free text onto [`Criteria`] using the closed vocabularies.
#[derive(Clone)]
pub struct CriteriaExtractor {
    parser: Arc<dyn LinguisticParser>,
}

impl Default for CriteriaExtractor {
    fn default() -> Self {
        Self::new(Arc::new(RuleBasedParser::with_ingredient_gazetteer()))
    }
}

impl CriteriaExtractor {
    pub fn new(parser: Arc<dyn LinguisticParser>) -> Self {
        Self { parser }
    }

    /// Extract criteria from a query. Never fails; text without any signal
    /// yields empty criteria.
    pub fn extract(&self, query: &str) -> Criteria {
        let mut criteria = Criteria::new();
        if query.is_empty() {
            return criteria;
        }

        let parsed = self.parser.parse(query);

        if parsed
            .tokens
            .iter()
            .any(|t| vocabulary::is_product_word(&t.text.to_lowercase()))
        {
            criteria.product_type = Some(vocabulary::PRODUCT_CATEGORY.to_string());
        }

        // premium is checked second and overwrites affordable
        let lowered = query.to_lowercase();
        if vocabulary::AFFORDABLE_KEYWORDS
            .iter()
            .any(|k| lowered.contains(k))
        {
            criteria.price_range = Some(PriceRange::Affordable);
        }
        if vocabulary::PREMIUM_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            criteria.price_range = Some(PriceRange::Premium);
        }

        let from_entities = parsed
            .entities
            .iter()
            .map(|e| e.text.to_lowercase())
            .filter(|text| vocabulary::is_ingredient_entity(text));
        let from_tokens = parsed
            .tokens
            .iter()
            .map(|t| t.text.to_lowercase())
            .filter(|text| vocabulary::is_ingredient_keyword(text));
        criteria.ingredients = ingredient_set(from_entities.chain(from_tokens));

        trace!(
            tokens = parsed.tokens.len(),
            entities = parsed.entities.len(),
            ?criteria,
            "extracted criteria"
        );
        criteria
    }
}

impl fmt::Debug for CriteriaExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriteriaExtractor").finish_non_exhaustive()
    }
}
