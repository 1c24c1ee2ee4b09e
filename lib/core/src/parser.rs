//! Linguistic parsing
//!
//! The criteria extractor only needs two things from a parser: the tokens of
//! a query and the named entities found in it. [`LinguisticParser`] is the
//! seam for plugging in a real NLP pipeline; [`RuleBasedParser`] is a small
//! gazetteer-driven implementation that needs no model files.

use serde::{Deserialize, Serialize};

/// A token with its byte span in the parsed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A recognized entity and its surface text as written in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedText {
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
}

/// Tokenizes and tags free text
pub trait LinguisticParser: Send + Sync {
    fn parse(&self, text: &str) -> ParsedText;
}

/// Label attached to every gazetteer match
pub const GAZETTEER_LABEL: &str = "INGREDIENT";

/// Tokenizer plus a phrase gazetteer.
///
/// Tokens are maximal runs of alphanumeric characters. Entities are the
/// longest case-insensitive phrase matches over consecutive tokens, scanning
/// left to right without overlap.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedParser {
    phrases: Vec<Vec<String>>,
}

impl RuleBasedParser {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<Vec<String>> = phrases
            .into_iter()
            .map(|p| {
                tokenize(p.as_ref())
                    .into_iter()
                    .map(|t| t.text.to_lowercase())
                    .collect::<Vec<_>>()
            })
            .filter(|words| !words.is_empty())
            .collect();
        // longest first so "hyaluronic acid" wins over a shorter prefix
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        phrases.dedup();
        Self { phrases }
    }

    /// Parser whose gazetteer holds the ingredient phrases
    pub fn with_ingredient_gazetteer() -> Self {
        Self::new(crate::vocabulary::INGREDIENT_ENTITIES)
    }

    fn match_at(&self, lowered: &[String], at: usize) -> Option<usize> {
        self.phrases.iter().find_map(|phrase| {
            let end = at + phrase.len();
            (end <= lowered.len() && lowered[at..end] == phrase[..]).then_some(phrase.len())
        })
    }
}

impl LinguisticParser for RuleBasedParser {
    fn parse(&self, text: &str) -> ParsedText {
        let tokens = tokenize(text);
        let lowered: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();

        let mut entities = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match self.match_at(&lowered, i) {
                Some(len) => {
                    let start = tokens[i].start;
                    let end = tokens[i + len - 1].end;
                    entities.push(Entity {
                        text: text[start..end].to_string(),
                        label: GAZETTEER_LABEL.to_string(),
                        start,
                        end,
                    });
                    i += len;
                }
                None => i += 1,
            }
        }

        ParsedText { tokens, entities }
    }
}

/// Split text into runs of alphanumeric characters
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_alphanumeric(), start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                tokens.push(Token {
                    text: text[s..idx].to_string(),
                    start: s,
                    end: idx,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: text[s..].to_string(),
            start: s,
            end: text.len(),
        });
    }

    tokens
}
