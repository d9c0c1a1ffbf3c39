//! Model selection policy.
//!
//! A policy is an ordered table: a language-specific model wins, then any
//! multilingual model whose support set lists the language, then the universal
//! fallback. Summarization and sentiment each get their own table.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;

/// How specialized a chosen model is for the detected language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    Specific,
    Multilingual,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ModelChoice {
    pub tier: ModelTier,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MultilingualModel {
    identifier: String,
    languages: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPolicy {
    specific: BTreeMap<String, String>,
    multilingual: Vec<MultilingualModel>,
    fallback: String,
}

/// Languages covered by the XL-Sum multilingual summarization model.
const XLSUM_LANGUAGES: &[&str] = &[
    "am", "ar", "az", "bn", "cy", "en", "es", "fa", "fr", "gd", "gu", "ha", "hi", "id", "ig",
    "ja", "ko", "ky", "mr", "my", "ne", "om", "pa", "pcm", "ps", "pt", "rn", "ru", "si", "so",
    "sr", "sw", "ta", "te", "th", "ti", "tr", "uk", "ur", "uz", "vi", "yo", "zh",
];

/// Languages covered by the XLM-R multilingual sentiment model.
const XLMR_SENTIMENT_LANGUAGES: &[&str] = &["ar", "de", "en", "es", "fr", "hi", "it", "pt"];

impl ModelPolicy {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            specific: BTreeMap::new(),
            multilingual: Vec::new(),
            fallback: fallback.into(),
        }
    }

    pub fn with_specific(mut self, language: &str, model: impl Into<String>) -> Self {
        self.specific.insert(normalize_code(language), model.into());
        self
    }

    /// Multilingual models are consulted in the order they were added.
    pub fn with_multilingual<'a>(
        mut self,
        model: impl Into<String>,
        languages: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        self.multilingual.push(MultilingualModel {
            identifier: model.into(),
            languages: languages.into_iter().map(normalize_code).collect(),
        });
        self
    }

    /// Default summarization table.
    pub fn summarization() -> Self {
        Self::new("sshleifer/distilbart-cnn-12-6")
            .with_specific("en", "facebook/bart-large-cnn")
            .with_multilingual(
                "csebuetnlp/mT5_multilingual_XLSum",
                XLSUM_LANGUAGES.iter().copied(),
            )
    }

    /// Default sentiment table.
    pub fn sentiment() -> Self {
        Self::new("distilbert-base-uncased-finetuned-sst-2-english")
            .with_specific("en", "cardiffnlp/twitter-roberta-base-sentiment-latest")
            .with_multilingual(
                "cardiffnlp/twitter-xlm-roberta-base-sentiment",
                XLMR_SENTIMENT_LANGUAGES.iter().copied(),
            )
    }

    pub fn select(&self, language_code: &str) -> ModelChoice {
        let code = normalize_code(language_code);

        if let Some(model) = self.specific.get(&code) {
            return ModelChoice {
                tier: ModelTier::Specific,
                identifier: model.clone(),
            };
        }

        if let Some(model) = self.multilingual.iter().find(|m| m.languages.contains(&code)) {
            return ModelChoice {
                tier: ModelTier::Multilingual,
                identifier: model.identifier.clone(),
            };
        }

        ModelChoice {
            tier: ModelTier::Fallback,
            identifier: self.fallback.clone(),
        }
    }

    /// Whether some model in the table is tuned for or trained on the language.
    pub fn supports(&self, language_code: &str) -> bool {
        self.select(language_code).tier != ModelTier::Fallback
    }
}

/// `"EN-us"` -> `"en"`.
fn normalize_code(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}
