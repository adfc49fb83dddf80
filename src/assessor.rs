use std::sync::OnceLock;

use serde::Serialize;

use crate::app_dirs::AppDirs;
use crate::model::PerceptronModel;
use crate::phonetics::{extract, transcribe, FeatureVector, Lexicon};
use crate::util;

/// Difficulty buckets derived from the model score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Category {
    #[serde(rename = "very easy")]
    #[strum(to_string = "very easy")]
    VeryEasy,
    #[serde(rename = "easy")]
    #[strum(to_string = "easy")]
    Easy,
    #[serde(rename = "moderate")]
    #[strum(to_string = "moderate")]
    Moderate,
    #[serde(rename = "hard")]
    #[strum(to_string = "hard")]
    Hard,
    #[serde(rename = "very hard")]
    #[strum(to_string = "very hard")]
    VeryHard,
}

impl Category {
    /// Thresholds are inclusive: a score sitting exactly on a boundary takes
    /// the easier bucket.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            Category::VeryEasy
        } else if score >= 0.65 {
            Category::Easy
        } else if score >= 0.45 {
            Category::Moderate
        } else if score >= 0.25 {
            Category::Hard
        } else {
            Category::VeryHard
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WordAssessment {
    pub word: String,
    pub ipa: String,
    pub score: f64,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextAssessment {
    pub text: String,
    pub average_score: Option<f64>,
    pub overall_category: Option<Category>,
    pub word_count: usize,
    pub words: Vec<WordAssessment>,
}

/// Scores words with a model, reading pronunciations through the optional
/// phoneme cache.
#[derive(Debug, Clone)]
pub struct Assessor {
    model: PerceptronModel,
    lexicon: Option<Lexicon>,
}

static SHARED: OnceLock<Assessor> = OnceLock::new();

impl Assessor {
    /// Build an assessor over an explicit model; picks up the phoneme cache
    /// when one is present.
    pub fn new(model: PerceptronModel) -> Self {
        Self {
            model,
            lexicon: Lexicon::load_default(),
        }
    }

    pub fn with_lexicon(model: PerceptronModel, lexicon: Lexicon) -> Self {
        Self {
            model,
            lexicon: Some(lexicon),
        }
    }

    /// Process-wide assessor over the default model, initialized on first
    /// use and read-only afterwards.
    ///
    /// A user-retrained artifact in the data dir wins over the bundled one;
    /// an unusable artifact there is logged and skipped.
    pub fn shared() -> &'static Assessor {
        SHARED.get_or_init(|| Assessor::new(resolve_default_model()))
    }

    pub fn model(&self) -> &PerceptronModel {
        &self.model
    }

    /// Score a single word. Total over any input: degenerate words get the
    /// model's response to the all-zero feature vector instead of an error.
    pub fn assess_word(&self, word: &str, detailed: bool) -> WordAssessment {
        let transcription = transcribe(word, self.lexicon.as_ref());
        let features = extract(&transcription);
        let score = self.model.predict(&features);

        WordAssessment {
            word: word.to_string(),
            ipa: format!("/{}/", transcription.ipa),
            score,
            category: Category::from_score(score),
            features: detailed.then_some(features),
        }
    }

    /// Assess every word of a text and average the scores. Empty input is a
    /// zero-word result with no average, not an error.
    pub fn assess_text(&self, text: &str, detailed: bool) -> TextAssessment {
        let words: Vec<WordAssessment> = tokenize(text)
            .iter()
            .map(|word| self.assess_word(word, detailed))
            .collect();

        let scores: Vec<f64> = words.iter().map(|word| word.score).collect();
        let average_score = util::mean(&scores);

        TextAssessment {
            text: text.to_string(),
            average_score,
            overall_category: average_score.map(Category::from_score),
            word_count: words.len(),
            words,
        }
    }
}

fn resolve_default_model() -> PerceptronModel {
    if let Some(path) = AppDirs::model_path() {
        if path.exists() {
            match PerceptronModel::load(&path) {
                Ok(model) => return model,
                Err(err) => log::warn!("ignoring unusable model at {}: {err}", path.display()),
            }
        }
    }
    PerceptronModel::embedded_default()
}

/// Whitespace split, punctuation stripped, lowercased. Tokens left empty
/// after stripping vanish.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| {
            raw.chars()
                .filter(|ch| ch.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}
