/// Template catalog: context → style → template, plus per-mood modifiers.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::mood::Mood;
use crate::core::template::{Template, TemplateError};

const BUILTIN_TEMPLATES: &str = include_str!("../../data/templates.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("template error in {context}/{style}: {source}")]
    Template {
        context: String,
        style: String,
        #[source]
        source: TemplateError,
    },
    #[error("unknown mood '{0}' in mood modifiers")]
    UnknownMood(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Phrasing hints attached to a mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodModifier {
    pub word_choices: Vec<String>,
    pub sentence_endings: Vec<String>,
    /// Short description of delivery, shown as the line's prefix.
    pub speech_patterns: String,
}

impl MoodModifier {
    pub fn word_choice(&self, rng: &mut StdRng) -> Option<&str> {
        self.word_choices.choose(rng).map(String::as_str)
    }

    pub fn sentence_ending(&self, rng: &mut StdRng) -> Option<&str> {
        self.sentence_endings.choose(rng).map(String::as_str)
    }
}

/// Immutable set of dialogue templates and mood modifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateCatalog {
    pub contexts: HashMap<String, HashMap<String, Template>>,
    pub mood_modifiers: HashMap<Mood, MoodModifier>,
}

// On-disk shape: templates are plain strings and moods are labels, both
// validated while converting into the catalog.

#[derive(Debug, Deserialize)]
struct RonCatalog {
    #[serde(default)]
    contexts: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    mood_modifiers: HashMap<String, MoodModifier>,
}

impl TemplateCatalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<TemplateCatalog, CatalogError> {
        Self::parse_ron(BUILTIN_TEMPLATES)
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<TemplateCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<TemplateCatalog, CatalogError> {
        let raw: RonCatalog = ron::from_str(input)?;

        let mut contexts = HashMap::new();
        for (context, styles) in raw.contexts {
            let mut parsed = HashMap::new();
            for (style, text) in styles {
                let template = Template::parse(&text).map_err(|source| CatalogError::Template {
                    context: context.clone(),
                    style: style.clone(),
                    source,
                })?;
                parsed.insert(style, template);
            }
            contexts.insert(context, parsed);
        }

        let mut mood_modifiers = HashMap::new();
        for (label, modifier) in raw.mood_modifiers {
            let mood = Mood::ALL
                .into_iter()
                .find(|m| m.label() == label)
                .ok_or(CatalogError::UnknownMood(label))?;
            mood_modifiers.insert(mood, modifier);
        }

        Ok(TemplateCatalog {
            contexts,
            mood_modifiers,
        })
    }

    pub fn get(&self, context: &str, style: &str) -> Option<&Template> {
        self.contexts.get(context)?.get(style)
    }

    pub fn modifier(&self, mood: Mood) -> Option<&MoodModifier> {
        self.mood_modifiers.get(&mood)
    }

    /// Every (context, style, template) triple in the catalog.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Template)> + '_ {
        self.contexts.iter().flat_map(|(context, styles)| {
            styles
                .iter()
                .map(move |(style, t)| (context.as_str(), style.as_str(), t))
        })
    }

    /// Merge another catalog into this one. Styles and mood modifiers from
    /// `other` override those in `self` with the same key; contexts are
    /// merged style by style.
    pub fn merge(&mut self, other: TemplateCatalog) {
        for (context, styles) in other.contexts {
            self.contexts.entry(context).or_default().extend(styles);
        }
        self.mood_modifiers.extend(other.mood_modifiers);
    }
}
