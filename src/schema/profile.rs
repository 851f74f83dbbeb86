use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Static description of a non-player character.
///
/// Profiles are loaded once and are read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcProfile {
    pub name: String,
    pub class: String,
    /// Two-word alignment such as "Chaotic Good".
    pub alignment: String,
    #[serde(default)]
    pub personality_traits: HashMap<String, f64>,
    #[serde(default)]
    pub backstory: String,
    /// Situational cue → canned phrase (`under_stress`, `teaching_moments`, ...).
    #[serde(default)]
    pub interaction_style: HashMap<String, String>,
}

impl NpcProfile {
    /// First word of the alignment: "Lawful", "Neutral" or "Chaotic".
    pub fn alignment_ethic(&self) -> Option<&str> {
        self.alignment.split_whitespace().next()
    }

    /// Second word of the alignment: "Good", "Neutral" or "Evil".
    pub fn alignment_moral(&self) -> Option<&str> {
        self.alignment.split_whitespace().nth(1)
    }

    /// The trait with the highest weight.
    ///
    /// Equal weights resolve to the lexicographically smallest trait name so
    /// the result does not depend on map iteration order.
    pub fn dominant_trait(&self) -> Option<&str> {
        self.personality_traits
            .iter()
            .max_by(|a, b| {
                a.1.partial_cmp(b.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| b.0.cmp(a.0))
            })
            .map(|(name, _)| name.as_str())
    }

    /// One sentence of backstory used in self-introductions.
    pub fn intro_snippet(&self) -> String {
        if self.backstory.is_empty() {
            return "I have a story to tell.".to_string();
        }
        let sentences: Vec<&str> = self.backstory.split('.').collect();
        if sentences.len() > 2 {
            format!("{}.", sentences[1].trim())
        } else {
            format!("{}.", sentences[0])
        }
    }
}

/// Read-only roster of NPC profiles, looked up by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileStore {
    pub npcs: Vec<NpcProfile>,
}

impl ProfileStore {
    pub fn new(npcs: Vec<NpcProfile>) -> Self {
        Self { npcs }
    }

    /// Load a roster, degrading to an empty one if the file is missing or
    /// malformed.
    pub fn load(path: &Path) -> ProfileStore {
        match Self::try_load(path) {
            Ok(store) => store,
            Err(ProfileError::Io(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "profile file not found, using empty roster");
                ProfileStore::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "error decoding profile file, using empty roster");
                ProfileStore::default()
            }
        }
    }

    /// Load a roster from a `.ron` file, or from JSON for any other extension.
    pub fn try_load(path: &Path) -> Result<ProfileStore, ProfileError> {
        let contents = std::fs::read_to_string(path)?;
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            Self::parse_ron(&contents)
        } else {
            Self::parse_json(&contents)
        }
    }

    pub fn parse_json(input: &str) -> Result<ProfileStore, ProfileError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn parse_ron(input: &str) -> Result<ProfileStore, ProfileError> {
        Ok(ron::from_str(input)?)
    }

    pub fn get(&self, name: &str) -> Option<&NpcProfile> {
        self.npcs.iter().find(|npc| npc.name == name)
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}
