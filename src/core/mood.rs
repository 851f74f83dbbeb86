/// Mood selection: the transient emotional state an NPC speaks from.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::profile::NpcProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Curious,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Angry, Mood::Curious];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Curious => "curious",
        }
    }

    /// Uniform draw over all four moods.
    pub fn random(rng: &mut StdRng) -> Mood {
        *Self::ALL.choose(rng).unwrap_or(&Mood::Curious)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strategy deciding which mood an NPC is in for a single line of dialogue.
pub trait MoodSelector: Send + Sync {
    fn select_mood(&self, profile: &NpcProfile, rng: &mut StdRng) -> Mood;
}

/// Mood tendency driven by the NPC's dominant personality trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraitMoodSelector;

const UPBEAT_TRAITS: &[&str] = &["optimism", "enthusiasm", "curiosity"];
const REFLECTIVE_TRAITS: &[&str] = &["wisdom", "empathy", "compassion"];
const RESOLUTE_TRAITS: &[&str] = &["determination", "courage"];

impl TraitMoodSelector {
    /// Returns `favoured` with probability `p`, otherwise any mood.
    fn lean(favoured: Mood, p: f64, rng: &mut StdRng) -> Mood {
        if rng.gen::<f64>() < p {
            favoured
        } else {
            Mood::random(rng)
        }
    }
}

impl MoodSelector for TraitMoodSelector {
    fn select_mood(&self, profile: &NpcProfile, rng: &mut StdRng) -> Mood {
        match profile.dominant_trait() {
            Some(t) if UPBEAT_TRAITS.contains(&t) => Self::lean(Mood::Happy, 0.7, rng),
            Some(t) if REFLECTIVE_TRAITS.contains(&t) => Self::lean(Mood::Curious, 0.6, rng),
            Some(t) if RESOLUTE_TRAITS.contains(&t) => Mood::random(rng),
            _ => Self::lean(Mood::Curious, 0.4, rng),
        }
    }
}

/// Always answers with the same mood. Useful for demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedMood(pub Mood);

impl MoodSelector for FixedMood {
    fn select_mood(&self, _profile: &NpcProfile, _rng: &mut StdRng) -> Mood {
        self.0
    }
}
