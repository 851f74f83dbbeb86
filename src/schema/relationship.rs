use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lower bound for affinity and trust.
pub const RELATIONSHIP_MIN: f64 = 0.0;
/// Upper bound for affinity and trust.
pub const RELATIONSHIP_MAX: f64 = 100.0;
/// Starting affinity and trust for an NPC the player has not dealt with yet.
pub const RELATIONSHIP_BASELINE: f64 = 50.0;

/// One recorded player action toward an NPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub action: String,
    pub context: String,
    pub sentiment: f64,
    pub timestamp: DateTime<Utc>,
}

/// Overall attitude derived from affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Friendly,
    Neutral,
    Cautious,
}

/// The player's standing with a single NPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipState {
    pub affinity: f64,
    pub trust: f64,
    pub interactions: Vec<Interaction>,
}

impl Default for RelationshipState {
    fn default() -> Self {
        Self {
            affinity: RELATIONSHIP_BASELINE,
            trust: RELATIONSHIP_BASELINE,
            interactions: Vec::new(),
        }
    }
}

impl RelationshipState {
    pub fn tone(&self) -> Tone {
        if self.affinity > 70.0 {
            Tone::Friendly
        } else if self.affinity > 30.0 {
            Tone::Neutral
        } else {
            Tone::Cautious
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_baseline() {
        let state = RelationshipState::default();
        assert_eq!(state.affinity, 50.0);
        assert_eq!(state.trust, 50.0);
        assert!(state.interactions.is_empty());
        assert_eq!(state.tone(), Tone::Neutral);
    }

    #[test]
    fn tone_thresholds() {
        let mut state = RelationshipState::default();
        state.affinity = 71.0;
        assert_eq!(state.tone(), Tone::Friendly);
        state.affinity = 70.0;
        assert_eq!(state.tone(), Tone::Neutral);
        state.affinity = 30.0;
        assert_eq!(state.tone(), Tone::Cautious);
    }
}
