/// Relationship ledger: per-NPC affinity, trust and interaction log.

use chrono::Utc;
use rustc_hash::FxHashMap;

use crate::core::sentiment::{SentimentScorer, SENTIMENT_MAX, SENTIMENT_MIN};
use crate::schema::relationship::{
    Interaction, RelationshipState, RELATIONSHIP_MAX, RELATIONSHIP_MIN,
};

/// Trust moves at this fraction of the affinity change.
const TRUST_RATE: f64 = 0.5;

/// Owns every NPC's relationship state for one game session.
#[derive(Debug, Clone, Default)]
pub struct RelationshipLedger {
    states: FxHashMap<String, RelationshipState>,
}

impl RelationshipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, npc_name: &str) -> Option<&RelationshipState> {
        self.states.get(npc_name)
    }

    /// Score `action` and apply it to the NPC's standing, creating the
    /// baseline state on first contact.
    pub fn update(
        &mut self,
        scorer: &dyn SentimentScorer,
        npc_name: &str,
        action: &str,
        context: &str,
    ) {
        let raw = scorer.score(action);
        let sentiment = if raw.is_finite() {
            raw.clamp(SENTIMENT_MIN, SENTIMENT_MAX)
        } else {
            tracing::warn!(npc = npc_name, score = raw, "non-finite sentiment treated as neutral");
            0.0
        };
        let state = self.states.entry(npc_name.to_string()).or_default();

        state.affinity = (state.affinity + sentiment).clamp(RELATIONSHIP_MIN, RELATIONSHIP_MAX);
        state.trust =
            (state.trust + sentiment * TRUST_RATE).clamp(RELATIONSHIP_MIN, RELATIONSHIP_MAX);
        state.interactions.push(Interaction {
            action: action.to_string(),
            context: context.to_string(),
            sentiment,
            timestamp: Utc::now(),
        });

        tracing::debug!(
            npc = npc_name,
            sentiment,
            affinity = state.affinity,
            trust = state.trust,
            "relationship updated"
        );
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
