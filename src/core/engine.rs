/// The dialogue engine: profile lookup → style → mood → template → text.
///
/// Wires together the profile store, template catalog, mood and style
/// selection, rendering, the relationship ledger and option generation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use thiserror::Error;

use crate::core::catalog::{CatalogError, TemplateCatalog};
use crate::core::ledger::RelationshipLedger;
use crate::core::mood::{MoodSelector, TraitMoodSelector};
use crate::core::options::OptionGenerator;
use crate::core::render::render;
use crate::core::sentiment::{KeywordSentiment, SentimentScorer};
use crate::core::style::select_style;
use crate::schema::profile::ProfileStore;
use crate::schema::relationship::{Interaction, RelationshipState};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Generates NPC dialogue and tracks the player's standing with each NPC.
///
/// One engine holds one session's state. Operations that draw randomness or
/// update relationships take `&mut self`; hosts sharing an engine across
/// threads must put it behind a lock.
pub struct DialogueEngine {
    profiles: ProfileStore,
    catalog: TemplateCatalog,
    ledger: RelationshipLedger,
    mood_selector: Box<dyn MoodSelector>,
    scorer: Box<dyn SentimentScorer>,
    rng: StdRng,
}

/// Builder for constructing a `DialogueEngine`.
pub struct DialogueEngineBuilder {
    profiles_path: Option<String>,
    templates_path: Option<String>,
    seed: Option<u64>,
    /// Directly provided profiles (for testing without files).
    profiles: Option<ProfileStore>,
    /// Directly provided catalog, used instead of the built-in one.
    catalog: Option<TemplateCatalog>,
    mood_selector: Option<Box<dyn MoodSelector>>,
    scorer: Option<Box<dyn SentimentScorer>>,
}

impl DialogueEngine {
    pub fn builder() -> DialogueEngineBuilder {
        DialogueEngineBuilder {
            profiles_path: None,
            templates_path: None,
            seed: None,
            profiles: None,
            catalog: None,
            mood_selector: None,
            scorer: None,
        }
    }

    /// Generate one line of dialogue for `npc_name` in `context`.
    ///
    /// Unknown NPCs produce a bracketed not-found marker instead of dialogue.
    pub fn generate_dialogue(
        &mut self,
        npc_name: &str,
        context: &str,
        player_history: Option<&[Interaction]>,
        player_choice: Option<&str>,
    ) -> String {
        let Some(profile) = self.profiles.get(npc_name) else {
            return format!("[NPC '{}' not found in system]", npc_name);
        };

        let style = select_style(profile, context, player_history);
        let mood = self.mood_selector.select_mood(profile, &mut self.rng);
        tracing::debug!(npc = npc_name, context, style, %mood, "generating dialogue");

        render(
            &self.catalog,
            context,
            style,
            mood,
            profile,
            player_choice,
            &mut self.rng,
        )
    }

    /// Score a player action and apply it to the NPC's relationship state.
    pub fn update_player_relationship(&mut self, npc_name: &str, player_action: &str, context: &str) {
        self.ledger
            .update(self.scorer.as_ref(), npc_name, player_action, context);
    }

    /// Generate exactly `num_options` candidate replies to a player statement.
    pub fn generate_response_options(
        &mut self,
        npc_name: &str,
        context: &str,
        player_statement: &str,
        num_options: usize,
    ) -> Vec<String> {
        let Some(profile) = self.profiles.get(npc_name) else {
            return vec![format!("[NPC '{}' not found]", npc_name); num_options];
        };

        OptionGenerator::new(profile, self.ledger.get(npc_name)).generate(
            context,
            player_statement,
            num_options,
            &mut self.rng,
        )
    }

    pub fn relationship(&self, npc_name: &str) -> Option<&RelationshipState> {
        self.ledger.get(npc_name)
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }
}

impl DialogueEngineBuilder {
    /// Roster file (JSON, or RON with a `.ron` extension). A missing or
    /// malformed file yields an empty roster.
    pub fn profiles_path(mut self, path: &str) -> Self {
        self.profiles_path = Some(path.to_string());
        self
    }

    /// RON catalog merged over the base catalog. Unlike the roster, failing
    /// to load it is an error.
    pub fn templates_path(mut self, path: &str) -> Self {
        self.templates_path = Some(path.to_string());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Provide profiles directly (for testing without files).
    pub fn with_profiles(mut self, profiles: ProfileStore) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Replace the built-in catalog.
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn mood_selector(mut self, selector: impl MoodSelector + 'static) -> Self {
        self.mood_selector = Some(Box::new(selector));
        self
    }

    pub fn sentiment_scorer(mut self, scorer: impl SentimentScorer + 'static) -> Self {
        self.scorer = Some(Box::new(scorer));
        self
    }

    pub fn build(self) -> Result<DialogueEngine, EngineError> {
        let mut catalog = match self.catalog {
            Some(catalog) => catalog,
            None => TemplateCatalog::builtin()?,
        };
        if let Some(ref path) = self.templates_path {
            catalog.merge(TemplateCatalog::load_from_ron(Path::new(path))?);
        }

        let mut profiles = self.profiles.unwrap_or_default();
        if let Some(ref path) = self.profiles_path {
            profiles.npcs.extend(ProfileStore::load(Path::new(path)).npcs);
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!(
            npcs = profiles.len(),
            contexts = catalog.contexts.len(),
            "dialogue engine ready"
        );

        Ok(DialogueEngine {
            profiles,
            catalog,
            ledger: RelationshipLedger::new(),
            mood_selector: self
                .mood_selector
                .unwrap_or_else(|| Box::new(TraitMoodSelector)),
            scorer: self
                .scorer
                .unwrap_or_else(|| Box::new(KeywordSentiment::default())),
            rng,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mood::{FixedMood, Mood};
    use crate::schema::profile::NpcProfile;
    use std::collections::HashMap;

    fn roster() -> ProfileStore {
        ProfileStore::new(vec![
            NpcProfile {
                name: "Dr. Elian Thaumatec".to_string(),
                class: "Techno-Mage Scientist".to_string(),
                alignment: "Neutral Good".to_string(),
                personality_traits: HashMap::from([
                    ("curiosity".to_string(), 0.95),
                    ("patience".to_string(), 0.6),
                ]),
                backstory: "A scholar of the old towers. He binds spells to machines. Few understand him."
                    .to_string(),
                interaction_style: HashMap::new(),
            },
            NpcProfile {
                name: "Blip".to_string(),
                class: "Sentient Alien Pet".to_string(),
                alignment: "Chaotic Neutral".to_string(),
                personality_traits: HashMap::from([("enthusiasm".to_string(), 0.9)]),
                backstory: String::new(),
                interaction_style: HashMap::new(),
            },
        ])
    }

    fn build_test_engine(mood: Mood) -> DialogueEngine {
        DialogueEngine::builder()
            .seed(42)
            .with_profiles(roster())
            .mood_selector(FixedMood(mood))
            .build()
            .unwrap()
    }

    #[test]
    fn greeting_for_good_npc_is_friendly() {
        let mut engine = build_test_engine(Mood::Happy);
        let line = engine.generate_dialogue("Dr. Elian Thaumatec", "greeting", None, None);
        assert_eq!(
            line,
            "[expansive and enthusiastic] Hello! Great to see you here! I'm Dr. Elian Thaumatec. \
             I am Neutral Good and He binds spells to machines."
        );
    }

    #[test]
    fn greeting_for_neutral_npc_is_cautious() {
        let mut engine = build_test_engine(Mood::Angry);
        let line = engine.generate_dialogue("Blip", "greeting", None, None);
        assert!(line.starts_with("[short and intense] Hmm... "), "got: {}", line);
        assert!(line.contains("I'm Blip. I am Chaotic Neutral and I have a story to tell."));
    }

    #[test]
    fn quest_offer_is_mysterious_for_scientist() {
        let mut engine = build_test_engine(Mood::Curious);
        let line = engine.generate_dialogue("Dr. Elian Thaumatec", "quest_offer", None, None);
        assert_eq!(
            line,
            "[questioning and reflective] I have an... interesting proposal. \
             [Quest description would be dynamically generated] There's more to this than meets the eye."
        );
    }

    #[test]
    fn unknown_context_falls_back() {
        let mut engine = build_test_engine(Mood::Sad);
        let line = engine.generate_dialogue("Blip", "farewell", None, None);
        assert_eq!(line, "[slow and melancholic] Hello, I'm Blip. How can I help?");
    }

    #[test]
    fn unknown_npc_is_reported() {
        let mut engine = build_test_engine(Mood::Happy);
        assert_eq!(
            engine.generate_dialogue("Ghost", "greeting", None, None),
            "[NPC 'Ghost' not found in system]"
        );
        assert_eq!(
            engine.generate_response_options("Ghost", "greeting", "hello?", 3),
            vec!["[NPC 'Ghost' not found]".to_string(); 3]
        );
    }

    #[test]
    fn relationship_update_scenario() {
        let mut engine = build_test_engine(Mood::Happy);
        assert!(engine.relationship("Dr. Elian Thaumatec").is_none());
        engine.update_player_relationship(
            "Dr. Elian Thaumatec",
            "I will help and protect you",
            "cooperative mission",
        );
        let state = engine.relationship("Dr. Elian Thaumatec").unwrap();
        assert_eq!(state.affinity, 54.0);
        assert_eq!(state.trust, 52.0);
        assert_eq!(state.interactions.len(), 1);
    }

    #[test]
    fn options_reflect_relationship() {
        let mut engine = build_test_engine(Mood::Happy);
        for _ in 0..6 {
            engine.update_player_relationship("Blip", "a gift to help and protect", "play");
        }
        // affinity 86, trust 68
        let options = engine.generate_response_options("Blip", "problem solving", "Let's go", 3);
        assert_eq!(options.len(), 3);
        assert!(options[0].starts_with("I completely understand, "));
        assert!(options[0].ends_with("I suggest follow your intuition."));
    }

    #[test]
    fn same_seed_same_output() {
        let run = || {
            let mut engine = DialogueEngine::builder()
                .seed(7)
                .with_profiles(roster())
                .build()
                .unwrap();
            (0..5)
                .map(|_| engine.generate_dialogue("Blip", "greeting", None, None))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn builder_missing_profiles_file_gives_empty_roster() {
        let engine = DialogueEngine::builder()
            .profiles_path("tests/fixtures/missing_profiles.json")
            .build()
            .unwrap();
        assert!(engine.profiles().is_empty());
        assert_eq!(engine.catalog().contexts.len(), 3);
    }

    #[test]
    fn builder_malformed_profiles_file_still_builds() {
        let engine = DialogueEngine::builder()
            .with_profiles(roster())
            .profiles_path("tests/fixtures/malformed_profiles.json")
            .build()
            .unwrap();
        assert_eq!(engine.profiles().len(), 2);
    }

    #[test]
    fn builder_missing_templates_file_is_an_error() {
        let result = DialogueEngine::builder()
            .templates_path("tests/fixtures/missing_templates.ron")
            .build();
        assert!(matches!(result, Err(EngineError::Catalog(CatalogError::Io(_)))));
    }
}
