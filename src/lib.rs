//! NPC Dialogue Engine: adaptive, template-based dialogue for game characters.
//!
//! Picks phrasing from an NPC's profile, the conversational context, a
//! simulated mood and the player's accumulated standing with that NPC, and
//! keeps a per-NPC relationship ledger updated from player actions.

pub mod core;
pub mod schema;

pub use crate::core::engine::{DialogueEngine, DialogueEngineBuilder, EngineError};
pub use crate::core::mood::{FixedMood, Mood, MoodSelector, TraitMoodSelector};
pub use crate::core::options::DEFAULT_OPTION_COUNT;
pub use crate::core::sentiment::{KeywordSentiment, SentimentScorer};
