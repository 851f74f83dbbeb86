/// Interaction style selection: the tone label used to pick a template.

use crate::schema::profile::NpcProfile;
use crate::schema::relationship::Interaction;

/// Classes that offer quests in a mysterious register.
const MYSTERIOUS_CLASSES: &[&str] = &["Techno-Mage Scientist", "Sentient Alien Pet"];

/// Pick a style label for `context`.
///
/// Always returns a label, which may have no template in the catalog.
pub fn select_style(
    profile: &NpcProfile,
    context: &str,
    history: Option<&[Interaction]>,
) -> &'static str {
    match context {
        "greeting" => {
            if profile.alignment_moral() == Some("Good") {
                "friendly"
            } else {
                "cautious"
            }
        }
        "quest_offer" => {
            if context.to_lowercase().contains("urgency") {
                "urgent"
            } else if MYSTERIOUS_CLASSES.contains(&profile.class.as_str()) {
                "mysterious"
            } else {
                "casual"
            }
        }
        "response_to_player_choice" => match history {
            Some(h) if !h.is_empty() => "approval",
            _ => "neutral",
        },
        _ => "friendly",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn profile(class: &str, alignment: &str) -> NpcProfile {
        NpcProfile {
            name: "Captain Lyra Novastella".to_string(),
            class: class.to_string(),
            alignment: alignment.to_string(),
            personality_traits: HashMap::new(),
            backstory: String::new(),
            interaction_style: HashMap::new(),
        }
    }

    #[test]
    fn greeting_follows_alignment() {
        for alignment in ["Lawful Good", "Neutral Good", "Chaotic Good"] {
            assert_eq!(select_style(&profile("Star Explorer", alignment), "greeting", None), "friendly");
        }
        for alignment in ["Lawful Evil", "Chaotic Neutral", "True Neutral", "Neutral"] {
            assert_eq!(select_style(&profile("Star Explorer", alignment), "greeting", None), "cautious");
        }
    }

    #[test]
    fn quest_offer_by_class() {
        assert_eq!(
            select_style(&profile("Techno-Mage Scientist", "Neutral Good"), "quest_offer", None),
            "mysterious"
        );
        assert_eq!(
            select_style(&profile("Sentient Alien Pet", "Chaotic Neutral"), "quest_offer", None),
            "mysterious"
        );
        assert_eq!(
            select_style(&profile("Star Explorer", "Chaotic Good"), "quest_offer", None),
            "casual"
        );
    }

    #[test]
    fn response_depends_on_history() {
        let npc = profile("Hero Apprentice", "Neutral Good");
        assert_eq!(select_style(&npc, "response_to_player_choice", None), "neutral");
        assert_eq!(select_style(&npc, "response_to_player_choice", Some(&[][..])), "neutral");

        let history = vec![Interaction {
            action: "helped the village".to_string(),
            context: "quest".to_string(),
            sentiment: 2.0,
            timestamp: Utc::now(),
        }];
        assert_eq!(
            select_style(&npc, "response_to_player_choice", Some(history.as_slice())),
            "approval"
        );
    }

    #[test]
    fn other_contexts_default_to_friendly() {
        let npc = profile("Star Explorer", "Lawful Evil");
        assert_eq!(select_style(&npc, "farewell", None), "friendly");
        assert_eq!(select_style(&npc, "", None), "friendly");
    }
}
