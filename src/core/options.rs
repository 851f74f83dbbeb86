/// Response option generation: several candidate NPC replies shaped by
/// relationship standing, class and personality.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::schema::profile::NpcProfile;
use crate::schema::relationship::{RelationshipState, Tone};

/// Number of options produced when the caller does not ask for a count.
pub const DEFAULT_OPTION_COUNT: usize = 3;

const CLOSE_NICKNAMES: &[&str] = &["my dear friend", "partner", "adventure companion"];
const FRIENDLY_NICKNAMES: &[&str] = &["friend", "partner", "adventurer"];
const FILLER_TOPICS: &[&str] = &["next steps", "other options", "alternatives"];

/// Class keyword → (encouraging suggestion, cautious suggestion).
const SUGGESTIONS: &[(&str, &str, &str)] = &[
    ("Explorer", "explore that less-traveled path", "follow the safer route this time"),
    ("Scientist", "analyze the patterns before deciding", "consider the unknown variables"),
    ("Guardian", "protect what's most valuable first", "retreat and reassess the situation"),
];
const DEFAULT_SUGGESTION: (&str, &str) = ("follow your intuition", "think more about the consequences");

const FACTUAL_RESPONSES: &[(&str, &str)] = &[
    ("Explorer", "I've seen similar situations in my travels, and usually it's best to map all possible routes"),
    ("Scientist", "the data suggests there are multiple variables to consider, especially the time factor"),
    ("Guardian", "the natural balance suggests we should intervene minimally, but with precision"),
];
const DEFAULT_FACTUAL: &str = "based on what we know, we have several viable options to consider";

const HONEST_OPINIONS: &[(&[&str], &str)] = &[
    (&["optimism", "enthusiasm", "curiosity"], "I believe we should try the bolder approach"),
    (&["wisdom", "patience"], "I suggest we observe more before acting"),
    (&["determination", "courage"], "we should face this head-on, without hesitation"),
];
const DEFAULT_OPINION: &str = "I think we should follow what seems most aligned with our goals";

/// (interaction_style key, context cues, label). Evaluated in order.
const PERSONALITY_CUES: &[(&str, &[&str], &str)] = &[
    ("under_stress", &["stress"], "Under pressure"),
    ("teaching_moments", &["learn"], "Teaching"),
    ("conflict_resolution", &["conflict", "disagree"], "Resolving conflict"),
    ("first_meeting", &["new"], "First meeting"),
];

const CLASS_PERSPECTIVES: &[(&str, &str)] = &[
    ("Star Explorer", "each journey reveals new possibilities we couldn't imagine before setting out"),
    ("Techno-Mage Scientist", "the intersection between science and the unexplained often reveals the most elegant solutions"),
    ("Guardian of the Floating Forests", "all parts of a system are connected, and each action creates ripples through the whole"),
    ("Sentient Alien Pet", "communication goes far beyond words; sometimes the unspoken is more important"),
    ("Hero Apprentice", "the stories we hear shape the stories we live, and each of us is writing our own chapter"),
];
const DEFAULT_PERSPECTIVE: &str = "each situation is unique and deserves careful consideration";

/// Builds candidate replies for one NPC.
pub struct OptionGenerator<'a> {
    profile: &'a NpcProfile,
    affinity: f64,
    trust: f64,
    tone: Tone,
}

impl<'a> OptionGenerator<'a> {
    /// An NPC with no recorded relationship is treated as the baseline.
    pub fn new(profile: &'a NpcProfile, relationship: Option<&RelationshipState>) -> Self {
        let baseline = RelationshipState::default();
        let state = relationship.unwrap_or(&baseline);
        Self {
            profile,
            affinity: state.affinity,
            trust: state.trust,
            tone: state.tone(),
        }
    }

    /// Attitude the NPC holds toward the player while answering.
    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Produce exactly `count` replies.
    ///
    /// `_player_statement` is accepted for parity with the dialogue call;
    /// the keyword generator does not read it.
    pub fn generate(
        &self,
        context: &str,
        _player_statement: &str,
        count: usize,
        rng: &mut StdRng,
    ) -> Vec<String> {
        tracing::debug!(
            npc = %self.profile.name,
            tone = ?self.tone,
            affinity = self.affinity,
            trust = self.trust,
            "generating response options"
        );
        let mut options = Vec::new();

        if self.affinity > 60.0 {
            options.push(format!(
                "I completely understand, {}. Considering our history together, I suggest {}.",
                self.nickname(rng),
                self.suggestion(true)
            ));
        }
        if self.affinity < 40.0 {
            options.push(format!(
                "Hmm. {}. Perhaps we should {}.",
                self.cautious_response(),
                self.suggestion(false)
            ));
        }
        if self.trust > 70.0 {
            options.push(format!(
                "I trust you to make the right decision here. If you want my honest opinion, {}.",
                self.honest_opinion()
            ));
        }
        options.push(format!("Considering the facts, {}.", self.factual_response()));
        options.push(self.personality_response(context));

        if options.len() > count {
            return options.choose_multiple(rng, count).cloned().collect();
        }
        while options.len() < count {
            let topic = FILLER_TOPICS.choose(rng).copied().unwrap_or("next steps");
            options.push(format!("Interesting perspective. Let's consider {}.", topic));
        }
        options
    }

    fn nickname(&self, rng: &mut StdRng) -> &'static str {
        let pool = if self.affinity > 90.0 {
            CLOSE_NICKNAMES
        } else if self.affinity > 70.0 {
            FRIENDLY_NICKNAMES
        } else {
            return "traveler";
        };
        pool.choose(rng).copied().unwrap_or("traveler")
    }

    fn suggestion(&self, encouraging: bool) -> &'static str {
        let (yes, no) = SUGGESTIONS
            .iter()
            .find(|(class, _, _)| self.profile.class.contains(class))
            .map(|(_, yes, no)| (*yes, *no))
            .unwrap_or(DEFAULT_SUGGESTION);
        if encouraging {
            yes
        } else {
            no
        }
    }

    fn cautious_response(&self) -> &'static str {
        match self.profile.alignment_ethic() {
            Some("Lawful") => "We need to consider the rules and traditions here",
            Some("Chaotic") => "I don't much trust rigid plans in this situation",
            _ => "I see pros and cons on both sides",
        }
    }

    fn honest_opinion(&self) -> &'static str {
        self.profile
            .dominant_trait()
            .and_then(|t| {
                HONEST_OPINIONS
                    .iter()
                    .find(|(traits, _)| traits.contains(&t))
                    .map(|(_, opinion)| *opinion)
            })
            .unwrap_or(DEFAULT_OPINION)
    }

    fn factual_response(&self) -> &'static str {
        FACTUAL_RESPONSES
            .iter()
            .find(|(class, _)| self.profile.class.contains(class))
            .map(|(_, text)| *text)
            .unwrap_or(DEFAULT_FACTUAL)
    }

    fn personality_response(&self, context: &str) -> String {
        let context = context.to_lowercase();
        for (key, cues, label) in PERSONALITY_CUES {
            if let Some(phrase) = self.profile.interaction_style.get(*key) {
                if cues.iter().any(|cue| context.contains(cue)) {
                    return format!("[{}] {}", label, phrase);
                }
            }
        }

        let perspective = CLASS_PERSPECTIVES
            .iter()
            .find(|(class, _)| self.profile.class.contains(class))
            .map(|(_, text)| *text)
            .unwrap_or(DEFAULT_PERSPECTIVE);
        format!("As a {}, my perspective is that {}", self.profile.class, perspective)
    }
}
