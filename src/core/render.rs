/// Template rendering: template lookup, mood prefix and placeholder fill.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::catalog::TemplateCatalog;
use crate::core::mood::Mood;
use crate::core::template::{Placeholder, Template, TemplateSegment};
use crate::schema::profile::NpcProfile;

/// Used when the catalog has no template for a context/style pair.
pub const FALLBACK_TEMPLATE: &str = "Hello, I'm {npc_name}. How can I help?";

const HESITATIONS: &[&str] = &["Who approaches?", "You seem... different.", "Hmm..."];

fn fallback_template() -> Template {
    Template {
        segments: vec![
            TemplateSegment::Literal("Hello, I'm ".to_string()),
            TemplateSegment::Placeholder(Placeholder::NpcName),
            TemplateSegment::Literal(". How can I help?".to_string()),
        ],
    }
}

/// Per-call values for every placeholder.
pub struct Substitutions<'a> {
    profile: &'a NpcProfile,
    player_choice: Option<&'a str>,
    hesitation: &'static str,
}

impl<'a> Substitutions<'a> {
    pub fn new(profile: &'a NpcProfile, player_choice: Option<&'a str>, rng: &mut StdRng) -> Self {
        Self {
            profile,
            player_choice,
            hesitation: HESITATIONS.choose(rng).copied().unwrap_or("Hmm..."),
        }
    }

    pub fn resolve(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::NpcName => self.profile.name.clone(),
            Placeholder::NpcTitle => self.profile.class.clone(),
            Placeholder::CustomIntro => format!(
                "I am {} and {}",
                self.profile.alignment,
                self.profile.intro_snippet()
            ),
            Placeholder::Hesitation => self.hesitation.to_string(),
            Placeholder::QuestDescription => {
                "[Quest description would be dynamically generated]".to_string()
            }
            Placeholder::ApprovalResponse => "This shows your character.".to_string(),
            Placeholder::DisappointmentResponse => "This wasn't what I expected.".to_string(),
            Placeholder::SurpriseResponse => "You continue to surprise me.".to_string(),
            Placeholder::NeutralResponse => "Let's see where this leads us.".to_string(),
            Placeholder::PlayerChoice => self.player_choice.unwrap_or("that").to_string(),
        }
    }
}

/// Render one line of dialogue.
pub fn render(
    catalog: &TemplateCatalog,
    context: &str,
    style: &str,
    mood: Mood,
    profile: &NpcProfile,
    player_choice: Option<&str>,
    rng: &mut StdRng,
) -> String {
    let fallback;
    let template = match catalog.get(context, style) {
        Some(t) => t,
        None => {
            fallback = fallback_template();
            &fallback
        }
    };

    let subs = Substitutions::new(profile, player_choice, rng);
    let body = template.fill(|p| subs.resolve(p));

    match catalog.modifier(mood) {
        Some(modifier) => format!("[{}] {}", modifier.speech_patterns, body),
        None => body,
    }
}
