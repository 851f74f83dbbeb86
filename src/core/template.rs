/// Dialogue template parsing: literal text with named placeholders.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),
}

/// Every placeholder a template may reference. Templates naming anything
/// else are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placeholder {
    NpcName,
    NpcTitle,
    CustomIntro,
    Hesitation,
    QuestDescription,
    ApprovalResponse,
    DisappointmentResponse,
    SurpriseResponse,
    NeutralResponse,
    PlayerChoice,
}

impl Placeholder {
    pub const ALL: [Placeholder; 10] = [
        Self::NpcName,
        Self::NpcTitle,
        Self::CustomIntro,
        Self::Hesitation,
        Self::QuestDescription,
        Self::ApprovalResponse,
        Self::DisappointmentResponse,
        Self::SurpriseResponse,
        Self::NeutralResponse,
        Self::PlayerChoice,
    ];

    /// The name used between braces in template text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NpcName => "npc_name",
            Self::NpcTitle => "npc_title",
            Self::CustomIntro => "custom_intro",
            Self::Hesitation => "hesitation",
            Self::QuestDescription => "quest_description",
            Self::ApprovalResponse => "approval_response",
            Self::DisappointmentResponse => "disappointment_response",
            Self::SurpriseResponse => "surprise_response",
            Self::NeutralResponse => "neutral_response",
            Self::PlayerChoice => "player_choice",
        }
    }

    pub fn from_name(name: &str) -> Option<Placeholder> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// `{name}` substitution.
    Placeholder(Placeholder),
}

/// A parsed template: a sequence of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{npc_name}` and the other [`Placeholder`] names → `Placeholder`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                if i + 1 < len && chars[i + 1] == '{' {
                    literal_buf.push('{');
                    i += 2;
                    continue;
                }

                if !literal_buf.is_empty() {
                    segments.push(TemplateSegment::Literal(std::mem::take(&mut literal_buf)));
                }

                let start = i + 1;
                let mut end = start;
                while end < len && chars[end] != '}' {
                    if chars[end] == '{' {
                        return Err(TemplateError::Parse(
                            "nested braces are not allowed".to_string(),
                        ));
                    }
                    end += 1;
                }
                if end == len {
                    return Err(TemplateError::Parse("unclosed brace".to_string()));
                }

                let content: String = chars[start..end].iter().collect();
                if content.is_empty() {
                    return Err(TemplateError::Parse("empty braces".to_string()));
                }
                let placeholder = Placeholder::from_name(&content)
                    .ok_or(TemplateError::UnknownPlaceholder(content))?;
                segments.push(TemplateSegment::Placeholder(placeholder));
                i = end + 1;
            } else if chars[i] == '}' {
                if i + 1 < len && chars[i + 1] == '}' {
                    literal_buf.push('}');
                    i += 2;
                    continue;
                }
                return Err(TemplateError::Parse(
                    "unmatched closing brace".to_string(),
                ));
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        Ok(Template { segments })
    }

    /// Placeholders referenced by this template, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|s| match s {
            TemplateSegment::Placeholder(p) => Some(*p),
            TemplateSegment::Literal(_) => None,
        })
    }

    /// Produce the output text, asking `resolve` for each placeholder.
    pub fn fill<F>(&self, mut resolve: F) -> String
    where
        F: FnMut(Placeholder) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Placeholder(p) => out.push_str(&resolve(*p)),
            }
        }
        out
    }
}

impl fmt::Display for Template {
    /// Writes the template back in source form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => {
                    write!(f, "{}", text.replace('{', "{{").replace('}', "}}"))?
                }
                TemplateSegment::Placeholder(p) => write!(f, "{{{}}}", p.name())?,
            }
        }
        Ok(())
    }
}
