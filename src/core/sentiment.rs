/// Sentiment scoring of free-text player actions.

/// Lowest score a scorer may report.
pub const SENTIMENT_MIN: f64 = -10.0;
/// Highest score a scorer may report.
pub const SENTIMENT_MAX: f64 = 10.0;

/// Maps a description of a player action to a score in
/// [`SENTIMENT_MIN`, `SENTIMENT_MAX`]. Positive means the NPC approves.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Keyword-counting scorer: each listed keyword found anywhere in the text
/// (case-insensitive) adds or subtracts a fixed weight.
#[derive(Debug, Clone)]
pub struct KeywordSentiment {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub weight: f64,
}

const POSITIVE_KEYWORDS: &[&str] = &["help", "save", "protect", "agree", "gift", "compliment"];
const NEGATIVE_KEYWORDS: &[&str] = &["attack", "steal", "lie", "threaten", "insult", "refuse"];

impl Default for KeywordSentiment {
    fn default() -> Self {
        Self {
            positive: POSITIVE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            negative: NEGATIVE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            weight: 2.0,
        }
    }
}

impl SentimentScorer for KeywordSentiment {
    fn score(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let hits = |words: &[String]| words.iter().filter(|w| lower.contains(w.as_str())).count() as f64;
        let raw = (hits(self.positive.as_slice()) - hits(self.negative.as_slice())) * self.weight;
        raw.clamp(SENTIMENT_MIN, SENTIMENT_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_scores_zero() {
        assert_eq!(KeywordSentiment::default().score("walks around the square"), 0.0);
    }

    #[test]
    fn positive_keywords_count_once_each() {
        let scorer = KeywordSentiment::default();
        assert_eq!(scorer.score("I will help and protect you"), 4.0);
        assert_eq!(scorer.score("help, help, help"), 2.0);
    }

    #[test]
    fn k_positive_keywords_score_min_ten_two_k() {
        let scorer = KeywordSentiment::default();
        let mut text = String::new();
        for (k, word) in POSITIVE_KEYWORDS.iter().enumerate() {
            text.push_str(word);
            text.push(' ');
            let expected = (2.0 * (k as f64 + 1.0)).min(10.0);
            assert_eq!(scorer.score(&text), expected, "after {} keywords", k + 1);
        }
    }

    #[test]
    fn negative_keywords_and_clamp() {
        let scorer = KeywordSentiment::default();
        assert_eq!(scorer.score("You LIE!"), -2.0);
        assert_eq!(
            scorer.score("attack, steal, lie, threaten, insult and refuse"),
            -10.0
        );
    }

    #[test]
    fn mixed_keywords_cancel() {
        assert_eq!(KeywordSentiment::default().score("help them, then steal the gem"), 0.0);
    }

    #[test]
    fn case_insensitive_substring() {
        let scorer = KeywordSentiment::default();
        assert_eq!(scorer.score("Helping solve a difficult problem"), 2.0);
    }
}
