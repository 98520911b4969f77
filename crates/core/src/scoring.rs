//! Score extraction from generated advisory text.
//!
//! Advisory text carries its score on a labelled line such as
//! `Sustainability Score: 72`. Extraction never fails: unparseable input
//! yields [`DEFAULT_SCORE`] and the text unchanged.

/// Label of the overall sustainability score line.
pub const SUSTAINABILITY_SCORE_LABEL: &str = "Sustainability Score:";

/// Score returned when no parseable score line exists.
pub const DEFAULT_SCORE: i64 = 50;

/// Inclusive score bounds.
pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

/// Emphasis marker wrapped around the score line.
const EMPHASIS: &str = "**";

/// Result of a score extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreExtraction {
    /// Score clamped to `0..=100`, or [`DEFAULT_SCORE`].
    pub score: i64,
    /// Input text with the score line wrapped in emphasis markers, or the
    /// original text when no score was found.
    pub annotated_text: String,
    /// Whether the score came from the text rather than the default.
    pub found: bool,
}

/// Extract the overall sustainability score.
pub fn extract_sustainability_score(text: &str) -> ScoreExtraction {
    extract_labeled_score(text, SUSTAINABILITY_SCORE_LABEL)
}

/// Extract the score from the first line whose trimmed content starts with
/// `label`.
///
/// The first whitespace-delimited token after the line's first colon must
/// parse as an integer. On success the whole line is replaced by its trimmed
/// content wrapped in `**`; every other line is left untouched.
pub fn extract_labeled_score(text: &str, label: &str) -> ScoreExtraction {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(index) = lines.iter().position(|l| l.trim().starts_with(label)) else {
        return fallback(text);
    };
    let line = lines[index];

    let Some(score) = parse_score_token(line) else {
        return fallback(text);
    };

    let mut annotated: Vec<String> = lines.iter().map(|l| (*l).to_string()).collect();
    annotated[index] = format!("{EMPHASIS}{}{EMPHASIS}", line.trim());

    ScoreExtraction {
        score: score.clamp(MIN_SCORE, MAX_SCORE),
        annotated_text: annotated.join("\n"),
        found: true,
    }
}

fn parse_score_token(line: &str) -> Option<i64> {
    let (_, after_colon) = line.split_once(':')?;
    after_colon.split_whitespace().next()?.parse::<i64>().ok()
}

fn fallback(text: &str) -> ScoreExtraction {
    ScoreExtraction {
        score: DEFAULT_SCORE,
        annotated_text: text.to_string(),
        found: false,
    }
}
