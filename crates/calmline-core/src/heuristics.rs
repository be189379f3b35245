//! Local stand-ins used when the backend cannot answer.
//!
//! Everything here is deterministic and cheap: keyword scans for emotions
//! and sentiment, a linear rescale for the check-in mood index, and fixed
//! payloads for the endpoints whose fallback ignores its input.

use std::collections::BTreeMap;

use crate::models::{
    BaselineResult, CheckInResult, CheckInSubmission, Emotion, Exercise, JournalAnalysis,
    MoodSeries, Question, QuestionSet, RewriteResult, SafetyCheck,
};

// ============================================================================
// Keyword tables
// ============================================================================

/// Emotion label, score assigned on a match, and its trigger keywords.
/// Scanned in order; every matching set contributes one entry.
const EMOTION_KEYWORDS: &[(&str, f64, &[&str])] = &[
    (
        "Joy",
        0.7,
        &["happy", "joy", "excited", "grateful", "glad", "great", "good", "love", "wonderful", "proud"],
    ),
    (
        "Sadness",
        0.6,
        &["sad", "down", "depressed", "lonely", "cry", "hopeless", "grief", "miss"],
    ),
    (
        "Anger",
        0.6,
        &["angry", "mad", "furious", "frustrated", "annoyed", "irritated", "rage", "hate"],
    ),
    (
        "Anxiety",
        0.6,
        &["anxious", "anxiety", "worried", "worry", "nervous", "stress", "panic", "afraid", "scared", "overwhelmed"],
    ),
];

/// Emitted when no emotion keyword matches.
const REFLECTION_LABEL: &str = "Reflection";
const REFLECTION_SCORE: f64 = 0.5;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "calm", "grateful", "love", "better", "joy", "hope", "proud",
    "relaxed", "peaceful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "sad", "angry", "anxious", "worried", "stress", "tired", "hate", "awful", "terrible",
    "lonely", "hopeless",
];

/// Words per unit of sentiment normalization.
const SENTIMENT_WORDS_PER_UNIT: f64 = 10.0;

// ============================================================================
// Heuristics
// ============================================================================

/// Round half-up to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Rescale the mean of 1–5 answers onto a 0–100 mood index.
/// Returns 0 when there is nothing to average.
pub fn mood_index<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    let avg = sum / count as f64;
    round2(((avg - 1.0) / 4.0) * 100.0)
}

/// Case-insensitive keyword scan over the whole entry.
pub fn detect_emotions(text: &str) -> Vec<Emotion> {
    let lower = text.to_lowercase();
    let emotions: Vec<Emotion> = EMOTION_KEYWORDS
        .iter()
        .filter(|(_, _, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(label, score, _)| Emotion::new(label, *score))
        .collect();

    if emotions.is_empty() {
        vec![Emotion::new(REFLECTION_LABEL, REFLECTION_SCORE)]
    } else {
        emotions
    }
}

/// Word-level polarity count, normalized by entry length and clamped to
/// `[-1, 1]`. A word can count both ways if it contains both kinds of term.
pub fn sentiment_score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let mut score = 0.0;
    let mut word_count = 0usize;
    for word in lower.split_whitespace() {
        word_count += 1;
        if POSITIVE_WORDS.iter().any(|p| word.contains(p)) {
            score += 1.0;
        }
        if NEGATIVE_WORDS.iter().any(|n| word.contains(n)) {
            score -= 1.0;
        }
    }
    let divisor = (word_count as f64 / SENTIMENT_WORDS_PER_UNIT).max(1.0);
    (score / divisor).clamp(-1.0, 1.0)
}

// ============================================================================
// Fallback payloads
// ============================================================================

pub fn checkin_result(submission: &CheckInSubmission) -> CheckInResult {
    CheckInResult {
        mood_index: mood_index(submission.numeric_answers()),
        offline: true,
        extra: Default::default(),
    }
}

pub fn journal_analysis(text: &str) -> JournalAnalysis {
    JournalAnalysis {
        sentiment: sentiment_score(text),
        emotions: detect_emotions(text),
        offline: true,
        extra: Default::default(),
    }
}

pub fn rewrite(text: &str) -> RewriteResult {
    RewriteResult {
        rewrite: text.to_string(),
        removed_terms: Vec::new(),
        offline: true,
    }
}

pub fn checkin_questions() -> QuestionSet {
    QuestionSet {
        questions: vec![
            Question::new("mood", "How would you rate your mood today?"),
            Question::new("energy", "How energetic do you feel today?"),
            Question::new("sleep", "How well did you sleep last night?"),
            Question::new("stress", "How manageable did stress feel today?"),
            Question::new("connection", "How connected did you feel to others today?"),
        ],
    }
}

pub fn baseline_questions() -> QuestionSet {
    QuestionSet {
        questions: vec![
            Question::new(
                "baseline_mood",
                "Over the past two weeks, how would you rate your overall mood?",
            )
            .with_category("mood"),
            Question::new(
                "baseline_anxiety",
                "Over the past two weeks, how calm have you felt day to day?",
            )
            .with_category("anxiety"),
            Question::new(
                "baseline_sleep",
                "Over the past two weeks, how restful has your sleep been?",
            )
            .with_category("sleep"),
            Question::new(
                "baseline_energy",
                "Over the past two weeks, how would you rate your energy?",
            )
            .with_category("energy"),
            Question::new(
                "baseline_support",
                "How supported do you feel by the people around you?",
            )
            .with_category("support"),
        ],
    }
}

pub fn baseline_result() -> BaselineResult {
    let scores: BTreeMap<String, f64> = ["mood", "anxiety", "sleep", "energy", "support"]
        .iter()
        .map(|k| (k.to_string(), 50.0))
        .collect();
    BaselineResult {
        scores,
        summary: "Baseline scoring is unavailable offline; neutral scores were recorded."
            .to_string(),
        offline: true,
        extra: Default::default(),
    }
}

pub fn mood_series() -> MoodSeries {
    MoodSeries {
        series: Vec::new(),
        offline: true,
        extra: Default::default(),
    }
}

pub fn exercise() -> Exercise {
    Exercise {
        title: "Box Breathing".to_string(),
        description: "A slow, even breathing pattern to settle your nervous system.".to_string(),
        steps: vec![
            "Breathe in through your nose for 4 seconds.".to_string(),
            "Hold your breath for 4 seconds.".to_string(),
            "Breathe out slowly for 4 seconds.".to_string(),
            "Hold for 4 seconds, then repeat.".to_string(),
        ],
        duration_minutes: 4,
        offline: true,
        extra: Default::default(),
    }
}

pub fn safety_check() -> SafetyCheck {
    SafetyCheck {
        flagged: false,
        risk_level: "unknown".to_string(),
        resources: vec![
            "If you are in immediate danger, contact your local emergency number.".to_string(),
        ],
        offline: true,
        extra: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_index_formula() {
        assert_eq!(mood_index([4.0, 5.0, 3.0]), 75.0);
        assert_eq!(mood_index([2.0, 3.0]), 37.5);
        assert_eq!(mood_index([5.0, 4.0, 4.0]), 83.33);
        assert_eq!(mood_index([1.0, 1.0]), 0.0);
        assert_eq!(mood_index([5.0]), 100.0);
        assert_eq!(mood_index(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_mood_index_stays_in_range_for_valid_answers() {
        for a in 1..=5 {
            for b in 1..=5 {
                let idx = mood_index([a as f64, b as f64, 3.0]);
                assert!((0.0..=100.0).contains(&idx), "{idx} out of range");
            }
        }
    }

    #[test]
    fn test_checkin_fallback_ignores_identity_fields() {
        let json = r#"{"user_id": "42", "date": "2026-10-18", "mood": 4, "energy": 2}"#;
        let submission: CheckInSubmission = serde_json::from_str(json).unwrap();
        let result = checkin_result(&submission);
        assert_eq!(result.mood_index, 50.0);
        assert!(result.offline);
    }

    #[test]
    fn test_joy_only() {
        assert_eq!(detect_emotions("I am happy and good"), vec![Emotion::new("Joy", 0.7)]);
    }

    #[test]
    fn test_no_match_is_reflection() {
        assert_eq!(
            detect_emotions("The sky is blue"),
            vec![Emotion::new("Reflection", 0.5)]
        );
    }

    #[test]
    fn test_multiple_emotions_in_order() {
        let emotions = detect_emotions("WORRIED about work but grateful, and a little SAD");
        let labels: Vec<&str> = emotions.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Joy", "Sadness", "Anxiety"]);
        assert_eq!(emotions[1].score, 0.6);
    }

    #[test]
    fn test_sentiment_examples() {
        assert_eq!(sentiment_score("I am happy and good"), 1.0);
        assert_eq!(sentiment_score("The sky is blue"), 0.0);
        assert_eq!(sentiment_score(""), 0.0);
        assert_eq!(sentiment_score("bad bad day"), -1.0);
        // 20 words, net +1, divided by 2
        let text = format!("good {}", "word ".repeat(19));
        assert_eq!(sentiment_score(&text), 0.5);
    }

    #[test]
    fn test_sentiment_always_clamped() {
        let samples = [
            "happy happy happy happy happy",
            "awful terrible sad bad hate angry",
            "hopeless",
            "mixed good and bad and great and terrible",
        ];
        for s in samples {
            let score = sentiment_score(s);
            assert!((-1.0..=1.0).contains(&score), "{s}: {score}");
        }
    }

    #[test]
    fn test_rewrite_is_identity() {
        let text = "  Keep   this exactly\nas written. ";
        let result = rewrite(text);
        assert_eq!(result.rewrite, text);
        assert!(result.removed_terms.is_empty());
        assert!(result.offline);
    }

    #[test]
    fn test_static_payloads() {
        assert_eq!(checkin_questions().questions.len(), 5);
        assert!(baseline_questions()
            .questions
            .iter()
            .all(|q| q.category.is_some()));
        assert!(baseline_result().scores.values().all(|s| *s == 50.0));
        assert!(mood_series().series.is_empty());
        assert_eq!(exercise().steps.len(), 4);
        assert!(!safety_check().flagged);
    }
}
