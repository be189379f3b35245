//! Request and response models for the wellness backend.
//!
//! This module contains the typed shapes exchanged with the backend:
//!
//! - `Question`, `QuestionSet`: check-in and baseline questionnaires
//! - `CheckInSubmission`, `CheckInResult`: daily mood check-ins
//! - `JournalAnalysis`, `Emotion`, `JournalUpload`: journal entry analysis
//! - `ChatOptions`, `ChatReply`: companion chat
//! - `AudioUpload`, `Transcript`, `AudioClip`: speech endpoints
//! - Misc wellness types: baseline scores, rewrites, mood series, exercises,
//!   safety checks, health status

pub mod chat;
pub mod checkin;
pub mod journal;
pub mod speech;
pub mod wellness;

pub use chat::{ChatOptions, ChatReply};
pub use checkin::{CheckInResult, CheckInSubmission, Question, QuestionSet};
pub use journal::{Emotion, JournalAnalysis, JournalUpload};
pub use speech::{AudioClip, AudioUpload, Transcript};
pub use wellness::{
    BaselineResult, Exercise, HealthStatus, MoodPoint, MoodSeries, MoodSeriesQuery,
    RewriteResult, SafetyCheck,
};

/// Serde helper: skip `offline` when it is false so live payloads echo back
/// unchanged.
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
