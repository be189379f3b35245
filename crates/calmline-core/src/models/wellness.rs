//! Smaller wellness payloads: health, baseline scoring, rewrites, mood
//! series, guided exercises, and safety checks.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Result of `GET /health`. Offline results carry the failure message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    pub fn offline(error: String) -> Self {
        Self {
            status: "offline".to_string(),
            error: Some(error),
            extra: Default::default(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.status == "offline"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineResult {
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub offline: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteResult {
    #[serde(default)]
    pub rewrite: String,
    #[serde(default)]
    pub removed_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub offline: bool,
}

/// Query parameters for `GET /analytics/series`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodSeriesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

/// One day of mood history. `date` is kept as the backend sent it, which may
/// be a plain date or a full timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub mood_index: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MoodPoint {
    /// Calendar day of the point, accepting `YYYY-MM-DD` or RFC 3339.
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&self.date)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSeries {
    #[serde(default)]
    pub series: Vec<MoodPoint>,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub offline: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MoodSeries {
    /// Mean mood index over the series, if there are any points.
    pub fn average(&self) -> Option<f64> {
        if self.series.is_empty() {
            return None;
        }
        let total: f64 = self.series.iter().map(|p| p.mood_index).sum();
        Some(total / self.series.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub offline: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyCheck {
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub offline: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_offline() {
        let health = HealthStatus::offline("boom".to_string());
        assert!(health.is_offline());
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json, serde_json::json!({"status": "offline", "error": "boom"}));
    }

    #[test]
    fn test_mood_series_parse_and_average() {
        let json = r#"{"series": [
            {"date": "2026-10-16", "mood_index": 50.0},
            {"date": "2026-10-17", "mood_index": 75.0}
        ]}"#;
        let series: MoodSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.series[0].day(), NaiveDate::from_ymd_opt(2026, 10, 16));
        assert_eq!(series.average(), Some(62.5));
        assert!(!series.offline);
    }

    #[test]
    fn test_empty_series_has_no_average() {
        let series = MoodSeries {
            series: Vec::new(),
            offline: true,
            extra: Default::default(),
        };
        assert_eq!(series.average(), None);
    }

    #[test]
    fn test_loose_live_payloads_still_parse() {
        let series: MoodSeries = serde_json::from_str(
            r#"{"series": [{"date": "2026-10-17T08:00:00Z", "mood_index": 60.0, "note": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(series.series[0].day(), NaiveDate::from_ymd_opt(2026, 10, 17));
        assert_eq!(series.series[0].extra["note"], "x");

        let exercise: Exercise = serde_json::from_str(r#"{"name": "Grounding"}"#).unwrap();
        assert!(exercise.title.is_empty());
        assert_eq!(exercise.extra["name"], "Grounding");

        let safety: SafetyCheck = serde_json::from_str(r#"{"risk_level": "low"}"#).unwrap();
        assert!(!safety.flagged);

        let health: HealthStatus = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(!health.is_offline());
    }

    #[test]
    fn test_unparseable_day() {
        let point = MoodPoint {
            date: "last tuesday".to_string(),
            mood_index: 10.0,
            extra: Default::default(),
        };
        assert_eq!(point.day(), None);
    }
}
