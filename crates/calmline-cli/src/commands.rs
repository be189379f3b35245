//! Subcommand handlers.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use calmline_core::models::{
    AudioUpload, ChatOptions, CheckInSubmission, JournalAnalysis, JournalUpload, MoodSeriesQuery,
};
use calmline_core::{ApiClient, Config};

use crate::Command;

/// Parse a `question_id=value` answer.
pub fn parse_answer(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected question_id=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing question id in '{}'", raw));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((key.to_string(), value))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Trim and check the scheme of a base URL before it is saved.
fn parse_base_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("Base URL must start with http:// or https://, got '{}'", raw);
    }
    Ok(url.to_string())
}

fn report_dominant_emotion(analysis: &JournalAnalysis) {
    if let Some(emotion) = analysis.dominant_emotion() {
        eprintln!("Dominant emotion: {} ({:.2})", emotion.label, emotion.score);
    }
}

fn guess_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("txt") | Some("md") => "text/plain",
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

pub(crate) async fn run(client: &mut ApiClient, config: &mut Config, command: Command) -> Result<()> {
    match command {
        Command::Health => print_json(&client.health().await),
        Command::Login { token } => {
            let token = match token {
                Some(token) => token,
                None => rpassword::prompt_password("Token: ")?,
            };
            let token = token.trim().to_string();
            if token.is_empty() {
                anyhow::bail!("Token must not be empty");
            }
            client.set_token(token)?;
            eprintln!("Token saved.");
            Ok(())
        }
        Command::Logout => {
            client.remove_token()?;
            eprintln!("Token removed.");
            Ok(())
        }
        Command::Status => {
            let health = client.health().await;
            print_json(&serde_json::json!({
                "base_url": client.base_url(),
                "authenticated": client.is_authenticated(),
                "offline": client.is_offline(),
                "health": health,
            }))
        }
        Command::SetUrl { url } => {
            config.api_base_url = Some(parse_base_url(&url)?);
            config.save()?;
            eprintln!("Saved base URL {}", config.base_url());
            Ok(())
        }
        Command::Questions { baseline } => {
            let questions = if baseline {
                client.get_baseline_questions().await
            } else {
                client.get_checkin_questions().await
            };
            print_json(&questions)
        }
        Command::Checkin {
            user_id,
            date,
            answers,
        } => {
            let mut submission = CheckInSubmission {
                user_id,
                date,
                ..Default::default()
            };
            for (question, value) in answers {
                submission = submission.answer(&question, value);
            }
            print_json(&client.submit_checkin(&submission).await)
        }
        Command::Journal { text, file } => match (text, file) {
            (_, Some(path)) => {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("entry");
                let upload = JournalUpload::new(name, guess_mime(&path), bytes);
                let analysis = client.analyze_journal_entry_upload(upload).await?;
                report_dominant_emotion(&analysis);
                print_json(&analysis)
            }
            (Some(text), None) => {
                let analysis = client.analyze_journal_entry(&text).await;
                report_dominant_emotion(&analysis);
                print_json(&analysis)
            }
            (None, None) => anyhow::bail!("Provide journal text or --file"),
        },
        Command::Baseline { answers } => {
            let answers: BTreeMap<String, f64> = answers.into_iter().collect();
            print_json(&client.submit_baseline(&answers).await)
        }
        Command::Rewrite { text } => print_json(&client.rewrite_text(&text).await),
        Command::Series { user_id, days } => {
            let query = MoodSeriesQuery { user_id, days };
            let series = client.get_mood_series(&query).await;
            if let Some(avg) = series.average() {
                eprintln!("Average mood index over {} days: {:.2}", series.series.len(), avg);
            }
            print_json(&series)
        }
        Command::Exercise => print_json(&client.get_exercise().await),
        Command::Safety { text } => print_json(&client.safety_check(&text).await),
        Command::Chat {
            session_id,
            message,
        } => {
            let reply = client
                .chat(&session_id, &message, &ChatOptions::default())
                .await?;
            print_json(&reply)
        }
        Command::Stt { file } => {
            let audio = AudioUpload::from_path(&file)?;
            print_json(&client.stt(audio).await?)
        }
        Command::Tts { text, voice, out } => {
            let clip = client.tts(&text, voice.as_deref()).await?;
            if clip.is_empty() {
                warn!("Backend returned empty audio");
            }
            match out {
                Some(path) => {
                    clip.save(&path)?;
                    eprintln!("Wrote {} bytes to {}", clip.bytes.len(), path.display());
                }
                None => println!("{}", clip.to_data_url()),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("mood=4"), Ok(("mood".to_string(), 4.0)));
        assert_eq!(parse_answer(" sleep = 2.5 "), Ok(("sleep".to_string(), 2.5)));
        assert!(parse_answer("mood").is_err());
        assert!(parse_answer("=3").is_err());
        assert!(parse_answer("mood=great").is_err());
    }

    #[test]
    fn test_parse_base_url() {
        assert_eq!(
            parse_base_url(" https://calm.example.com/ ").unwrap(),
            "https://calm.example.com"
        );
        assert_eq!(parse_base_url("http://localhost:8000").unwrap(), "http://localhost:8000");
        assert!(parse_base_url("localhost:8000").is_err());
        assert!(parse_base_url("").is_err());
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("entry.md")), "text/plain");
        assert_eq!(guess_mime(Path::new("voice.webm")), "audio/webm");
        assert_eq!(guess_mime(Path::new("blob")), "application/octet-stream");
    }
}
