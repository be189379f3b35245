use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Content type assumed when the TTS response does not declare one.
const DEFAULT_AUDIO_TYPE: &str = "audio/mpeg";

/// Recorded audio sent to speech-to-text.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AudioUpload {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    /// Read a recording from disk, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read audio file {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recording")
            .to_string();
        let mime_type = match path.extension().and_then(|e| e.to_str()) {
            Some("wav") => "audio/wav",
            Some("mp3") => "audio/mpeg",
            Some("ogg") => "audio/ogg",
            Some("m4a") => "audio/mp4",
            _ => "audio/webm",
        };
        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            bytes,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Synthesized speech returned by the TTS endpoint, held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AudioClip {
    pub fn new(content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.unwrap_or(DEFAULT_AUDIO_TYPE).to_string(),
            bytes,
        }
    }

    /// A self-contained `data:` URL any audio player or webview can load.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("Failed to write audio to {}", path.display()))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        let clip = AudioClip::new(Some("audio/wav"), b"RIFF".to_vec());
        assert_eq!(clip.to_data_url(), "data:audio/wav;base64,UklGRg==");
    }

    #[test]
    fn test_default_content_type() {
        let clip = AudioClip::new(None, Vec::new());
        assert_eq!(clip.content_type, "audio/mpeg");
        assert!(clip.is_empty());
    }

    #[test]
    fn test_upload_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.wav");
        std::fs::write(&path, b"abc").unwrap();

        let upload = AudioUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "note.wav");
        assert_eq!(upload.mime_type, "audio/wav");
        assert_eq!(upload.bytes, b"abc");
    }
}
