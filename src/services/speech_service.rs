use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::SpeechError;

/// Google's TTS endpoint rejects longer inputs
const TTS_CHUNK_CHARS: usize = 100;

/// Configuration for translation and speech synthesis
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            language: "hi".to_string(),
            timeout_secs: 10,
        }
    }
}

impl SpeechConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            enabled: std::env::var("SPEECH_ENABLED")
                .ok()
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(defaults.enabled),
            language: std::env::var("SPEECH_LANGUAGE").unwrap_or(defaults.language),
            timeout_secs: std::env::var("SPEECH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, SpeechError>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// MP3 bytes for the spoken text
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError>;
}

/// Google Translate public endpoint
pub struct GoogleTranslator {
    client: Client,
}

impl GoogleTranslator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, SpeechError> {
        let response = self
            .client
            .get("https://translate.googleapis.com/translate_a/single")
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| SpeechError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SpeechError::BadResponse(format!(
                "translate returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SpeechError::BadResponse(e.to_string()))?;

        parse_translation(&body)
    }
}

/// Joins the translated segments of a `translate_a/single` response
fn parse_translation(body: &serde_json::Value) -> Result<String, SpeechError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| SpeechError::BadResponse("missing translation segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(SpeechError::BadResponse("empty translation".to_string()));
    }

    Ok(translated)
}

/// Google Translate text-to-speech endpoint
pub struct GoogleTts {
    client: Client,
}

impl GoogleTts {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let mut audio = Vec::new();
        for chunk in split_for_tts(text, TTS_CHUNK_CHARS) {
            let response = self
                .client
                .get("https://translate.google.com/translate_tts")
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", language),
                    ("client", "tw-ob"),
                ])
                .send()
                .await
                .map_err(|e| SpeechError::Request(e.to_string()))?;

            if !response.status().is_success() {
                return Err(SpeechError::BadResponse(format!(
                    "tts returned {}",
                    response.status()
                )));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| SpeechError::Request(e.to_string()))?;
            // mp3 frames concatenate cleanly
            audio.extend_from_slice(&bytes);
        }

        Ok(audio)
    }
}

/// Split on whitespace into pieces of at most `max_chars` characters.
/// A single word longer than the limit becomes its own piece.
fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Narrative in the target language, plus audio when synthesis succeeded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpokenSummary {
    pub text: String,
    /// `data:audio/mp3;base64,...`
    pub audio: Option<String>,
}

/// Translates the verdict narrative and renders it as speech.
/// Failures degrade (untranslated text, no audio) instead of erroring.
pub struct SpeechService {
    config: SpeechConfig,
    translator: Arc<dyn Translator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl SpeechService {
    pub fn new(config: SpeechConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({}), using defaults", e);
                Client::new()
            });

        if config.enabled {
            info!("Speech enabled (language: {})", config.language);
        } else {
            info!("Speech service disabled");
        }

        Self::with_collaborators(
            config,
            Arc::new(GoogleTranslator::new(client.clone())),
            Arc::new(GoogleTts::new(client)),
        )
    }

    pub fn with_collaborators(
        config: SpeechConfig,
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            config,
            translator,
            synthesizer,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub async fn narrate(&self, text: &str) -> SpokenSummary {
        if !self.config.enabled {
            return SpokenSummary {
                text: text.to_string(),
                audio: None,
            };
        }

        let translated = match self.translator.translate(text, &self.config.language).await {
            Ok(translated) => {
                info!("Translated summary to '{}'", self.config.language);
                translated
            }
            Err(e) => {
                warn!("Translation failed, using untranslated text: {}", e);
                text.to_string()
            }
        };

        let audio = match self.synthesizer.synthesize(&translated, &self.config.language).await {
            Ok(bytes) => {
                info!("Synthesized {} bytes of audio", bytes.len());
                Some(format!("data:audio/mp3;base64,{}", STANDARD.encode(bytes)))
            }
            Err(e) => {
                warn!("Speech synthesis failed: {}", e);
                None
            }
        };

        SpokenSummary {
            text: translated,
            audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, text: &str, target_language: &str) -> Result<String, SpeechError> {
            Ok(format!("[{}] {}", target_language, text))
        }
    }

    struct BrokenTranslator;

    #[async_trait]
    impl Translator for BrokenTranslator {
        async fn translate(&self, _text: &str, _target_language: &str) -> Result<String, SpeechError> {
            Err(SpeechError::Request("connection refused".to_string()))
        }
    }

    struct FixedAudio;

    #[async_trait]
    impl SpeechSynthesizer for FixedAudio {
        async fn synthesize(&self, text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
            if text.is_empty() {
                return Err(SpeechError::EmptyText);
            }
            Ok(b"ID3".to_vec())
        }
    }

    fn enabled() -> SpeechConfig {
        SpeechConfig {
            enabled: true,
            ..SpeechConfig::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_service_passes_text_through() {
        let service = SpeechService::with_collaborators(
            SpeechConfig::default(),
            Arc::new(EchoTranslator),
            Arc::new(FixedAudio),
        );
        let spoken = service.narrate("Acme news coverage is mostly Neutral.").await;
        assert_eq!(spoken.text, "Acme news coverage is mostly Neutral.");
        assert!(spoken.audio.is_none());
    }

    #[tokio::test]
    async fn test_narrate_translates_and_encodes_audio() {
        let service = SpeechService::with_collaborators(enabled(), Arc::new(EchoTranslator), Arc::new(FixedAudio));
        let spoken = service.narrate("Acme news coverage is mostly Positive.").await;
        assert_eq!(spoken.text, "[hi] Acme news coverage is mostly Positive.");
        assert_eq!(spoken.audio.as_deref(), Some("data:audio/mp3;base64,SUQz"));
    }

    #[tokio::test]
    async fn test_translation_failure_falls_back_to_untranslated_text() {
        let service = SpeechService::with_collaborators(enabled(), Arc::new(BrokenTranslator), Arc::new(FixedAudio));
        let spoken = service.narrate("Acme news coverage is mostly Negative.").await;
        assert_eq!(spoken.text, "Acme news coverage is mostly Negative.");
        assert!(spoken.audio.is_some());
    }

    #[tokio::test]
    async fn test_synthesis_failure_yields_no_audio() {
        let service = SpeechService::with_collaborators(enabled(), Arc::new(BrokenTranslator), Arc::new(FixedAudio));
        let spoken = service.narrate("").await;
        assert!(spoken.audio.is_none());
    }

    #[test]
    fn test_parse_translation() {
        let body = serde_json::json!([[["नमस्ते ", "Hello ", null], ["दुनिया", "world", null]], null, "en"]);
        assert_eq!(parse_translation(&body).unwrap(), "नमस्ते दुनिया");

        assert!(parse_translation(&serde_json::json!({"error": "nope"})).is_err());
        assert!(parse_translation(&serde_json::json!([[]])).is_err());
    }

    #[test]
    fn test_split_for_tts() {
        let chunks = split_for_tts("one two three four", 9);
        assert_eq!(chunks, vec!["one two", "three", "four"]);

        let chunks = split_for_tts("supercalifragilistic ok", 5);
        assert_eq!(chunks, vec!["supercalifragilistic", "ok"]);

        assert!(split_for_tts("   ", 10).is_empty());
    }
}
