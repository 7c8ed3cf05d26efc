//! Engine configuration.
//!
//! An `EngineConfig` is an explicit value handed to the session and builders.
//! It owns the language catalog, the start scene id, and the save directory;
//! nothing in the engine reads global state.

use std::path::PathBuf;
use std::time::Duration;

/// A language available in a deployment: ISO 639-1 code plus display name.
///
/// The set of languages is closed per deployment and fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code, e.g. "en".
    pub code: String,

    /// Display name shown on the language menu, e.g. "English".
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Configuration for one engine run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Window/terminal caption.
    pub caption: String,

    /// Canonical authoring language; story text is written in this language.
    pub source_language: Language,

    /// Languages offered on the language menu. Includes the source language.
    pub languages: Vec<Language>,

    /// Scene id the story starts from.
    pub start_scene: String,

    /// Directory save files are written to.
    pub save_dir: PathBuf,

    /// How long transient popups stay on screen.
    pub popup_duration: Duration,

    /// Image shown for scenes without one of their own.
    pub placeholder_image: String,
}

impl EngineConfig {
    pub fn new(caption: impl Into<String>) -> Self {
        let source = Language::new("en", "English");
        Self {
            caption: caption.into(),
            source_language: source.clone(),
            languages: vec![
                source,
                Language::new("pt", "Portuguese"),
                Language::new("es", "Spanish"),
            ],
            start_scene: "start".to_string(),
            save_dir: default_save_dir(),
            popup_duration: Duration::from_secs(3),
            placeholder_image: "boilerplate.png".to_string(),
        }
    }

    /// Replace the language catalog. The source language should be included
    /// so players can keep playing in the authoring language.
    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    /// Set the canonical authoring language.
    pub fn with_source_language(mut self, language: Language) -> Self {
        self.source_language = language;
        self
    }

    /// Set the start scene id.
    pub fn with_start_scene(mut self, scene: impl Into<String>) -> Self {
        self.start_scene = scene.into();
        self
    }

    /// Override the save directory.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Override the popup duration.
    pub fn with_popup_duration(mut self, duration: Duration) -> Self {
        self.popup_duration = duration;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new("Novella Engine")
    }
}

/// Saves live next to the executable so shipped games find them without any
/// setup; falls back to the working directory when the executable path is
/// unknown.
pub fn default_save_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("saved_games")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.start_scene, "start");
        assert_eq!(config.source_language.code, "en");
        assert_eq!(config.languages.len(), 3);
        assert_eq!(config.popup_duration, Duration::from_secs(3));
        assert!(config.save_dir.ends_with("saved_games"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::new("My Story")
            .with_start_scene("intro")
            .with_save_dir("/tmp/saves")
            .with_languages(vec![Language::new("en", "English")]);

        assert_eq!(config.caption, "My Story");
        assert_eq!(config.start_scene, "intro");
        assert_eq!(config.save_dir, PathBuf::from("/tmp/saves"));
        assert_eq!(config.languages.len(), 1);
    }
}
