//! Static UI text catalog.
//!
//! Menu labels, the About and Help screens, and the in-game hint line are
//! authored in the source language and machine translated into the rest of
//! the catalog at startup, with the same keep-source-on-failure policy as
//! story text.

use std::collections::HashMap;

use tracing::warn;

use crate::config::{EngineConfig, Language};
use crate::flow::MainMenuItem;
use crate::translate::Translate;

const MENU_LABELS: [&str; 5] = ["Start", "Load", "About", "Help", "Quit"];

const ABOUT_TITLE: &str = "About This Game";
const ABOUT_BODY: &str = "Welcome to the heart of storytelling, where imagination meets \
interactivity. With this engine, creators weave branching narratives and bring characters \
to life, offering players a unique journey with each decision they make.\n\n\
Key features:\n\n\
- Dynamic storytelling: stories with multiple paths and endings based on your choices.\n\
- Save and resume: save your progress and return to your story at any time.\n\
- Multilingual support: stories crafted in one language bloom into many through the \
built-in translation toolkit.";

const HELP_TITLE: &str = "How to Play";
const HELP_BODY: &str =
    "Use the arrow keys to navigate the menus and press Enter to select an option. \
Press S during the story to save your progress, and Escape to leave.";

const HINT_EXIT: &str = "Exit now";
const HINT_SAVE: &str = "Save";

/// A titled block of screen text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenText {
    pub title: String,
    pub body: String,
}

/// Per-language UI strings, built once at startup.
#[derive(Debug, Clone)]
pub struct UiTexts {
    menu_items: HashMap<String, Vec<String>>,
    about: HashMap<String, ScreenText>,
    help: HashMap<String, ScreenText>,
    hints: HashMap<String, (String, String)>,
    fallback: String,
}

impl UiTexts {
    /// Source-language-only catalog (translation disabled).
    pub fn new(config: &EngineConfig) -> Self {
        let mut texts = Self::empty(&config.source_language.code);
        texts.insert_language(&config.source_language.code, None);
        texts
    }

    /// Build the catalog for every configured language through the given
    /// translation service.
    pub async fn build(config: &EngineConfig, translator: &dyn Translate) -> Self {
        let mut texts = Self::empty(&config.source_language.code);
        for language in &config.languages {
            if language.code == config.source_language.code {
                texts.insert_language(&language.code, None);
            } else {
                texts
                    .insert_language_translated(config, language, translator)
                    .await;
            }
        }
        texts
    }

    fn empty(fallback: &str) -> Self {
        Self {
            menu_items: HashMap::new(),
            about: HashMap::new(),
            help: HashMap::new(),
            hints: HashMap::new(),
            fallback: fallback.to_string(),
        }
    }

    fn insert_language(&mut self, code: &str, translated: Option<LanguagePack>) {
        let pack = translated.unwrap_or_else(LanguagePack::source);
        self.menu_items.insert(code.to_string(), pack.menu_items);
        self.about.insert(code.to_string(), pack.about);
        self.help.insert(code.to_string(), pack.help);
        self.hints.insert(code.to_string(), pack.hints);
    }

    async fn insert_language_translated(
        &mut self,
        config: &EngineConfig,
        language: &Language,
        translator: &dyn Translate,
    ) {
        let t = |text: &'static str| translate_or_source(translator, config, language, text);

        let mut menu_items = Vec::with_capacity(MENU_LABELS.len());
        for label in MENU_LABELS {
            menu_items.push(t(label).await);
        }

        let pack = LanguagePack {
            menu_items,
            about: ScreenText {
                title: t(ABOUT_TITLE).await,
                body: t(ABOUT_BODY).await,
            },
            help: ScreenText {
                title: t(HELP_TITLE).await,
                body: t(HELP_BODY).await,
            },
            hints: (t(HINT_EXIT).await, t(HINT_SAVE).await),
        };
        self.insert_language(&language.code, Some(pack));
    }

    /// Main menu labels in [`MainMenuItem::ALL`] order.
    pub fn menu_items(&self, language: &str) -> &[String] {
        self.lookup(&self.menu_items, language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Label for one menu item.
    pub fn menu_label(&self, language: &str, item: MainMenuItem) -> &str {
        let index = MainMenuItem::ALL
            .iter()
            .position(|&i| i == item)
            .unwrap_or(0);
        self.menu_items(language)
            .get(index)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn about(&self, language: &str) -> Option<&ScreenText> {
        self.lookup(&self.about, language)
    }

    pub fn help(&self, language: &str) -> Option<&ScreenText> {
        self.lookup(&self.help, language)
    }

    /// (exit hint, save hint) shown under the dialogue box.
    pub fn hints(&self, language: &str) -> Option<&(String, String)> {
        self.lookup(&self.hints, language)
    }

    fn lookup<'a, T>(&self, map: &'a HashMap<String, T>, language: &str) -> Option<&'a T> {
        map.get(language).or_else(|| map.get(&self.fallback))
    }
}

struct LanguagePack {
    menu_items: Vec<String>,
    about: ScreenText,
    help: ScreenText,
    hints: (String, String),
}

impl LanguagePack {
    fn source() -> Self {
        Self {
            menu_items: MENU_LABELS.iter().map(|s| s.to_string()).collect(),
            about: ScreenText {
                title: ABOUT_TITLE.to_string(),
                body: ABOUT_BODY.to_string(),
            },
            help: ScreenText {
                title: HELP_TITLE.to_string(),
                body: HELP_BODY.to_string(),
            },
            hints: (HINT_EXIT.to_string(), HINT_SAVE.to_string()),
        }
    }
}

async fn translate_or_source(
    translator: &dyn Translate,
    config: &EngineConfig,
    language: &Language,
    text: &str,
) -> String {
    match translator
        .translate(text, &config.source_language.code, &language.code)
        .await
    {
        Ok(translated) => translated,
        Err(e) => {
            warn!(
                target_language = %language.code,
                error = %e,
                "UI text translation failed, keeping source text"
            );
            text.to_string()
        }
    }
}
