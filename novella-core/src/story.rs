//! Story graph model and authoring API.
//!
//! A story is a branching graph of scenes connected by choices, keyed per
//! language: the same logical scene exists once per language with translated
//! display text. The graph is built once at startup through [`StoryBuilder`]
//! and is immutable for the rest of the session.

use std::collections::HashMap;

use tracing::warn;

use crate::config::{EngineConfig, Language};
use crate::translate::Translate;

/// Where a choice leads: another scene, or the end of the story.
///
/// An explicit sum type instead of a sentinel scene-id string, so a typo in
/// an ending can't silently become a dangling scene reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceTarget {
    /// Jump to the scene with this id.
    Scene(String),

    /// Terminal: confirming this choice ends the session.
    End,
}

impl ChoiceTarget {
    pub fn scene(id: impl Into<String>) -> Self {
        Self::Scene(id.into())
    }

    /// The target scene id, or `None` for an ending.
    pub fn scene_id(&self) -> Option<&str> {
        match self {
            Self::Scene(id) => Some(id),
            Self::End => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

/// A node in the story graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Display text of the scene, in the language it is keyed under.
    pub description: String,

    /// Speaking character's name; may be empty.
    pub character_name: String,

    /// Image asset name; `None` falls back to the configured placeholder.
    pub image: Option<String>,
}

/// An edge out of a scene, with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub target: ChoiceTarget,
}

/// The full story: `language code -> scene id -> Scene` plus
/// `language code -> scene id -> ordered choices`.
///
/// Choice order is insertion order; it determines on-screen position and is
/// what the active selection index points into.
#[derive(Debug, Clone, Default)]
pub struct StoryGraph {
    scenes: HashMap<String, HashMap<String, Scene>>,
    choices: HashMap<String, HashMap<String, Vec<Choice>>>,
}

impl StoryGraph {
    /// Look up a scene in a given language.
    pub fn scene(&self, language: &str, scene_id: &str) -> Option<&Scene> {
        self.scenes.get(language).and_then(|m| m.get(scene_id))
    }

    /// Choices out of a scene, in insertion order. Empty when the scene has
    /// none.
    pub fn choices(&self, language: &str, scene_id: &str) -> &[Choice] {
        self.choices
            .get(language)
            .and_then(|m| m.get(scene_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Language codes the graph carries scenes for.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    /// Scene ids present for one language.
    pub fn scene_ids(&self, language: &str) -> impl Iterator<Item = &str> {
        self.scenes
            .get(language)
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }

    /// Every (language, scene id, choices) triple, across all languages.
    pub fn all_choice_lists(&self) -> impl Iterator<Item = (&str, &str, &[Choice])> {
        self.choices.iter().flat_map(|(lang, scenes)| {
            scenes
                .iter()
                .map(move |(id, list)| (lang.as_str(), id.as_str(), list.as_slice()))
        })
    }

    pub fn has_scenes(&self) -> bool {
        self.scenes.values().any(|m| !m.is_empty())
    }

    pub fn has_choices(&self) -> bool {
        self.choices.values().any(|m| !m.is_empty())
    }

    pub(crate) fn insert_scene(&mut self, language: &str, scene_id: &str, scene: Scene) {
        self.scenes
            .entry(language.to_string())
            .or_default()
            .insert(scene_id.to_string(), scene);
    }

    pub(crate) fn push_choice(&mut self, language: &str, scene_id: &str, choice: Choice) {
        self.choices
            .entry(language.to_string())
            .or_default()
            .entry(scene_id.to_string())
            .or_default()
            .push(choice);
    }
}

/// Authoring API for building a [`StoryGraph`].
///
/// Each `add_scene`/`add_choice` call inserts into every configured language,
/// translating from the source language on the way in, so the per-language
/// scene sets stay uniform by construction. Without a translator only the
/// source language is populated.
pub struct StoryBuilder {
    source: Language,
    languages: Vec<Language>,
    translator: Option<Box<dyn Translate>>,
    graph: StoryGraph,
}

impl StoryBuilder {
    /// A builder that keeps authored text verbatim in the source language
    /// only (translation disabled).
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            source: config.source_language.clone(),
            languages: vec![config.source_language.clone()],
            translator: None,
            graph: StoryGraph::default(),
        }
    }

    /// A builder that populates every configured language through the given
    /// translation service.
    pub fn with_translator(config: &EngineConfig, translator: Box<dyn Translate>) -> Self {
        Self {
            source: config.source_language.clone(),
            languages: config.languages.clone(),
            translator: Some(translator),
            graph: StoryGraph::default(),
        }
    }

    /// Add a scene. `image` of `None` uses the placeholder at render time.
    pub async fn add_scene(
        &mut self,
        scene_id: &str,
        description: &str,
        character_name: &str,
        image: Option<&str>,
    ) {
        for language in self.languages.clone() {
            let description = self.localized(description, &language).await;
            self.graph.insert_scene(
                &language.code,
                scene_id,
                Scene {
                    description,
                    character_name: character_name.to_string(),
                    image: image.map(str::to_string),
                },
            );
        }
    }

    /// Append a choice to a scene's ordered list. The first call for a scene
    /// creates its list implicitly.
    pub async fn add_choice(&mut self, scene_id: &str, label: &str, target: ChoiceTarget) {
        for language in self.languages.clone() {
            let label = self.localized(label, &language).await;
            self.graph.push_choice(
                &language.code,
                scene_id,
                Choice {
                    label,
                    target: target.clone(),
                },
            );
        }
    }

    /// Finish authoring.
    pub fn build(self) -> StoryGraph {
        self.graph
    }

    /// Translate `text` into `target`, or keep it verbatim for the source
    /// language. A service failure keeps the source text rather than aborting
    /// construction.
    async fn localized(&self, text: &str, target: &Language) -> String {
        if target.code == self.source.code {
            return text.to_string();
        }
        let Some(translator) = &self.translator else {
            return text.to_string();
        };
        match translator
            .translate(text, &self.source.code, &target.code)
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!(
                    target_language = %target.code,
                    error = %e,
                    "translation failed, keeping source text"
                );
                text.to_string()
            }
        }
    }
}
