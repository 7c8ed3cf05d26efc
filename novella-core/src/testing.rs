//! Testing utilities: a deterministic offline translator and a small
//! well-formed sample story.

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::story::{ChoiceTarget, StoryBuilder, StoryGraph};
use crate::translate::{Translate, TranslateError};

/// A translator that tags text with the target language instead of calling a
/// service: `"Hello"` translated to `pt` becomes `"[pt] Hello"`.
pub struct MockTranslator {
    fail: bool,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// A translator whose every call fails, for exercising the fallback
    /// path.
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translate for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        if self.fail {
            return Err(TranslateError::Service("mock failure".to_string()));
        }
        Ok(format!("[{target}] {text}"))
    }
}

/// The three-scene demo story, translation disabled: a cohesive graph with a
/// path back to start and an ending.
///
/// ```text
/// start --(door/window)--> door_scene --(right)--> window_scene --(leave)--> end
///   ^                            |                      |
///   +---------(left)-------------+       (back)---------+--> door_scene
/// ```
pub async fn sample_story() -> StoryGraph {
    sample_story_for(&EngineConfig::default()).await
}

/// Same story, built against a caller-supplied config (language catalog and
/// source language).
pub async fn sample_story_for(config: &EngineConfig) -> StoryGraph {
    let mut builder = StoryBuilder::new(config);

    builder
        .add_scene(
            "start",
            "You wake up in a mysterious room.",
            "Doggo",
            Some("doggo.png"),
        )
        .await;
    builder
        .add_choice("start", "Go through the door", ChoiceTarget::scene("door_scene"))
        .await;
    builder
        .add_choice("start", "Look out the window", ChoiceTarget::scene("door_scene"))
        .await;

    builder
        .add_scene("door_scene", "You find a hallway.", "Doggo", Some("doggo.png"))
        .await;
    builder
        .add_choice("door_scene", "Go to the right", ChoiceTarget::scene("window_scene"))
        .await;
    builder
        .add_choice("door_scene", "Go to the left", ChoiceTarget::scene("start"))
        .await;

    builder
        .add_scene(
            "window_scene",
            "You see a garden below.",
            "Doggo",
            Some("doggo.png"),
        )
        .await;
    builder
        .add_choice("window_scene", "Get out of here", ChoiceTarget::End)
        .await;
    builder
        .add_choice("window_scene", "Go back", ChoiceTarget::scene("door_scene"))
        .await;

    builder.build()
}
