//! The bundled demo story.
//!
//! Three scenes in a loop with one exit, enough to exercise every screen and
//! both choice target kinds. Authored in English; with a translator the
//! whole catalog is populated at startup.

use novella_core::{ChoiceTarget, EngineConfig, StoryBuilder, StoryGraph, Translate, UiTexts};

/// Build the demo story graph and UI text catalog. Without a translator only
/// the source language is populated and the language menu still works, it
/// just shows English text everywhere.
pub async fn build_demo(
    config: &EngineConfig,
    translator: Option<Box<dyn Translate>>,
) -> (StoryGraph, UiTexts) {
    let texts = match &translator {
        Some(t) => UiTexts::build(config, t.as_ref()).await,
        None => UiTexts::new(config),
    };

    let mut builder = match translator {
        Some(t) => StoryBuilder::with_translator(config, t),
        None => StoryBuilder::new(config),
    };

    builder
        .add_scene(
            "start",
            "You wake up in a mysterious room. A small dog sits in the corner, \
             watching you with knowing eyes.",
            "Doggo",
            Some("doggo.png"),
        )
        .await;
    builder
        .add_choice("start", "Go through the door", ChoiceTarget::scene("door_scene"))
        .await;
    builder
        .add_choice("start", "Look out the window", ChoiceTarget::scene("window_scene"))
        .await;

    builder
        .add_scene(
            "door_scene",
            "The door opens into a long hallway lined with portraits. Every \
             portrait is of the same dog.",
            "Doggo",
            Some("doggo.png"),
        )
        .await;
    builder
        .add_choice("door_scene", "Follow the hallway", ChoiceTarget::scene("window_scene"))
        .await;
    builder
        .add_choice("door_scene", "Go back", ChoiceTarget::scene("start"))
        .await;

    builder
        .add_scene(
            "window_scene",
            "Through the window you see a garden in full bloom. The dog is \
             already there, somehow, wagging its tail.",
            "Doggo",
            Some("doggo.png"),
        )
        .await;
    builder
        .add_choice("window_scene", "Join the dog in the garden", ChoiceTarget::End)
        .await;
    builder
        .add_choice("window_scene", "Stay inside", ChoiceTarget::scene("door_scene"))
        .await;

    (builder.build(), texts)
}
