//! End-to-end scenario tests: a full playthrough of the demo story, and the
//! save/load paths through a real session with a temporary save directory.

use novella_core::testing::{sample_story_for, MockTranslator};
use novella_core::{
    validate, EngineConfig, InputEvent, PopupKind, Screen, StoryBuilder, StorySession, UiTexts,
};
use tempfile::TempDir;

fn test_config(save_dir: &TempDir) -> EngineConfig {
    EngineConfig::new("Test Story").with_save_dir(save_dir.path())
}

async fn new_session(save_dir: &TempDir) -> StorySession {
    let config = test_config(save_dir);
    let graph = sample_story_for(&config).await;
    let texts = UiTexts::new(&config);
    StorySession::new(config, graph, texts).expect("cohesive story")
}

#[tokio::test]
async fn test_demo_story_is_cohesive() {
    let dir = TempDir::new().unwrap();
    let graph = sample_story_for(&test_config(&dir)).await;
    assert_eq!(validate(&graph, "start"), Ok(()));
}

#[tokio::test]
async fn test_full_playthrough_reaches_the_end() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    session.handle_event(InputEvent::Confirm); // English
    session.handle_event(InputEvent::Confirm); // Start

    assert_eq!(session.flow().screen, Screen::Dialogue);
    assert_eq!(session.flow().current_scene, "start");

    // Always take the first choice: start -> door_scene -> window_scene -> end
    for expected in ["door_scene", "window_scene"] {
        session.handle_event(InputEvent::Confirm); // open choices
        session.handle_event(InputEvent::Confirm); // take index 0
        assert_eq!(session.flow().current_scene, expected);
    }

    session.handle_event(InputEvent::Confirm);
    session.handle_event(InputEvent::Confirm); // "Get out of here" -> end
    assert_eq!(session.flow().screen, Screen::Terminated);
    assert!(!session.running());
}

#[tokio::test]
async fn test_save_then_load_restores_scene() {
    let dir = TempDir::new().unwrap();

    // First session: play to window_scene and save there
    let mut session = new_session(&dir).await;
    session.handle_event(InputEvent::Confirm);
    session.handle_event(InputEvent::Confirm);
    for _ in 0..2 {
        session.handle_event(InputEvent::Confirm);
        session.handle_event(InputEvent::Confirm);
    }
    assert_eq!(session.flow().current_scene, "window_scene");

    session.handle_event(InputEvent::Save);
    session.process_pending().await;
    assert_eq!(
        session.flow().popup.as_ref().map(|p| p.kind),
        Some(PopupKind::SaveSuccess)
    );

    // Second session: Load from the main menu lands on the saved scene
    let mut restored = new_session(&dir).await;
    restored.handle_event(InputEvent::Confirm); // English
    restored.handle_event(InputEvent::Down); // Load
    restored.handle_event(InputEvent::Confirm);
    restored.process_pending().await;

    assert_eq!(restored.flow().screen, Screen::Dialogue);
    assert_eq!(restored.flow().current_scene, "window_scene");
    assert_eq!(
        restored.flow().popup.as_ref().map(|p| p.kind),
        Some(PopupKind::LoadSuccess)
    );
}

#[tokio::test]
async fn test_load_without_save_shows_failure_popup() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session(&dir).await;

    session.handle_event(InputEvent::Confirm); // English
    session.handle_event(InputEvent::Down); // Load
    session.handle_event(InputEvent::Confirm);
    session.process_pending().await;

    assert_eq!(session.flow().screen, Screen::MainMenu);
    assert_eq!(
        session.flow().popup.as_ref().map(|p| p.kind),
        Some(PopupKind::LoadFailed)
    );
    assert!(session.running());
}

#[tokio::test]
async fn test_loading_keeps_the_session_language() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir)
        .with_popup_duration(std::time::Duration::from_secs(1));

    // Build a translated story so a second language exists
    let mut builder =
        StoryBuilder::with_translator(&config, Box::new(MockTranslator::new()));
    builder.add_scene("start", "A room.", "", None).await;
    builder
        .add_choice(
            "start",
            "onward",
            novella_core::ChoiceTarget::scene("start"),
        )
        .await;
    builder
        .add_choice("start", "leave", novella_core::ChoiceTarget::End)
        .await;
    let graph = builder.build();
    let texts = UiTexts::build(&config, &MockTranslator::new()).await;

    // Save while playing in English
    let mut session =
        StorySession::new(config.clone(), graph.clone(), texts.clone()).expect("session");
    session.handle_event(InputEvent::Confirm); // English
    session.handle_event(InputEvent::Confirm); // Start
    session.handle_event(InputEvent::Save);
    session.process_pending().await;

    // Load while playing in Portuguese: the scene comes back, the language
    // stays Portuguese
    let mut restored = StorySession::new(config, graph, texts).expect("session");
    restored.handle_event(InputEvent::Down); // Portuguese
    restored.handle_event(InputEvent::Confirm);
    restored.handle_event(InputEvent::Down); // Load
    restored.handle_event(InputEvent::Confirm);
    restored.process_pending().await;

    assert_eq!(restored.flow().current_scene, "start");
    assert_eq!(
        restored.flow().selected_language.as_ref().unwrap().code,
        "pt"
    );
    assert_eq!(
        restored.current_scene().unwrap().description,
        "[pt] A room."
    );
}
