//! StorySession - the primary public API for running a story.
//!
//! Bundles the validated story graph, the UI text catalog, the flow state
//! machine, and the save manager behind one type. The front end drives it
//! with input events and reads state back for rendering; deferred save/load
//! work is executed by [`StorySession::process_pending`].

use thiserror::Error;
use tracing::info;

use crate::cohesion::{self, CohesionError};
use crate::config::EngineConfig;
use crate::flow::{FlowState, InputEvent};
use crate::persist::SaveManager;
use crate::story::{Choice, Scene, StoryGraph};
use crate::texts::UiTexts;

/// Errors from creating a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Story cohesion error: {0}")]
    Cohesion(#[from] CohesionError),
}

/// A running play session. Owns the mutable flow state exclusively; the
/// graph and texts are read-only after construction.
pub struct StorySession {
    config: EngineConfig,
    graph: StoryGraph,
    texts: UiTexts,
    flow: FlowState,
    saves: SaveManager,
}

impl StorySession {
    /// Create a session. The cohesion validator runs here; a graph that
    /// fails it never starts accepting input.
    pub fn new(
        config: EngineConfig,
        graph: StoryGraph,
        texts: UiTexts,
    ) -> Result<Self, SessionError> {
        cohesion::validate(&graph, &config.start_scene)?;
        info!("story is cohesive");

        let flow = FlowState::new(&config);
        let saves = SaveManager::new(&config.save_dir);
        Ok(Self {
            config,
            graph,
            texts,
            flow,
            saves,
        })
    }

    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        self.flow.handle_event(&self.graph, event);
    }

    /// Execute any deferred save/load the last event requested and feed the
    /// outcome back into the flow (as a popup, and for loads a scene jump).
    pub async fn process_pending(&mut self) {
        if let Some(scene_id) = self.flow.take_pending_save() {
            let result = self.saves.save(&scene_id).await.map(|_| ());
            self.flow.apply_save_result(result);
        }
        if self.flow.take_pending_load() {
            let result = self.saves.load().await;
            self.flow.apply_load_result(result);
        }
    }

    /// Per-frame housekeeping (popup expiry).
    pub fn tick(&mut self) {
        self.flow.tick();
    }

    /// False once the session reached its terminal state.
    pub fn running(&self) -> bool {
        self.flow.running
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn flow(&self) -> &FlowState {
        &self.flow
    }

    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    pub fn texts(&self) -> &UiTexts {
        &self.texts
    }

    /// The scene currently on screen, in the selected language.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.graph
            .scene(self.flow.language_code(), &self.flow.current_scene)
    }

    /// Choices out of the current scene, in display order.
    pub fn current_choices(&self) -> &[Choice] {
        self.graph
            .choices(self.flow.language_code(), &self.flow.current_scene)
    }

    /// Main menu labels for the selected language.
    pub fn menu_items(&self) -> &[String] {
        self.texts.menu_items(self.flow.language_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::StoryBuilder;
    use crate::testing::sample_story;

    #[tokio::test]
    async fn test_session_rejects_incohesive_story() {
        let config = EngineConfig::default();
        let mut builder = StoryBuilder::new(&config);
        builder.add_scene("start", "Alone.", "", None).await;
        let texts = UiTexts::new(&config);

        let result = StorySession::new(config, builder.build(), texts);
        assert!(matches!(
            result,
            Err(SessionError::Cohesion(CohesionError::NoChoices))
        ));
    }

    #[tokio::test]
    async fn test_session_accepts_cohesive_story() {
        let config = EngineConfig::default();
        let graph = sample_story().await;
        let texts = UiTexts::new(&config);

        let mut session = StorySession::new(config, graph, texts).expect("session");
        assert!(session.running());
        // No language selected yet, so no scene resolves
        assert!(session.current_scene().is_none());

        session.handle_event(InputEvent::Confirm); // pick English
        session.handle_event(InputEvent::Confirm); // Start
        let scene = session.current_scene().expect("start scene");
        assert_eq!(scene.character_name, "Doggo");
        assert_eq!(session.current_choices().len(), 2);
    }
}
