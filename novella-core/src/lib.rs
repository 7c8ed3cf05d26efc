//! Visual novel engine core.
//!
//! This crate provides:
//! - A branching story graph with per-language scenes and choices
//! - A cohesion validator gating builds and session startup
//! - The flow state machine driving menus, dialogue, and choices
//! - Append-only save-game persistence
//! - A translation seam for building multilingual catalogs at startup
//!
//! # Quick Start
//!
//! ```ignore
//! use novella_core::{ChoiceTarget, EngineConfig, StoryBuilder, StorySession, UiTexts};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::new("My Story");
//!
//!     let mut story = StoryBuilder::new(&config);
//!     story.add_scene("start", "You wake up.", "Doggo", None).await;
//!     story.add_choice("start", "Stand up", ChoiceTarget::scene("hall")).await;
//!     story.add_choice("start", "Stay down", ChoiceTarget::End).await;
//!
//!     let texts = UiTexts::new(&config);
//!     let session = StorySession::new(config, story.build(), texts)?;
//!     // hand `session` to a front end and drive it with input events
//!     Ok(())
//! }
//! ```

pub mod cohesion;
pub mod config;
pub mod flow;
pub mod persist;
pub mod session;
pub mod story;
pub mod testing;
pub mod texts;
pub mod translate;

// Primary public API
pub use cohesion::{validate, CohesionError};
pub use config::{EngineConfig, Language};
pub use flow::{FlowState, InputEvent, MainMenuItem, Popup, PopupKind, Screen};
pub use persist::{LoadError, SaveError, SaveManager};
pub use session::{SessionError, StorySession};
pub use story::{Choice, ChoiceTarget, Scene, StoryBuilder, StoryGraph};
pub use texts::{ScreenText, UiTexts};
pub use translate::{Translate, TranslateError};
