//! Flow state machine: screens, selection, and session state.
//!
//! The machine is pure with respect to I/O. Save and load are requested by
//! setting a pending slot; the run loop performs the file operation and feeds
//! the outcome back through [`FlowState::apply_save_result`] /
//! [`FlowState::apply_load_result`]. One event is fully processed before the
//! next; nothing suspends mid-transition.

use std::time::{Duration, Instant};

use crate::config::{EngineConfig, Language};
use crate::persist::{LoadError, SaveError};
use crate::story::{ChoiceTarget, StoryGraph};

/// The screens a session moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    LanguageMenu,
    MainMenu,
    About,
    Help,
    Dialogue,
    Choice,
    Terminated,
}

/// Input events the machine consumes. The front end maps raw key events to
/// these; `Cancel` is the Escape key, `Quit` a hard quit (window close or
/// Ctrl-C).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Confirm,
    Save,
    Cancel,
    Quit,
}

/// Main menu entries in fixed display order. Dispatch goes through this enum;
/// translated labels are display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuItem {
    Start,
    Load,
    About,
    Help,
    Quit,
}

impl MainMenuItem {
    pub const ALL: [MainMenuItem; 5] = [
        MainMenuItem::Start,
        MainMenuItem::Load,
        MainMenuItem::About,
        MainMenuItem::Help,
        MainMenuItem::Quit,
    ];
}

/// What a popup reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    SaveSuccess,
    SaveFailed,
    LoadSuccess,
    LoadFailed,
}

impl PopupKind {
    pub fn message(self) -> &'static str {
        match self {
            PopupKind::SaveSuccess => "Game saved successfully!",
            PopupKind::SaveFailed => "Failed to save game!",
            PopupKind::LoadSuccess => "Game loaded successfully!",
            PopupKind::LoadFailed => "Failed to load game!",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, PopupKind::SaveFailed | PopupKind::LoadFailed)
    }
}

/// A transient, auto-expiring notice shown over the current screen. Never
/// blocks input.
#[derive(Debug, Clone)]
pub struct Popup {
    pub kind: PopupKind,
    pub message: String,
    created: Instant,
    duration: Duration,
}

impl Popup {
    pub fn new(kind: PopupKind, duration: Duration) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            created: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created.elapsed() >= self.duration
    }

    /// Time left before auto-expiry, zero when already expired.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.created.elapsed())
    }
}

/// The mutable heart of a play session.
///
/// Owned exclusively by the session/run loop; the story graph is shared
/// read-only.
#[derive(Debug)]
pub struct FlowState {
    pub screen: Screen,
    pub selected_language: Option<Language>,
    pub current_scene: String,
    pub active_index: usize,
    pub popup: Option<Popup>,
    pub running: bool,

    languages: Vec<Language>,
    start_scene: String,
    popup_duration: Duration,
    pending_save: Option<String>,
    pending_load: bool,
}

impl FlowState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            screen: Screen::LanguageMenu,
            selected_language: None,
            current_scene: config.start_scene.clone(),
            active_index: 0,
            popup: None,
            running: true,
            languages: config.languages.clone(),
            start_scene: config.start_scene.clone(),
            popup_duration: config.popup_duration,
            pending_save: None,
            pending_load: false,
        }
    }

    /// Languages offered on the language menu.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Code of the language the player confirmed, or the empty string before
    /// confirmation (the language menu is the only screen reachable then).
    pub fn language_code(&self) -> &str {
        self.selected_language
            .as_ref()
            .map(|l| l.code.as_str())
            .unwrap_or("")
    }

    /// Dispatch one input event against the current screen.
    pub fn handle_event(&mut self, graph: &StoryGraph, event: InputEvent) {
        if event == InputEvent::Quit {
            self.terminate();
            return;
        }
        match self.screen {
            Screen::LanguageMenu => self.handle_language_menu(event),
            Screen::MainMenu => self.handle_main_menu(event),
            Screen::About | Screen::Help => self.handle_static_screen(event),
            Screen::Dialogue => self.handle_dialogue(event),
            Screen::Choice => self.handle_choice(graph, event),
            Screen::Terminated => {}
        }
    }

    fn handle_language_menu(&mut self, event: InputEvent) {
        match event {
            InputEvent::Up => self.move_up(self.languages.len()),
            InputEvent::Down => self.move_down(self.languages.len()),
            InputEvent::Confirm => {
                self.selected_language = self.languages.get(self.active_index).cloned();
                self.screen = Screen::MainMenu;
                self.active_index = 0;
            }
            InputEvent::Cancel => self.terminate(),
            InputEvent::Save | InputEvent::Quit => {}
        }
    }

    fn handle_main_menu(&mut self, event: InputEvent) {
        match event {
            InputEvent::Up => self.move_up(MainMenuItem::ALL.len()),
            InputEvent::Down => self.move_down(MainMenuItem::ALL.len()),
            InputEvent::Confirm => match MainMenuItem::ALL[self.active_index] {
                MainMenuItem::Start => {
                    self.current_scene = self.start_scene.clone();
                    self.screen = Screen::Dialogue;
                    self.active_index = 0;
                }
                MainMenuItem::Load => {
                    self.pending_load = true;
                }
                MainMenuItem::About => {
                    self.screen = Screen::About;
                    self.active_index = 0;
                }
                MainMenuItem::Help => {
                    self.screen = Screen::Help;
                    self.active_index = 0;
                }
                MainMenuItem::Quit => self.terminate(),
            },
            InputEvent::Cancel => self.terminate(),
            InputEvent::Save | InputEvent::Quit => {}
        }
    }

    fn handle_static_screen(&mut self, event: InputEvent) {
        if event == InputEvent::Cancel {
            self.screen = Screen::MainMenu;
            self.active_index = 0;
        }
    }

    fn handle_dialogue(&mut self, event: InputEvent) {
        match event {
            InputEvent::Confirm => {
                self.screen = Screen::Choice;
                self.active_index = 0;
            }
            InputEvent::Save => self.request_save(),
            InputEvent::Cancel => self.terminate(),
            _ => {}
        }
    }

    fn handle_choice(&mut self, graph: &StoryGraph, event: InputEvent) {
        let choices = graph.choices(self.language_code(), &self.current_scene);
        match event {
            InputEvent::Up => self.move_up(choices.len()),
            InputEvent::Down => self.move_down(choices.len()),
            InputEvent::Save => self.request_save(),
            InputEvent::Confirm => {
                let Some(choice) = choices.get(self.active_index) else {
                    return;
                };
                match &choice.target {
                    ChoiceTarget::End => self.terminate(),
                    ChoiceTarget::Scene(next) => {
                        self.current_scene = next.clone();
                        self.screen = Screen::Dialogue;
                        self.active_index = 0;
                    }
                }
            }
            InputEvent::Cancel => self.terminate(),
            InputEvent::Quit => {}
        }
    }

    /// Advance per-frame state: expire the popup when its duration has
    /// passed.
    pub fn tick(&mut self) {
        if self.popup.as_ref().is_some_and(Popup::is_expired) {
            self.popup = None;
        }
    }

    /// Scene id queued for saving, if the player hit the save key since the
    /// last call.
    pub fn take_pending_save(&mut self) -> Option<String> {
        self.pending_save.take()
    }

    /// True when a load was requested since the last call.
    pub fn take_pending_load(&mut self) -> bool {
        std::mem::take(&mut self.pending_load)
    }

    /// Feed back the outcome of a save the run loop performed.
    pub fn apply_save_result(&mut self, result: Result<(), SaveError>) {
        let kind = match result {
            Ok(()) => PopupKind::SaveSuccess,
            Err(_) => PopupKind::SaveFailed,
        };
        self.show_popup(kind);
    }

    /// Feed back the outcome of a load the run loop performed. Success jumps
    /// into the game at the restored scene; failure leaves the main menu up.
    pub fn apply_load_result(&mut self, result: Result<String, LoadError>) {
        match result {
            Ok(scene_id) => {
                self.current_scene = scene_id;
                self.screen = Screen::Dialogue;
                self.active_index = 0;
                self.show_popup(PopupKind::LoadSuccess);
            }
            Err(_) => self.show_popup(PopupKind::LoadFailed),
        }
    }

    fn request_save(&mut self) {
        self.pending_save = Some(self.current_scene.clone());
    }

    fn show_popup(&mut self, kind: PopupKind) {
        self.popup = Some(Popup::new(kind, self.popup_duration));
    }

    fn terminate(&mut self) {
        self.screen = Screen::Terminated;
        self.running = false;
    }

    // Cyclic cursor movement over the currently displayed list. A length of
    // zero is unreachable for validated graphs; guard anyway.
    fn move_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.active_index = (self.active_index + len - 1) % len;
    }

    fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.active_index = (self.active_index + 1) % len;
    }
}
