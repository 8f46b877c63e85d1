//! Keypress Adventure: a menu-driven text adventure.
//!
//! Every choice is a single key: `[N]`-style keys for exits and items from the
//! world data, plus the fixed action letters `S`, `I`, `D`, `E`, `U` and `C`.

pub mod debounce;
pub mod error;
pub mod logic;
pub mod present;
pub mod render;
pub mod save;
pub mod state;
pub mod world;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use error::DataLoadError;
use state::{AdventureState, LocationId};
use world::load_adventure;

/// The bundled adventure.
pub const ADVENTURE_DATA: &str = include_str!("../../assets/adventure.json");

pub const START_LOCATION: LocationId = LocationId(0);

/// Log entries kept for the log panel.
pub const LOG_CAPACITY: usize = 50;

/// Browser console warning; compiled out off the web.
pub(crate) fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

pub struct AdventureGame {
    pub state: AdventureState,
}

impl AdventureGame {
    pub fn new() -> Result<Self, DataLoadError> {
        Self::from_source(ADVENTURE_DATA)
    }

    pub fn from_source(source: &str) -> Result<Self, DataLoadError> {
        let world = load_adventure(source)?;
        let mut state = AdventureState::new(world, START_LOCATION)?;

        #[cfg(target_arch = "wasm32")]
        let restored = save::load_game(&mut state);
        #[cfg(not(target_arch = "wasm32"))]
        let restored = false;
        if restored {
            state.add_log("Saved game restored.", false);
        }

        let intro = format!("You find yourself in the {}.", state.current_location().title);
        state.add_log(&intro, true);
        Ok(Self { state })
    }

    /// Returns true if the event resolved to an action.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        #[cfg(target_arch = "wasm32")]
        let before = save::progress(&self.state);

        let consumed = match *event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => {
                logic::key_up(&mut self.state, key);
                false
            }
            InputEvent::Click(key) => {
                let consumed = self.key_down(key);
                logic::key_up(&mut self.state, key);
                consumed
            }
            InputEvent::FocusLost => {
                self.state.latch.reset();
                false
            }
        };
        #[cfg(target_arch = "wasm32")]
        save::save_if_changed(&self.state, before);
        consumed
    }

    fn key_down(&mut self, key: char) -> bool {
        match logic::key_down(&mut self.state, key) {
            Ok(outcome) => outcome.is_some(),
            Err(unsupported) => {
                self.state.add_log(&format!("{}.", unsupported), true);
                true
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::Mode;

    #[test]
    fn bundled_game_starts_at_start_location() {
        let game = AdventureGame::new().unwrap();
        assert_eq!(game.state.location, START_LOCATION);
        assert_eq!(game.state.mode, Mode::Exploring);
        assert!(game.state.log.last().unwrap().text.starts_with("You find yourself"));
    }

    #[test]
    fn broken_world_is_fatal() {
        assert!(AdventureGame::from_source("not json").is_err());
    }

    #[test]
    fn key_down_and_up_drive_one_action() {
        let mut game = AdventureGame::new().unwrap();
        assert!(game.handle_input(&InputEvent::KeyDown('i')));
        assert!(!game.handle_input(&InputEvent::KeyDown('i')));
        assert_eq!(game.state.mode, Mode::ViewingInventory);
        assert!(!game.handle_input(&InputEvent::KeyUp('i')));
        assert!(game.handle_input(&InputEvent::KeyDown('I')));
        assert_eq!(game.state.mode, Mode::Exploring);
    }

    #[test]
    fn click_is_a_full_keypress() {
        let mut game = AdventureGame::new().unwrap();
        assert!(game.handle_input(&InputEvent::Click('I')));
        assert!(!game.state.latch.is_latched());
        assert!(game.handle_input(&InputEvent::Click('I')));
        assert_eq!(game.state.mode, Mode::Exploring);
    }

    #[test]
    fn focus_loss_releases_latch() {
        let mut game = AdventureGame::new().unwrap();
        game.handle_input(&InputEvent::KeyDown('I'));
        game.handle_input(&InputEvent::FocusLost);
        assert!(!game.state.latch.is_latched());
        assert!(game.handle_input(&InputEvent::KeyDown('I')));
    }

    #[test]
    fn unsupported_action_is_reported_in_log() {
        let doc = r#"{ "locations": [ { "id": 0, "title": "Hut", "description": "",
            "items": [ { "key": "R", "name": "Rope" } ] } ] }"#;
        let mut game = AdventureGame::from_source(doc).unwrap();
        for key in ['R', 'I', 'R', 'E'] {
            game.handle_input(&InputEvent::Click(key));
        }
        assert_eq!(game.state.mode, Mode::ItemSelected);
        let last = game.state.log.last().unwrap();
        assert_eq!(last.text, "Examining items is not available yet.");
        assert!(last.is_important);
    }
}
