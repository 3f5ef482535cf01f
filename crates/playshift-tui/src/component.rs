//! Component trait implemented by every panel and overlay.
//!
//! Components own their cursor and widget state, read everything else from
//! `AppState` and never mutate it: they answer input with `Vec<Action>` and
//! the App dispatches those.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Called only while this component has focus.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// `area` is where the component was last drawn.
    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Every dispatched action is offered to every component.
    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Bracketed paste, delivered only while focused.
    fn handle_paste(&mut self, _text: &str, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// True while a text field inside the component owns the keyboard.
    fn is_editing(&self) -> bool {
        false
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}
