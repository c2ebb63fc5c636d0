use super::Screen;
use crate::provider::SearchProvider;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Continue,
    Quit,
}

impl<P: SearchProvider + 'static> Screen<P> {
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return ScreenAction::Quit,
            KeyCode::Char('c') if ctrl => return ScreenAction::Quit,
            KeyCode::Char('y') if ctrl => self.copy_selection(),
            KeyCode::Char(c) if !ctrl => {
                let mut term = self.model.term().to_string();
                term.push(c);
                self.edit_term(term);
            }
            KeyCode::Backspace => {
                let mut term = self.model.term().to_string();
                if term.pop().is_some() {
                    self.edit_term(term);
                }
            }
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Enter => self.toggle_under_cursor(),
            _ => {}
        }
        ScreenAction::Continue
    }

    fn edit_term(&mut self, term: String) {
        trace!("Query edited: {:?}", term);
        self.notice = None;
        self.model.set_term(term);
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.model.items().len();
        if len == 0 {
            self.cursor.select(None);
            return;
        }
        let current = self.cursor.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.cursor.select(Some(next as usize));
    }

    fn toggle_under_cursor(&mut self) {
        if let Some(index) = self.cursor.selected() {
            self.model.toggle_at(index);
            self.notice = None;
        }
    }
}
