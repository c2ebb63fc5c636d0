mod common;

use common::{place, BrokenClipboard, MemoryClipboard, RecordingProvider};
use placeclip::clipboard::ClipboardSink;
use placeclip::export::HEADER;
use placeclip::pipeline::PipelineConfig;
use placeclip::tui::{Screen, ScreenAction};
use placeclip::SearchModel;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use std::sync::Arc;

fn screen(
    provider: RecordingProvider,
    clipboard: Option<Box<dyn ClipboardSink>>,
) -> Screen<RecordingProvider> {
    let model = SearchModel::new(Arc::new(provider), PipelineConfig::default());
    Screen::new(model, clipboard)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(screen: &mut Screen<RecordingProvider>, text: &str) {
    for c in text.chars() {
        assert_eq!(screen.handle_key(key(KeyCode::Char(c))), ScreenAction::Continue);
    }
}

async fn settle(screen: &mut Screen<RecordingProvider>) {
    loop {
        let event = screen.recv().await.unwrap();
        if screen.apply(event).is_some() {
            return;
        }
    }
}

fn rendered(screen: &mut Screen<RecordingProvider>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| screen.draw(frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn provider() -> RecordingProvider {
    let mut cafe = place("Cafe Flore", 48.854, 2.3325);
    cafe.phone = Some("+33 1 45 48 55 26".to_string());
    cafe.address.locality = Some("Paris".to_string());
    RecordingProvider::answering_all(vec![cafe, place("Les Deux Magots", 48.854, 2.333)])
}

#[tokio::test(start_paused = true)]
async fn test_typing_searches_and_shows_rows() {
    let mut screen = screen(provider(), None);

    type_text(&mut screen, "cafe");
    assert_eq!(screen.model().term(), "cafe");
    settle(&mut screen).await;

    assert_eq!(screen.model().items().len(), 2);
    assert_eq!(screen.cursor(), Some(0));

    let text = rendered(&mut screen);
    assert!(text.contains("Cafe Flore"));
    assert!(text.contains("+33 1 45 48 55 26"));
    assert!(text.contains("Les Deux Magots"));
    assert!(text.contains("2 results, 0 selected"));
}

#[tokio::test(start_paused = true)]
async fn test_backspace_edits_query() {
    let mut screen = screen(provider(), None);

    type_text(&mut screen, "cafes");
    screen.handle_key(key(KeyCode::Backspace));

    assert_eq!(screen.model().term(), "cafe");
}

#[tokio::test(start_paused = true)]
async fn test_enter_toggles_row_under_cursor() {
    let mut screen = screen(provider(), None);
    type_text(&mut screen, "cafe");
    settle(&mut screen).await;

    screen.handle_key(key(KeyCode::Down));
    assert_eq!(screen.cursor(), Some(1));
    screen.handle_key(key(KeyCode::Enter));
    let second = screen.model().items()[1].clone();
    assert!(screen.model().is_selected(&second));

    screen.handle_key(key(KeyCode::Down));
    assert_eq!(screen.cursor(), Some(1));

    screen.handle_key(key(KeyCode::Enter));
    assert!(!screen.model().is_selected(&second));
}

#[tokio::test(start_paused = true)]
async fn test_ctrl_y_copies_selected_rows() {
    let clipboard = MemoryClipboard::default();
    let mut screen = screen(provider(), Some(Box::new(clipboard.clone())));
    type_text(&mut screen, "cafe");
    settle(&mut screen).await;

    screen.handle_key(key(KeyCode::Enter));
    screen.handle_key(ctrl('y'));

    let writes = clipboard.writes();
    assert_eq!(writes.len(), 1);
    assert!(writes[0].starts_with(HEADER));
    assert!(writes[0].contains("\nCafe Flore, +33 1 45 48 55 26, , , , Paris, "));
    assert_eq!(screen.notice(), Some("Copied 1 places"));
}

#[tokio::test(start_paused = true)]
async fn test_new_results_clear_highlight() {
    let mut screen = screen(provider(), None);
    type_text(&mut screen, "cafe");
    settle(&mut screen).await;
    screen.handle_key(key(KeyCode::Enter));
    assert_eq!(screen.model().selected_items().len(), 1);

    type_text(&mut screen, "s");
    settle(&mut screen).await;

    assert!(screen.model().selection().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_copy_failure_only_updates_status() {
    let mut broken = screen(provider(), Some(Box::new(BrokenClipboard)));

    assert_eq!(broken.handle_key(ctrl('y')), ScreenAction::Continue);
    assert_eq!(broken.notice(), Some("Copy failed"));

    let mut without = screen(provider(), None);
    without.handle_key(ctrl('y'));
    assert_eq!(without.notice(), Some("Clipboard unavailable"));
}

#[tokio::test(start_paused = true)]
async fn test_escape_and_ctrl_c_quit() {
    let mut screen = screen(provider(), None);

    assert_eq!(screen.handle_key(key(KeyCode::Esc)), ScreenAction::Quit);
    assert_eq!(screen.handle_key(ctrl('c')), ScreenAction::Quit);
    assert_eq!(screen.model().term(), "");
}

#[tokio::test(start_paused = true)]
async fn test_status_before_any_search() {
    let mut screen = screen(provider(), None);

    let text = rendered(&mut screen);

    assert!(text.contains("Type to search"));
    assert!(text.contains("Copy"));
}

#[tokio::test(start_paused = true)]
async fn test_cursor_stays_inside_input_for_long_query() {
    let mut screen = screen(provider(), None);
    type_text(&mut screen, &"a".repeat(200));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| screen.draw(frame)).unwrap();

    let cursor = terminal.get_cursor_position().unwrap();
    assert_eq!(cursor.x, 79);
    assert_eq!(cursor.y, 2);
}
