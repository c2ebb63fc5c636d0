//! Interactive terminal screen: query input, result list, copy action.

mod input;
mod render;

pub use input::ScreenAction;

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::errors::PlaceClipError;
use crate::model::{ModelUpdate, SearchModel};
use crate::pipeline::{PipelineConfig, PipelineEvent, ResultOrigin};
use crate::provider::SearchProvider;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::widgets::ListState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{debug, error, info, warn};

pub struct Screen<P> {
    model: SearchModel<P>,
    clipboard: Option<Box<dyn ClipboardSink>>,
    cursor: ListState,
    notice: Option<String>,
}

impl<P: SearchProvider + 'static> Screen<P> {
    pub fn new(model: SearchModel<P>, clipboard: Option<Box<dyn ClipboardSink>>) -> Self {
        Screen {
            model,
            clipboard,
            cursor: ListState::default(),
            notice: None,
        }
    }

    pub fn model(&self) -> &SearchModel<P> {
        &self.model
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.selected()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Applies a pipeline event and moves the cursor to the top of a new list.
    pub fn apply(&mut self, event: PipelineEvent) -> Option<ModelUpdate> {
        let update = self.model.handle(event)?;
        let ModelUpdate::ItemsReplaced { count, .. } = &update;
        self.cursor.select(if *count > 0 { Some(0) } else { None });
        self.notice = None;
        Some(update)
    }

    pub async fn recv(&mut self) -> Option<PipelineEvent> {
        self.model.recv().await
    }

    /// Exports the selection to the clipboard. Failures are reported in the
    /// status line only.
    pub fn copy_selection(&mut self) {
        let Some(clipboard) = self.clipboard.as_mut() else {
            warn!("Copy requested but no clipboard is available");
            self.notice = Some("Clipboard unavailable".to_string());
            return;
        };
        match self.model.copy(clipboard.as_mut()) {
            Ok(rows) => {
                self.notice = Some(format!("Copied {} places", rows));
            }
            Err(e) => {
                error!("Failed to copy selection: {}", e);
                self.notice = Some("Copy failed".to_string());
            }
        }
    }

    fn status_line(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        if self.model.is_searching() {
            return "Searching...".to_string();
        }
        match self.model.origin() {
            None | Some(ResultOrigin::EmptyQuery) => "Type to search".to_string(),
            Some(ResultOrigin::Failed) => format!("No results for \"{}\"", self.model.term()),
            Some(ResultOrigin::Search) if self.model.items().is_empty() => {
                format!("No results for \"{}\"", self.model.term())
            }
            Some(ResultOrigin::Search) => format!(
                "{} results, {} selected",
                self.model.items().len(),
                self.model.selected_items().len()
            ),
        }
    }
}

/// Runs the search screen until the user quits.
pub async fn run<P: SearchProvider + 'static>(
    provider: Arc<P>,
    config: PipelineConfig,
) -> Result<(), PlaceClipError> {
    let clipboard: Option<Box<dyn ClipboardSink>> = match SystemClipboard::new() {
        Ok(clipboard) => Some(Box::new(clipboard)),
        Err(e) => {
            warn!("Copy will be unavailable: {}", e);
            None
        }
    };
    let mut screen = Screen::new(SearchModel::new(provider, config), clipboard);

    let mut terminal = ratatui::init();
    info!("Search screen started");

    let (event_tx, mut event_rx) = unbounded_channel();
    let input_running = Arc::new(AtomicBool::new(true));
    let input_flag = Arc::clone(&input_running);

    let input_thread = thread::spawn(move || -> std::io::Result<()> {
        while input_flag.load(Ordering::Relaxed) {
            if event::poll(Duration::from_millis(50))? {
                let event = event::read()?;
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        }
        Ok(())
    });

    let result: Result<(), PlaceClipError> = loop {
        if let Err(e) = terminal.draw(|frame| screen.draw(frame)) {
            break Err(PlaceClipError::TerminalError(e.to_string()));
        }

        tokio::select! {
            input = event_rx.recv() => match input {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if screen.handle_key(key) == ScreenAction::Quit {
                        break Ok(());
                    }
                }
                Some(_) => {}
                None => {
                    break Err(PlaceClipError::TerminalError(
                        "input event channel disconnected".to_string(),
                    ));
                }
            },
            Some(event) = screen.recv() => {
                if let Some(update) = screen.apply(event) {
                    debug!("Screen update: {:?}", update);
                }
            }
        }
    };

    ratatui::restore();
    input_running.store(false, Ordering::Relaxed);
    match input_thread.join() {
        Ok(Err(e)) => warn!("Input thread stopped with error: {}", e),
        Ok(Ok(())) => {}
        Err(_) => error!("Input thread panicked"),
    }

    info!("Search screen closed");
    result
}
