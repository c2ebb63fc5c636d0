#![allow(dead_code)]

use async_trait::async_trait;
use placeclip::clipboard::ClipboardSink;
use placeclip::{Coordinate, PlaceClipError, PlaceResult, SearchProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn place(name: &str, latitude: f64, longitude: f64) -> PlaceResult {
    PlaceResult::new(Some(name.to_string()), Coordinate::new(latitude, longitude))
}

/// Provider that records every query and answers from a fixed table.
#[derive(Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<String>>,
    answers: HashMap<String, Vec<PlaceResult>>,
    fallback: Vec<PlaceResult>,
    delays: HashMap<String, Duration>,
    failing: Vec<String>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        RecordingProvider::default()
    }

    /// Answers every query that has no explicit entry with `places`.
    pub fn answering_all(places: Vec<PlaceResult>) -> Self {
        RecordingProvider {
            fallback: places,
            ..RecordingProvider::default()
        }
    }

    pub fn with_answer(mut self, query: &str, places: Vec<PlaceResult>) -> Self {
        self.answers.insert(query.to_string(), places);
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for RecordingProvider {
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, PlaceClipError> {
        self.calls.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.iter().any(|q| q == query) {
            return Err(PlaceClipError::SearchError("provider unavailable".to_string()));
        }
        Ok(self
            .answers
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Clipboard that keeps every write in memory.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: String) -> Result<(), PlaceClipError> {
        self.writes.lock().unwrap().push(text);
        Ok(())
    }
}

/// Clipboard whose writes always fail.
pub struct BrokenClipboard;

impl ClipboardSink for BrokenClipboard {
    fn set_text(&mut self, _text: String) -> Result<(), PlaceClipError> {
        Err(PlaceClipError::ClipboardWriteError("no display".to_string()))
    }
}
