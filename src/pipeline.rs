//! Turns a stream of query edits into search results.
//!
//! Every edit restarts a quiet-period timer. When the timer fires the text is
//! compared with the last text that was acted upon and dropped if unchanged.
//! Empty text resolves to an empty list on the spot; anything else starts a
//! provider request tagged with a fresh sequence number. Starting a request
//! aborts the previous one, and a response carrying an old tag is ignored.
//!
//! Timers and requests run as tokio tasks but never touch pipeline state:
//! they post [`PipelineEvent`]s back to the owner, which applies them with
//! [`QueryPipeline::handle`] on its own loop.

use crate::errors::PlaceClipError;
use crate::place::PlaceResult;
use crate::provider::SearchProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub debounce: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

#[derive(Debug)]
pub enum PipelineEvent {
    /// The quiet period after edit number `generation` elapsed.
    Settled { generation: u64, text: String },
    /// A provider request finished.
    Completed {
        sequence: u64,
        query: String,
        result: Result<Vec<PlaceResult>, PlaceClipError>,
    },
}

/// Why a result list was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    /// The query was empty, nothing was searched.
    EmptyQuery,
    /// The provider answered (possibly with nothing).
    Search,
    /// The provider failed. The list is empty.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub query: String,
    pub origin: ResultOrigin,
    pub places: Vec<PlaceResult>,
}

pub struct QueryPipeline<P> {
    provider: Arc<P>,
    config: PipelineConfig,
    term: String,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    last_acted: Option<String>,
    sequence: u64,
    in_flight: Option<JoinHandle<()>>,
    events_tx: UnboundedSender<PipelineEvent>,
    events_rx: UnboundedReceiver<PipelineEvent>,
}

impl<P: SearchProvider + 'static> QueryPipeline<P> {
    pub fn new(provider: Arc<P>, config: PipelineConfig) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        QueryPipeline {
            provider,
            config,
            term: String::new(),
            generation: 0,
            timer: None,
            last_acted: None,
            sequence: 0,
            in_flight: None,
            events_tx,
            events_rx,
        }
    }

    /// The latest text the user entered.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether a provider request is outstanding.
    pub fn is_searching(&self) -> bool {
        self.in_flight
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Records a new query text and restarts the quiet period.
    pub fn set_term(&mut self, text: impl Into<String>) {
        self.term = text.into();
        self.generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let generation = self.generation;
        let text = self.term.clone();
        let debounce = self.config.debounce;
        let tx = self.events_tx.clone();
        trace!("Query edit {} queued: {:?}", generation, text);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let _ = tx.send(PipelineEvent::Settled { generation, text });
        }));
    }

    /// Waits for the next timer or request event.
    pub async fn recv(&mut self) -> Option<PipelineEvent> {
        self.events_rx.recv().await
    }

    /// Applies one event. Returns a delivery when the visible result list
    /// must be replaced.
    pub fn handle(&mut self, event: PipelineEvent) -> Option<Delivery> {
        match event {
            PipelineEvent::Settled { generation, text } => {
                if generation != self.generation {
                    trace!("Dropping superseded edit {}", generation);
                    return None;
                }
                self.timer = None;
                self.act_on(text)
            }
            PipelineEvent::Completed {
                sequence,
                query,
                result,
            } => {
                if sequence != self.sequence {
                    debug!(
                        "Discarding stale response {} for {:?} (latest is {})",
                        sequence, query, self.sequence
                    );
                    return None;
                }
                self.in_flight = None;
                // Failures are shown as an empty list.
                let (origin, places) = match result {
                    Ok(places) => (ResultOrigin::Search, places),
                    Err(err) => {
                        warn!("Search for {:?} failed: {}", query, err);
                        (ResultOrigin::Failed, Vec::new())
                    }
                };
                Some(Delivery {
                    query,
                    origin,
                    places,
                })
            }
        }
    }

    /// Waits until the pipeline produces a delivery.
    pub async fn next_delivery(&mut self) -> Option<Delivery> {
        while let Some(event) = self.recv().await {
            if let Some(delivery) = self.handle(event) {
                return Some(delivery);
            }
        }
        None
    }

    fn act_on(&mut self, text: String) -> Option<Delivery> {
        if self.last_acted.as_deref() == Some(text.as_str()) {
            trace!("Query unchanged, skipping: {:?}", text);
            return None;
        }
        self.last_acted = Some(text.clone());

        // Either branch supersedes whatever is still running.
        self.sequence += 1;
        if let Some(request) = self.in_flight.take() {
            debug!("Cancelling in-flight search");
            request.abort();
        }

        if text.is_empty() {
            return Some(Delivery {
                query: text,
                origin: ResultOrigin::EmptyQuery,
                places: Vec::new(),
            });
        }

        let sequence = self.sequence;
        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        debug!("Starting search {} for {:?}", sequence, text);
        self.in_flight = Some(tokio::spawn(async move {
            let result = provider.search(&text).await;
            let _ = tx.send(PipelineEvent::Completed {
                sequence,
                query: text,
                result,
            });
        }));
        None
    }
}

impl<P> Drop for QueryPipeline<P> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        if let Some(request) = self.in_flight.take() {
            request.abort();
        }
    }
}
