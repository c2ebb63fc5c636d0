use crate::clipboard::ClipboardSink;
use crate::errors::PlaceClipError;
use crate::export::format_places;
use crate::pipeline::{Delivery, PipelineConfig, PipelineEvent, QueryPipeline, ResultOrigin};
use crate::place::PlaceResult;
use crate::provider::SearchProvider;
use crate::selection::SelectionStore;
use std::sync::Arc;
use tracing::{debug, info};

/// What changed after an event was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelUpdate {
    ItemsReplaced {
        query: String,
        origin: ResultOrigin,
        count: usize,
    },
}

/// State behind the search screen: query, results and selection.
pub struct SearchModel<P> {
    pipeline: QueryPipeline<P>,
    items: Vec<PlaceResult>,
    selection: SelectionStore,
    origin: Option<ResultOrigin>,
}

impl<P: SearchProvider + 'static> SearchModel<P> {
    pub fn new(provider: Arc<P>, config: PipelineConfig) -> Self {
        SearchModel {
            pipeline: QueryPipeline::new(provider, config),
            items: Vec::new(),
            selection: SelectionStore::new(),
            origin: None,
        }
    }

    pub fn term(&self) -> &str {
        self.pipeline.term()
    }

    pub fn set_term(&mut self, text: impl Into<String>) {
        self.pipeline.set_term(text);
    }

    pub fn items(&self) -> &[PlaceResult] {
        &self.items
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// How the current list came about, `None` before the first delivery.
    pub fn origin(&self) -> Option<ResultOrigin> {
        self.origin
    }

    pub fn is_searching(&self) -> bool {
        self.pipeline.is_searching()
    }

    pub fn is_selected(&self, item: &PlaceResult) -> bool {
        self.selection.contains(item)
    }

    pub fn toggle(&mut self, item: &PlaceResult) -> bool {
        self.selection.toggle(item)
    }

    /// Toggles the item at `index` in the current list, if any.
    pub fn toggle_at(&mut self, index: usize) -> Option<bool> {
        let item = self.items.get(index)?.clone();
        Some(self.selection.toggle(&item))
    }

    /// Selects the item at `index`, leaving it selected if it already was.
    pub fn select_at(&mut self, index: usize) -> Option<bool> {
        let item = self.items.get(index)?.clone();
        Some(self.selection.select(&item))
    }

    pub async fn recv(&mut self) -> Option<PipelineEvent> {
        self.pipeline.recv().await
    }

    /// Applies a pipeline event to the model.
    pub fn handle(&mut self, event: PipelineEvent) -> Option<ModelUpdate> {
        let delivery = self.pipeline.handle(event)?;
        Some(self.replace_items(delivery))
    }

    /// Waits for the next result list and applies it.
    pub async fn next_update(&mut self) -> Option<ModelUpdate> {
        let delivery = self.pipeline.next_delivery().await?;
        Some(self.replace_items(delivery))
    }

    fn replace_items(&mut self, delivery: Delivery) -> ModelUpdate {
        // Selection never survives a new list, even an identical one.
        self.selection.reset();
        self.items = delivery.places;
        self.origin = Some(delivery.origin);
        debug!(
            "Showing {} results for {:?}",
            self.items.len(),
            delivery.query
        );
        ModelUpdate::ItemsReplaced {
            query: delivery.query,
            origin: delivery.origin,
            count: self.items.len(),
        }
    }

    /// Selected results in list order.
    pub fn selected_items(&self) -> Vec<&PlaceResult> {
        self.selection.selected_in_order(&self.items)
    }

    /// The selected results rendered as a table.
    pub fn export(&self) -> String {
        format_places(self.selected_items())
    }

    /// Exports the selection and hands it to `clipboard`. Returns the number
    /// of rows written.
    pub fn copy(&self, clipboard: &mut dyn ClipboardSink) -> Result<usize, PlaceClipError> {
        let selected = self.selected_items();
        let rows = selected.len();
        clipboard.set_text(format_places(selected))?;
        info!("Copied {} places to clipboard", rows);
        Ok(rows)
    }
}
