use crate::clipboard::ClipboardSink;
use crate::errors::PlaceClipError;
use crate::model::{ModelUpdate, SearchModel};
use crate::pipeline::{PipelineConfig, ResultOrigin};
use crate::provider::SearchProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Which rows of the result list to copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPick {
    All,
    /// 1-based row numbers as shown to the user.
    Rows(Vec<usize>),
}

/// Runs a single search for `query`, selects the picked rows and writes the
/// exported table to `sink`. Returns the number of rows written. A failed
/// search is an error and leaves `sink` untouched.
pub async fn copy_search_results<P: SearchProvider + 'static>(
    provider: Arc<P>,
    query: &str,
    pick: RowPick,
    sink: &mut dyn ClipboardSink,
) -> Result<usize, PlaceClipError> {
    let config = PipelineConfig {
        debounce: Duration::ZERO,
    };
    let mut model = SearchModel::new(provider, config);
    model.set_term(query);
    let update = model
        .next_update()
        .await
        .ok_or_else(|| PlaceClipError::SearchError("search pipeline closed".to_string()))?;
    debug!("Search finished: {:?}", update);
    if let ModelUpdate::ItemsReplaced {
        origin: ResultOrigin::Failed,
        ..
    } = update
    {
        return Err(PlaceClipError::SearchError(format!(
            "search for {:?} failed",
            query
        )));
    }

    let len = model.items().len();
    match pick {
        RowPick::All => {
            for index in 0..len {
                model.select_at(index);
            }
        }
        RowPick::Rows(rows) => {
            for row in rows {
                let added = row.checked_sub(1).and_then(|index| model.select_at(index));
                match added {
                    Some(true) => {}
                    Some(false) => debug!("Row {} already picked", row),
                    None => warn!("Ignoring row {}: only {} results", row, len),
                }
            }
        }
    }

    let rows = model.copy(sink)?;
    info!("Copied {} of {} results for {:?}", rows, len, query);
    Ok(rows)
}
