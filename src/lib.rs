pub mod clipboard;
pub mod copy;
pub mod errors;
pub mod export;
pub mod logger;
pub mod model;
pub mod nominatim;
pub mod pipeline;
pub mod place;
pub mod provider;
pub mod selection;
pub mod tui;

pub use copy::{copy_search_results, RowPick};
pub use errors::PlaceClipError;
pub use model::SearchModel;
pub use place::{Address, Coordinate, PlaceResult};
pub use provider::SearchProvider;
