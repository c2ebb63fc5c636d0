use crate::errors::PlaceClipError;
use crate::place::PlaceResult;
use async_trait::async_trait;

/// A place search backend. Takes free text, returns matches in the
/// provider's own order.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, PlaceClipError>;
}

#[async_trait]
impl<P: SearchProvider + ?Sized> SearchProvider for std::sync::Arc<P> {
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, PlaceClipError> {
        (**self).search(query).await
    }
}
