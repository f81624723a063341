use crate::resolution::ResolutionResult;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    /// Resolves a short code to its destination.
    ///
    /// Never fails: transport and server errors are folded into
    /// [`ResolutionResult::Failed`] with a user-facing reason.
    async fn resolve(&self, code: &ShortCode) -> ResolutionResult;
}

#[async_trait]
impl<R: Resolver + ?Sized> Resolver for std::sync::Arc<R> {
    async fn resolve(&self, code: &ShortCode) -> ResolutionResult {
        (**self).resolve(code).await
    }
}
