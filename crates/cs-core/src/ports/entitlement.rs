use async_trait::async_trait;

/// Source of the history capacity granted to the current user.
///
/// 当前用户可用的历史容量来源。
#[async_trait]
pub trait EntitlementPort: Send + Sync {
    /// Maximum number of history items. Implementations fall back to the
    /// free tier when the entitlement cannot be read.
    async fn max_items(&self) -> usize;
}
