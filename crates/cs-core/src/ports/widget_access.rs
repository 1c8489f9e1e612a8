use async_trait::async_trait;

/// Whether companion surfaces may read the persisted history.
#[async_trait]
pub trait WidgetAccessPort: Send + Sync {
    async fn is_widget_access_allowed(&self) -> bool;
}
