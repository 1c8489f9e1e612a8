use anyhow::Result;
use bytes::Bytes;

/// Generated thumbnail payload and dimensions.
///
/// 生成的缩略图负载与尺寸。
#[derive(Debug, Clone)]
pub struct GeneratedThumbnail {
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
    /// Dimensions of the source image.
    pub original_width: u32,
    pub original_height: u32,
}

/// Generator port for creating thumbnails from image bytes.
///
/// 从图像字节生成缩略图的生成器端口。
#[async_trait::async_trait]
pub trait ThumbnailGeneratorPort: Send + Sync {
    async fn generate_thumbnail(&self, image_bytes: Bytes) -> Result<GeneratedThumbnail>;
}
