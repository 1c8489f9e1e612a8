use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use cs_core::ports::{GeneratedThumbnail, ThumbnailGeneratorPort};
use image::{imageops::FilterType, ColorType, GenericImageView};

/// WebP thumbnails no larger than `max_edge` on either side.
pub struct InfraThumbnailGenerator {
    max_edge: u32,
}

impl InfraThumbnailGenerator {
    pub fn new(max_edge: u32) -> Self {
        Self {
            max_edge: max_edge.max(1),
        }
    }
}

#[async_trait]
impl ThumbnailGeneratorPort for InfraThumbnailGenerator {
    async fn generate_thumbnail(&self, image_bytes: Bytes) -> Result<GeneratedThumbnail> {
        let max_edge = self.max_edge;
        tokio::task::spawn_blocking(move || render_thumbnail(&image_bytes, max_edge))
            .await
            .context("thumbnail task panicked")?
    }
}

fn render_thumbnail(image_bytes: &[u8], max_edge: u32) -> Result<GeneratedThumbnail> {
    let decoded =
        image::load_from_memory(image_bytes).context("decode image bytes for thumbnail")?;
    let (original_width, original_height) = decoded.dimensions();
    let (target_width, target_height) =
        calculate_target_size(original_width, original_height, max_edge);

    let resized = if target_width == original_width && target_height == original_height {
        decoded
    } else {
        decoded.resize_exact(target_width, target_height, FilterType::Triangle)
    };

    let rgba = resized.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut encoded = Vec::new();
    image::codecs::webp::WebPEncoder::new_lossless(&mut encoded)
        .encode(rgba.as_raw(), width, height, ColorType::Rgba8.into())
        .context("encode thumbnail to webp")?;

    Ok(GeneratedThumbnail {
        bytes: Bytes::from(encoded),
        width,
        height,
        original_width,
        original_height,
    })
}

/// Scale `(width, height)` so the longer edge equals `max_edge`, keeping the
/// aspect ratio. Images already within bounds are left alone.
fn calculate_target_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    let scale = |short: u32, long: u32| {
        (((short as f64) * (max_edge as f64) / (long as f64)).round() as u32).max(1)
    };
    if width >= height {
        (max_edge, scale(height, width))
    } else {
        (scale(width, height), max_edge)
    }
}
