use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use cs_core::ports::{EntitlementPort, WidgetAccessPort};
use cs_core::AppConfig;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

use crate::fs::atomic_write::atomic_write;

/// Flags shared with companion surfaces (widget, keyboard extension).
///
/// 与小组件、键盘扩展共享的标志。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedDefaults {
    pub is_pro_user: bool,
    pub widget_access_enabled: bool,
}

impl Default for SharedDefaults {
    fn default() -> Self {
        Self {
            is_pro_user: false,
            widget_access_enabled: true,
        }
    }
}

/// History capacity per entitlement tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub free_max_items: usize,
    /// `None` means unlimited.
    pub pro_max_items: Option<usize>,
}

impl HistoryLimits {
    pub fn from_config(config: &AppConfig) -> Self {
        let to_usize = |v: u64| usize::try_from(v).unwrap_or(usize::MAX);
        Self {
            free_max_items: to_usize(config.free_max_items),
            pro_max_items: match config.pro_max_items {
                0 => None,
                n => Some(to_usize(n)),
            },
        }
    }

    pub fn max_items(&self, is_pro: bool) -> usize {
        if is_pro {
            self.pro_max_items.unwrap_or(usize::MAX)
        } else {
            self.free_max_items
        }
    }
}

/// JSON file backing [`SharedDefaults`].
///
/// A missing file means default flags. Read failures are logged and resolved
/// to the restrictive answer: free tier, widget access denied.
pub struct FileSharedDefaults {
    path: PathBuf,
    limits: HistoryLimits,
}

impl FileSharedDefaults {
    pub fn new(path: impl Into<PathBuf>, limits: HistoryLimits) -> Self {
        Self {
            path: path.into(),
            limits,
        }
    }

    pub async fn read(&self) -> Result<SharedDefaults> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SharedDefaults::default());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("read shared defaults failed: {}", self.path.display())
                })
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("parse shared defaults failed: {}", self.path.display()))
    }

    pub async fn write(&self, defaults: &SharedDefaults) -> Result<()> {
        let content =
            serde_json::to_vec_pretty(defaults).context("serialize shared defaults failed")?;
        atomic_write(&self.path, &content)
            .await
            .with_context(|| format!("write shared defaults failed: {}", self.path.display()))
    }
}

#[async_trait]
impl EntitlementPort for FileSharedDefaults {
    async fn max_items(&self) -> usize {
        match self.read().await {
            Ok(defaults) => self.limits.max_items(defaults.is_pro_user),
            Err(err) => {
                warn!(error = %err, "entitlement unavailable, using free tier");
                self.limits.max_items(false)
            }
        }
    }
}

#[async_trait]
impl WidgetAccessPort for FileSharedDefaults {
    async fn is_widget_access_allowed(&self) -> bool {
        match self.read().await {
            Ok(defaults) => defaults.widget_access_enabled,
            Err(err) => {
                warn!(error = %err, "shared defaults unreadable, denying widget access");
                false
            }
        }
    }
}
