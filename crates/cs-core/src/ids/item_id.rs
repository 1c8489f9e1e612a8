use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Stable identifier of a history item.
///
/// Assigned once at capture time and reused as the blob key prefix,
/// so it must never change for the lifetime of the item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl_id!(ItemId);
