//! # cs-platform
//!
//! Operating-system facing adapters for ClipStash: the system clipboard and
//! the runtime that polls it.

pub mod adapters;
pub mod clipboard;
pub mod ipc;
pub mod runtime;
