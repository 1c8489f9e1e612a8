//! # clipstash
//!
//! Headless host for the ClipStash clipboard history: configuration,
//! logging, dependency wiring and the command-line surface.

pub mod bootstrap;
pub mod cli;
