//! Mtxsync core library.
//!
//! This crate exposes programmatic APIs for mirroring a MediaMTX server's
//! API-reported stream paths into the `paths:` section of a local
//! `mediamtx.yml`, leaving every other line of the file untouched.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Settings discovery and effective configuration resolution.
//! - `normalize`: API payload shape normalization into a path map.
//! - `document`: Line-based config file model and managed-region splice.
//! - `sync`: One synchronization cycle over injected collaborators.
//! - `api`: Blocking HTTP client with basic auth.
//! - `output`: Human/JSON printers for cycle and check outcomes.
//! - `utils`: Supporting helpers.
pub mod api;
pub mod cli;
pub mod config;
pub mod document;
pub mod normalize;
pub mod output;
pub mod sync;
pub mod utils;
