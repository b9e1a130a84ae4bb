//! # Snitchbot - comment-to-status publisher
//!
//! Snitchbot reads a Python source file, collects its `#` comment lines, and
//! posts each one as a status update to a rate-limited remote messaging API.
//!
//! ## Features
//!
//! - **Comment Extraction**: A small, exact grammar for turning raw source
//!   lines into postable comment text, shebang lines excluded.
//! - **Reliable Delivery**: Bounded retries per comment, a long cooldown on
//!   rate-limit responses, and short pacing between successful posts.
//! - **Dry Run**: `snitchbot scan` prints what would be posted without
//!   touching the network.
//! - **Async Design**: Built with Tokio; delivery is strictly sequential so
//!   the remote rate limit is respected from a single logical session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snitchbot::api::HttpStatusClient;
//! use snitchbot::config::Config;
//! use snitchbot::extractor::extract_comments;
//! use snitchbot::poster::StatusPoster;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let source = tokio::fs::read_to_string("example.py").await?;
//!     let lines: Vec<&str> = source.split_inclusive('\n').collect();
//!
//!     let comments = extract_comments(&lines)?;
//!     let client = HttpStatusClient::new(config.api.clone());
//!     let mut poster = StatusPoster::new(client, config.delivery.clone());
//!     poster.post(&comments).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`extractor`] - Comment grammar and extraction
//! - [`poster`] - Delivery engine with retries, cooldown, and pacing
//! - [`api`] - Remote status endpoint contract and HTTP client
//! - [`config`] - Configuration management
//! - [`validation`] - Source file validation
//! - [`logutil`] - Log sanitation helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │     Driver      │ ← CLI, config, exit handling
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Extractor    │ ← lines → comments (pure)
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Status Poster  │ ← retries, cooldown, pacing
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   HTTP Client   │ ← one submit call per attempt
//! └─────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod extractor;
pub mod logutil;
pub mod poster;
pub mod validation;
