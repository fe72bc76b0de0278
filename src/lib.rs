//! # Wren 🐦
//!
//! The portable core of a menu-bar status poster.
//!
//! ## Overview
//!
//! Wren drives an OAuth 1.0a three-legged handshake, optionally uploads a
//! single image, and posts a status — all behind a typed command/outcome
//! session a native shell (tray icon, popup window, global shortcuts) can
//! embed. A small interactive CLI drives the same session from a terminal.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Session Host                          │
//! │   One worker task; commands in, one terminal outcome out    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │ Credential Gate │ │    Publisher    │ │     Dialogs     │
//! │                 │ │                 │ │                 │
//! │ • Request token │ │ • Media upload  │ │ • Image picker  │
//! │ • Code exchange │ │ • Status post   │ │ • Warnings      │
//! │ • Verify        │ │ • Short-circuit │ │ • Native (rfd)  │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │
//!          └───────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │     Models      │ │     Errors      │
//! │                 │ │                 │ │                 │
//! │ • Consumer keys │ │ • Token pairs   │ │ • AuthError     │
//! │ • Endpoints     │ │ • Attachments   │ │ • PublishError  │
//! │ • TOML + env    │ │ • Post results  │ │ • Validation    │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Credential gate, publisher, and the [`api::StatusApi`] seam
//! - [`session`] — Command/outcome session worker and window surfaces
//! - [`dialogs`] — Native file-open and warning dialogs
//! - [`config`] — Configuration management
//! - [`error`] — Error taxonomy
//! - [`models`] — Data models (token pairs, attachments, results)
//!
//! ## Example
//!
//! ```no_run
//! use wren::{Config, api::TwitterApi, dialogs::NativeDialogs, session};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let api = TwitterApi::from_config(&config)?;
//! let mut handle = session::spawn_session(api, Box::new(NativeDialogs));
//!
//! handle.commands.send(session::Command::StartOAuth).await?;
//! let outcome = handle.outcomes.recv().await;
//! # Ok(())
//! # }
//! ```
//!
//! Credentials never touch disk: the access token pair lives with the
//! caller and is supplied again on every publish command.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod models;
pub mod session;

// Re-export main types for convenience
pub use config::Config;
pub use error::{AuthError, ExchangeError, PublishError, ValidationError};
pub use models::{
    AccessTokenPair, AuthorizeCode, ImageAttachment, MediaId, PostResult, RequestTokenPair,
    UserCredentials,
};
pub use session::{Command, Outcome, SessionHandle, spawn_session};

/// ASCII logo for the application
pub const LOGO: &str = r"
  _    _________ ___
 | |/|/ / __/ -_) _ \
 |__,__/_/  \__/_//_/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Repository URL
pub const REPO_URL: &str = "https://github.com/ricardodantas/wren";
