//! # Brief Assistant
//!
//! Client library for the GPJ Input Brief Assistant API: briefs with
//! sections, versions and attached documents, plus AI-assisted content.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌──────────────┐   ┌───────────┐
//! │  Router  │──▶│ BriefStore │──▶│ Resource API │──▶│ ApiClient │──▶ REST API
//! │ (views)  │   │  (state)   │   │ briefs/...   │   │ (reqwest) │
//! └──────────┘   └────────────┘   └──────────────┘   └───────────┘
//! ```
//!
//! Views call store actions; store actions call one or more resource API
//! methods; those go through the single [`http::ApiClient`], which logs
//! every failure once and returns it unchanged.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brief_assistant::{config::Config, http::ApiClient, models::NewBrief, store::BriefStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = ApiClient::from_config(&Config::default(), "localhost")?;
//! let store = BriefStore::new(api);
//!
//! let brief = store.create_brief(&NewBrief::titled("Spring summit")).await?;
//! let state = store.snapshot().await;
//! assert_eq!(state.current_brief.map(|b| b.id), Some(brief.id));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and base URL resolution |
//! | [`http`] | HTTP client adapter and error type |
//! | [`api`] | Briefs, sections, documents and AI endpoints |
//! | [`models`] | Wire types |
//! | [`store`] | Application state and action orchestration |
//! | [`router`] | Path-to-view routing and titles |
//! | [`views`] | Terminal rendering of the views |
//! | [`commands`] | CLI command entry points |

pub mod api;
pub mod commands;
pub mod config;
pub mod http;
pub mod models;
pub mod router;
pub mod store;
pub mod views;
