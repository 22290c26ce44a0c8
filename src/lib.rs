//! Reverie: a personal journal with local storage, writing prompts, and AI
//! feedback and search.
//!
//! Entries are kept in one of two places:
//!
//! | Backend | Layout | Write on add | Write on delete |
//! |---------|--------|--------------|-----------------|
//! | **Directory** | one pretty-printed `<id>.json` per entry | new file only | remove file; on failure mirror the collection to the fallback store |
//! | **Fallback store** | JSON array under one key of a key/value file | whole collection | whole collection |
//!
//! Every session starts on the fallback store. Selecting a directory moves it
//! onto the directory backend for the rest of the session.
//!
//! # Modules
//!
//! - [`config`]: configuration from TOML files and environment variables
//! - [`storage`]: directory backend, fallback store, directory picker
//! - [`journal`]: entry types, the [`journal::Journal`] repository, drafts and export
//! - [`ai`]: chat-completion client and the journaling [`ai::Assistant`]
//! - [`prompts`]: built-in, quote and AI writing prompts
//! - [`search`]: substring search and the overlapping-search guard
//! - [`voice`]: dictation into a draft
//! - [`api`]: axum HTTP API
//! - [`server`], [`cli`]: the binary's two front ends

pub mod ai;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod journal;
pub mod prompts;
pub mod search;
pub mod server;
pub mod storage;
pub mod voice;
