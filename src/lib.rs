//! Reading log calendar with monthly reward ranks.
//!
//! The reward math lives in [`tracker`] as pure functions over [`models`]
//! snapshots; [`db`] persists those snapshots through a [`db::KeyValueStore`].

pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod tracker;
pub mod tui;
pub mod utils;
