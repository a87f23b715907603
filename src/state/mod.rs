//! Renderer-independent panel state.
//!
//! Each panel keeps one of these inside a signal. An operation is split into a
//! `begin_*` step that admits it (single flight), an async step that talks to
//! the backend, and a `finish_*` step that always clears the loading flag.

pub mod chat;
pub mod history;

pub use chat::{ChatPanelState, PendingSend, SEND_FAILED_MESSAGE};
pub use history::{HISTORY_FAILED_MESSAGE, HistoryDisplay, HistoryPanelState, PendingFetch};
