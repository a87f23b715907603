//! BikeHero agent console.
//!
//! A Dioxus front end for the BikeHero maintenance agent: a chat panel that
//! talks to `POST /chat/` and a history panel that lists `GET /chat/history/`.

pub mod api;
pub mod config;
pub mod state;
pub mod timestamp;
pub mod types;
pub mod ui;
pub mod views;
