//! Keep a list of items and pick one of them with a slot-machine style reveal.
//!
//! The [`wheel`] module holds the reusable parts: the windowed renderer and the
//! spin controller. Everything else is the terminal front end.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod items;
pub mod logging;
pub mod ui;
pub mod wheel;
