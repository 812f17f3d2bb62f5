//! Four-lane tap-tile reaction game.
//!
//! The engine under [`game`] is a plain state machine driven by an external
//! tick source and raw key events; presentation and audio reach it only
//! through [`game::session::Session::snapshot`] and the [`traits`]
//! collaborator seams, so every rule is testable without a window.

pub mod app;
pub mod audio;
pub mod config;
pub mod game;
pub mod render;
pub mod traits;
