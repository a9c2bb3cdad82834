//! Angry Flappy - slingshot-launched flappy bird in the terminal.
//!
//! The library holds the simulation ([`core`]), highscore and config
//! persistence ([`persistence`]) and the ratatui frontend ([`ui`]). The
//! binary wires them to a crossterm event loop.

pub mod build_info;
pub mod core;
pub mod logging;
pub mod persistence;
pub mod ui;
