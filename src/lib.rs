//! Game catalog web application.
//!
//! Server-rendered CRUD for a game-and-console inventory:
//! - browse consoles, games, genres, and per-copy game instances
//! - create, update, and delete records through validated HTML forms
//! - dependency-aware deletion: a record with dependents is re-presented
//!   with the dependent list instead of being removed

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod routes;
pub mod state;
pub mod views;
