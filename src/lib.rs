//! Task-list web application.
//!
//! Visitors keep an ephemeral task list in their session; registered users
//! keep a persistent one in SQLite. See [`app::build_router`] for the routes.
pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod views;
