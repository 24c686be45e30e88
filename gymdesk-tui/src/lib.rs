//! Gym admin dashboard built on `gymtable`.
//!
//! Four list pages (members, classes, payments, equipment) share one table
//! renderer and one [`TableStyle`](gymtable::TableStyle). Each page owns its
//! snapshot and sort state; the renderer only echoes them.

pub mod app;
pub mod boundary;
pub mod config;
pub mod dirs;
pub mod error;
pub mod logging;
pub mod pages;
pub mod settings;
pub mod store;

pub use app::App;
pub use error::AppError;
