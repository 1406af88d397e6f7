//! # statusboard-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered board** with the card markup the
//!   stylesheet expects (`.list-inner`, `#table-item-N`, progress bars,
//!   status dot) and a `<meta http-equiv="refresh">` matching the poll rate
//! - Serve the **detail view** of a clickable card as an open `<dialog>`
//! - Serve a small **JSON API** (`/api/servers`, `/api/servers/{key}`,
//!   `/api/servers/{key}/detail`) and an SSE stream of board updates
//! - Map application results into HTTP responses (HTML or JSON)
//!
//! ## Dependency rule
//! Depends on `statusboard-app` (for the port trait and services) and
//! `statusboard-domain` (for the view-models). Never leaks axum types into
//! the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
