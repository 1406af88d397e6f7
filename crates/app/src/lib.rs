//! # statusboard-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StatusSource`: deliver the current `stats.json` payload
//! - Define **driving/inbound** use-cases:
//!   - `BoardService`: run a render pass, expose cards and detail views,
//!     broadcast board updates
//!   - `Poller`: the single-flight background loop that refreshes the board
//! - Orchestrate domain objects without knowing *how* payloads are fetched
//!   or how cards are presented
//!
//! ## Dependency rule
//! Depends on `statusboard-domain` only (plus `tokio` for sync and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod poller;
pub mod ports;
pub mod services;
