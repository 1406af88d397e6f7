//! # statusboard-domain
//!
//! Pure domain model for the statusboard server-status dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **server records** (the read-only input polled from `stats.json`)
//! - Define the **formatter** (byte counts, percentages, colours, uptime wording)
//! - Define **cards** (one addressable view-model per server) and the
//!   **board** that creates and patches them on every poll
//! - Define the **detail** view shown when a card is opened
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod board;
pub mod card;
pub mod detail;
pub mod format;
pub mod record;
