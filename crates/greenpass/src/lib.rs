//! Core crate for the green passbook: Green Index scoring, tier benefits,
//! and receipt-history analytics.
//!
//! Everything in here is a pure computation over caller-supplied values; the
//! only outward dependency is the [`history::ReceiptStore`] trait, whose
//! implementations (and the HTTP server around all of this) live in the
//! `greenpass-api` service crate.

pub mod config;
pub mod error;
pub mod history;
pub mod scoring;
pub mod telemetry;
