//! Query engine entry points.
//!
//! # Responsibility
//! - Evaluate multi-field note filters over the repository's notes.
//! - Keep result ordering identical to storage order.

pub mod filter;
