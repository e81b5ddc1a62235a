//! State module for tracking crawl progress
//!
//! This module provides the per-run bookkeeping of the crawl frontier.
//!
//! # Components
//!
//! - `CrawlSession`: The pending queue, visited set, page counter and budget of one run
//! - `Termination`: Why a run stopped
//! - `NextLocation`: What the session hands back when asked for more work

mod session;

// Re-export main types
pub use session::{CrawlSession, NextLocation, Termination};
