//! URL handling module for Sumi-Frontier
//!
//! This module provides the `Location` identity type and the canonicalization
//! rule that decides when two links point at the same page.
//!
//! Canonicalization is deliberately literal: apart from resolving relative
//! references and dropping the fragment, the text of a link is left alone.
//! Host case, default ports, trailing slashes and query strings are all
//! preserved, so `http://x.com` and `http://x.com/` are different Locations.

mod canonicalize;
mod location;

// Re-export main types and functions
pub use canonicalize::canonicalize;
pub use location::Location;
