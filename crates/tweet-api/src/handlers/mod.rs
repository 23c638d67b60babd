//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod comments;
pub mod health;
pub mod identity;
pub mod tweets;
