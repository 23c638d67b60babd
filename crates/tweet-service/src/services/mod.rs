//! Business logic services
//!
//! Services borrow a shared `ServiceContext` per request and orchestrate
//! repository calls, validation and authorization.

pub mod context;
pub mod error;
pub mod identity;
pub mod tweet;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use identity::{Caller, IdentityService};
pub use tweet::TweetService;
