//! Entity to model mappers
//!
//! Conversions between domain entities (tweet-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod comment;
mod session;
mod tweet;
mod user;

pub use user::UserInsert;
