//! Domain types and ports for the user registry.

pub mod error;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{EmailAddress, PersonName, User, UserDraft, UserId, UserValidationError};
