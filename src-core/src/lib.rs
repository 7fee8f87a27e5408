//! Financial goals timeline core.
//!
//! Holds an ordered list of savings goals, projects when each one will be
//! reached by chaining them one after another, and translates drag gestures
//! into reorders of that list.

pub mod errors;
pub mod goals;

pub use errors::{Error, Result, ValidationError};
