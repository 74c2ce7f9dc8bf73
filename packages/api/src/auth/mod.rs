//! Email + password authentication against the task backend.

mod client;
mod validation;

pub use client::{AuthClient, LOGIN_ENDPOINT, REGISTER_ENDPOINT};
pub use validation::{validate_email, validate_password};
