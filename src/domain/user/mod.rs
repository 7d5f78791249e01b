//! User module - administrable user accounts.

mod aggregate;

pub use aggregate::User;
