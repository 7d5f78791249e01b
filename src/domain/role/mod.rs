//! Role module - permission bundles.

mod aggregate;

pub use aggregate::Role;
