//! Domain and collaborator error types

mod domain_error;
mod enforcement_error;

pub use domain_error::DomainError;
pub use enforcement_error::EnforcementError;
