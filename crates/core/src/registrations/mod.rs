//! Registrations module - materializes profiles from upstream
//! "subject registered" events.

mod registrations_model;
mod registrations_service;

pub use registrations_model::SubjectRegistered;
pub use registrations_service::RegistrationService;
