//! Profiles module - domain models, services, and traits.

mod in_memory_repository;
mod profiles_model;
mod profiles_service;
mod profiles_traits;

pub use in_memory_repository::InMemoryProfileRepository;
pub use profiles_model::{
    validate_full_name, NewProfile, Profile, ProfileChanges, ProfileUpdate, FULL_NAME_MAX_CHARS,
};
pub use profiles_service::ProfileService;
pub use profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};
