//! SQLite storage implementation for profiles.

mod model;
mod repository;

pub use model::{NewProfileDB, ProfileChangesetDB, ProfileDB};
pub use repository::ProfileRepository;
