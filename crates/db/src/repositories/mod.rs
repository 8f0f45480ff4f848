//! Repository layer. Each repository is a stateless struct whose methods
//! take the pool explicitly, so callers control transaction scope.

pub mod activity_event_repo;
pub mod user_repo;

pub use activity_event_repo::ActivityEventRepo;
pub use user_repo::UserRepo;
