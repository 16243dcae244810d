pub mod task;
pub mod user;

pub use task::{TaskRecord, INITIAL_STATUS};
pub use user::{RegisterUser, RoleChange, RoleCount, User, UserSearchQuery, UserUpdate};
