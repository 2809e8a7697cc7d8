pub mod repo;

pub use repo::{GitRepo, LOG_TIME_FORMAT};
