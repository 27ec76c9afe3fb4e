pub mod bug_repo;

pub use bug_repo::BugRepo;
