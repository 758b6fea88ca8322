pub mod submission_repo;

pub use submission_repo::SubmissionRepo;
