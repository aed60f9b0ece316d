pub mod api;
pub mod reviewers_client;

pub use api::{HttpOutcome, LoginAttempt, ReviewersApi};
pub use reviewers_client::{auth_headers, ReviewersClient};
