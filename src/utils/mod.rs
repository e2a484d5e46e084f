pub mod file_operations;
pub mod generation_api;
pub mod jira_api;

pub use file_operations::*;
pub use generation_api::*;
pub use jira_api::*;
