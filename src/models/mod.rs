pub mod generation;
pub mod jira;
pub mod session;
pub mod test_case;

pub use generation::*;
pub use jira::*;
pub use session::*;
pub use test_case::*;
