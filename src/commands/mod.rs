pub mod export;
pub mod generate;
pub mod jira;
pub mod view;

pub use export::*;
pub use generate::*;
pub use jira::*;
pub use view::*;
