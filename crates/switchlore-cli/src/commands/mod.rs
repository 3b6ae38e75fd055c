//! Command implementations.

pub mod actions;
pub mod query;
pub mod sections;

pub use self::actions::execute_actions;
pub use self::query::execute_query;
pub use self::sections::execute_sections;
