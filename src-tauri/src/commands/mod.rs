pub mod catalog;
pub mod plan;
pub mod wizard;
