pub mod catalog;
pub mod classify;
pub mod registry;
pub mod select;
