pub mod archive;
pub mod catalog;
pub mod page;
