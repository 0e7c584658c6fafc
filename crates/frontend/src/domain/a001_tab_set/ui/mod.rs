pub mod editor;
pub mod list;
pub mod page;
