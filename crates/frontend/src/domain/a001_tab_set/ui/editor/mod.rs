//! Tab Set Editor UI Module
//!
//! MVVM split:
//! - model.rs: API functions (list, load, save, delete)
//! - view_model.rs: editor session state and commands
//! - view.rs: Leptos components

pub mod model;
mod view;
mod view_model;

pub use view::TabSetEditor;
pub use view_model::TabSetEditorVm;
