//! Accessible tab widget runtime
//!
//! - `state` - roving-tabindex selection state, independent of the DOM
//! - `component` - Leptos rendering, used by the editor's live preview
//! - `embed` - wiring onto server-rendered `[data-tabs]` markup

pub mod component;
pub mod embed;
pub mod state;

pub use component::TabWidget;
pub use state::{NavKey, TabWidgetState, WidgetIds};
