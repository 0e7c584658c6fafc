pub mod drag_reorder;
pub mod gateway;
pub mod tab_list;
pub mod ui;
