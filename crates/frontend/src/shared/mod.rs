pub mod api_utils;
pub mod clipboard;
pub mod icons;
pub mod tab_widget;
