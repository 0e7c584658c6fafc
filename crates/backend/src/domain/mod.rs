pub mod a001_tab_set;
