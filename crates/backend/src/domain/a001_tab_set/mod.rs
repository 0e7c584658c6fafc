pub mod embed;
pub mod error;
pub mod repository;
pub mod service;
pub mod storage;

pub use error::TabSetError;
pub use storage::{MemoryTabSetStorage, TabSetStorage};
