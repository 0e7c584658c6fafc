pub mod aggregate;
pub mod dto;

pub use aggregate::{prepare_for_save, Tab, TabSet, TabSetId, TabSetValidationError};
pub use dto::{ErrorResponse, MessageResponse, SaveTabSetRequest, TabSetSummary};
