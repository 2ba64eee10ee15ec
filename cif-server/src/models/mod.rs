//! CIF record types shared by the storage and HTTP layers

pub mod blob;
pub mod record;

pub use record::{CifKeyRow, CifRecord, CifUpdate, NewCifRecord};
