//! Cat records and the read-only store that holds them

pub mod record;
pub mod store;

pub use record::Cat;
pub use store::RecordStore;
