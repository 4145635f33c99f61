pub mod analysis;
pub mod entry;
