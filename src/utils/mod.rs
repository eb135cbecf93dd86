pub mod collate;
pub mod format;
