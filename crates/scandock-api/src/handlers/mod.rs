pub mod autoscan;
pub mod scan;
