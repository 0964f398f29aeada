pub mod escl;
pub mod paperless;
pub mod scan;
