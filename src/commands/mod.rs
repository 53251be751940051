pub mod benchmark;
pub mod scan;
pub mod status;
