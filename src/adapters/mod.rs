pub mod parsers;
pub mod process;
pub mod stores;
