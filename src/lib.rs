pub mod input;
pub mod packer;
pub mod render;
pub mod report;
pub mod types;
