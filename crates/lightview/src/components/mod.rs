pub mod color;
pub mod creature;
pub mod tile;
