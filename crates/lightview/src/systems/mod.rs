pub mod bubble;
pub mod light_map;
pub mod placement;
pub mod lighting;
