pub mod application;
pub mod hello_world;
