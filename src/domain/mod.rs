pub mod model;
pub mod primitive;
pub mod protocol;
