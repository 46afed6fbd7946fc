pub mod bounds;
pub mod distributions;
pub mod vec;
