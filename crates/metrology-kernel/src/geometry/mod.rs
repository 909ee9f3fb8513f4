pub mod point;
pub mod vector;
pub mod segment;
pub mod transform;
pub mod intersection;
