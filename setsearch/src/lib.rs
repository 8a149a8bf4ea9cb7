pub mod intersect;
pub mod visitor;
pub mod cost;
