pub mod cubes;
pub mod factory;
