pub mod cube;
pub mod part;
pub mod robot;
pub mod search;
