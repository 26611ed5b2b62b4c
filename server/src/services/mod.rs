pub mod cube_codec;
pub mod factory;
pub mod listing;
pub mod query;
