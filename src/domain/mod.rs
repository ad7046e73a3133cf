pub mod models;
pub mod plan;
pub mod recommendation;
pub mod signals;
pub mod switches;
