pub mod fixtures;
pub mod series;
