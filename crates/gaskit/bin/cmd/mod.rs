pub mod estimate;
pub mod serve;
