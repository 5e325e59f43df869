pub mod pipeline;
pub mod plan;
