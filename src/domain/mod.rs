// Domain layer: models and the sink ports the evaluator talks through.

pub mod model;
pub mod ports;
