// Domain layer: engine result types, batch job model, and ports.

pub mod model;
pub mod ports;
