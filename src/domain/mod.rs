// Domain layer: step outcomes and the process-spawning port.

pub mod model;
pub mod ports;
