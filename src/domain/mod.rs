// Domain layer: the roster graph and the ports the engine talks through.

pub mod model;
pub mod ports;
