// Domain layer: entities, result shapes and the ports the engine reads through.

pub mod model;
pub mod ports;
