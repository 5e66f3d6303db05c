// Domain layer: request/response models and the ports the analyzer talks to.

pub mod model;
pub mod ports;
