// Domain layer: command model and ports. No process or terminal code here.

pub mod model;
pub mod ports;
