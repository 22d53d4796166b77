// Domain layer: records, artifacts and the ports pipelines are written against.

pub mod model;
pub mod ports;
