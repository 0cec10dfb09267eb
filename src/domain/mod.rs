// Domain layer: data model and ports. Depends only on std/serde and the crate's error type.

pub mod model;
pub mod ports;
