pub mod advisor;
pub mod allocator;
pub mod schema;
pub mod tiers;

pub use crate::domain::model::{
    Budget, BuildItem, BuildRequest, BuildResult, BuildSource, ComponentSlot, OwnedComponent,
    OwnedComponents, Recommendation,
};
pub use crate::domain::ports::{AdvisorSettings, BuildGenerator, UpstreamSettings};
pub use crate::utils::error::Result;
