pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::InferenceClient;
pub use config::AdvisorConfig;
pub use core::{advisor::Advisor, allocator::BudgetAllocator};
pub use domain::model::{
    Budget, BuildItem, BuildResult, BuildSource, ComponentSlot, OwnedComponent, OwnedComponents,
    Recommendation,
};
pub use utils::error::{AdvisorError, Result};
