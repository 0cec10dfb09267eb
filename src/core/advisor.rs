use crate::core::allocator::BudgetAllocator;
use crate::domain::model::{Budget, BuildRequest, BuildSource, OwnedComponents, Recommendation};
use crate::domain::ports::BuildGenerator;
use crate::utils::error::Result;

/// Front door of the advisor: validates input, asks the upstream generator
/// when one is configured, and falls back to the allocator on any failure.
pub struct Advisor {
    allocator: BudgetAllocator,
    upstream: Option<Box<dyn BuildGenerator>>,
}

impl Advisor {
    pub fn new(allocator: BudgetAllocator, upstream: Option<Box<dyn BuildGenerator>>) -> Self {
        Self {
            allocator,
            upstream,
        }
    }

    pub fn offline(allocator: BudgetAllocator) -> Self {
        Self::new(allocator, None)
    }

    pub fn with_upstream<G: BuildGenerator + 'static>(allocator: BudgetAllocator, upstream: G) -> Self {
        Self::new(allocator, Some(Box::new(upstream)))
    }

    pub fn allocator(&self) -> &BudgetAllocator {
        &self.allocator
    }

    pub fn has_upstream(&self) -> bool {
        self.upstream.is_some()
    }

    /// Only an invalid budget is reported; upstream failures are absorbed.
    pub async fn recommend(
        &self,
        budget: &str,
        owned: &OwnedComponents,
    ) -> Result<Recommendation> {
        let budget = Budget::parse(budget)?;
        let request = BuildRequest::new(budget, owned.clone());

        if let Some(upstream) = &self.upstream {
            tracing::info!("Requesting build from {}", upstream.name());
            match upstream.generate(&request).await {
                Ok(build) => {
                    tracing::info!(
                        "{} returned {} components, total {}",
                        upstream.name(),
                        build.components.len(),
                        build.total_cost
                    );
                    return Ok(Recommendation {
                        source: BuildSource::Upstream,
                        build,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        "{} failed ({:?}): {}; using rule-based allocator",
                        upstream.name(),
                        e.category(),
                        e
                    );
                }
            }
        }

        Ok(Recommendation {
            source: BuildSource::Allocator,
            build: self.allocator.allocate(&request.budget, &request.owned),
        })
    }
}
