use crate::core::tiers::{
    render_notes, GatingPolicy, PerformanceTable, SlotGate, TierTable, DEFAULT_NOTES_TEMPLATE,
};
use crate::domain::model::{Budget, BuildItem, BuildResult, ComponentSlot, OwnedComponents};
use crate::domain::ports::AdvisorSettings;
use crate::utils::error::Result;

/// Deterministic, rule-based build generator. Never fails for a valid budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAllocator {
    table: TierTable,
    policy: GatingPolicy,
    performance: PerformanceTable,
    notes_template: String,
}

impl Default for BudgetAllocator {
    fn default() -> Self {
        Self::new(TierTable::reference(), GatingPolicy::default())
    }
}

impl BudgetAllocator {
    pub fn new(table: TierTable, policy: GatingPolicy) -> Self {
        Self {
            table,
            policy,
            performance: PerformanceTable::reference(),
            notes_template: DEFAULT_NOTES_TEMPLATE.to_string(),
        }
    }

    pub fn from_settings<C: AdvisorSettings + ?Sized>(settings: &C) -> Self {
        Self::new(settings.tier_table(), settings.policy())
            .with_performance(settings.performance_table())
            .with_notes_template(settings.notes_template())
    }

    pub fn with_performance(mut self, performance: PerformanceTable) -> Self {
        self.performance = performance;
        self
    }

    pub fn with_notes_template(mut self, template: impl Into<String>) -> Self {
        self.notes_template = template.into();
        self
    }

    pub fn with_policy(mut self, policy: GatingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> GatingPolicy {
        self.policy
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    /// Validates the raw budget before doing any work.
    pub fn allocate_input(&self, budget: &str, owned: &OwnedComponents) -> Result<BuildResult> {
        let budget = Budget::parse(budget)?;
        Ok(self.allocate(&budget, owned))
    }

    pub fn allocate(&self, budget: &Budget, owned: &OwnedComponents) -> BuildResult {
        let mut items = Vec::new();
        let mut spent: u64 = 0;
        let mut snapshot: Option<f64> = None;

        for slot in ComponentSlot::ALL {
            if owned.owns(slot) {
                tracing::debug!("{}: already owned, skipped", slot);
                continue;
            }

            let Some(tiers) = self.table.get(slot) else {
                tracing::debug!("{}: no tiers configured", slot);
                continue;
            };

            let Some(tier) = tiers.select(budget) else {
                tracing::debug!("{}: budget {} below every tier", slot, budget);
                continue;
            };

            if tiers.gate == SlotGate::Remaining {
                let remaining = match self.policy {
                    GatingPolicy::Coarse => None,
                    GatingPolicy::Remaining => Some(budget.amount() - spent as f64),
                    GatingPolicy::RemainingSnapshot => {
                        Some(*snapshot.get_or_insert(budget.amount() - spent as f64))
                    }
                };

                if let Some(remaining) = remaining {
                    if remaining < tier.price as f64 {
                        tracing::debug!(
                            "{}: {} needs {} but only {} remains, omitted",
                            slot,
                            tier.model,
                            tier.price,
                            remaining
                        );
                        continue;
                    }
                }
            }

            tracing::debug!("{}: {} at {}", slot, tier.model, tier.price);
            spent = spent.saturating_add(tier.price);
            items.push(BuildItem::new(
                slot.label(),
                tier.model.as_str(),
                tier.price,
                tier.reason.as_str(),
            ));
        }

        let build = BuildResult::from_items(
            items,
            self.performance.summary_for(budget).to_string(),
            render_notes(&self.notes_template, budget),
        );

        tracing::info!(
            "Allocated {} components for budget {} ({} policy), total {}",
            build.components.len(),
            budget,
            self.policy,
            build.total_cost
        );

        build
    }
}
