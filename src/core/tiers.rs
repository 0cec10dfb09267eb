//! Tier tables that drive the allocator.
//!
//! A slot's tiers are (minimum budget, model, price, reason) rows. The row with
//! the highest threshold the budget meets is selected; slots with a floor fall
//! back to their cheapest row. Prices are whole PHP.

use crate::domain::model::{Budget, ComponentSlot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    #[serde(default)]
    pub min_budget: u64,
    pub model: String,
    pub price: u64,
    #[serde(default)]
    pub reason: String,
}

impl Tier {
    pub fn new(min_budget: u64, model: &str, price: u64, reason: &str) -> Self {
        Self {
            min_budget,
            model: model.to_string(),
            price,
            reason: reason.to_string(),
        }
    }
}

/// What decides whether a selected tier actually makes it into the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotGate {
    /// Tier thresholds against the original budget are the only gate.
    #[default]
    Budget,
    /// The tier's price must also fit in what is left of the budget.
    Remaining,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTiers {
    #[serde(default)]
    pub gate: SlotGate,
    #[serde(default = "default_floor")]
    pub floor: bool,
    pub options: Vec<Tier>,
}

fn default_floor() -> bool {
    true
}

impl SlotTiers {
    pub fn new(gate: SlotGate, floor: bool, options: Vec<Tier>) -> Self {
        Self {
            gate,
            floor,
            options,
        }
    }

    pub fn single(gate: SlotGate, tier: Tier) -> Self {
        Self::new(gate, true, vec![tier])
    }

    /// Highest threshold met wins (`>=`); otherwise the floor, if any.
    pub fn select(&self, budget: &Budget) -> Option<&Tier> {
        let met = self
            .options
            .iter()
            .filter(|tier| budget.meets(tier.min_budget))
            .max_by_key(|tier| tier.min_budget);

        match met {
            Some(tier) => Some(tier),
            None if self.floor => self.options.iter().min_by_key(|tier| tier.min_budget),
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    slots: BTreeMap<ComponentSlot, SlotTiers>,
}

impl TierTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// PHP market fixtures the web advisor shipped with. hdd has no tiers.
    pub fn reference() -> Self {
        Self::empty()
            .with_slot(
                ComponentSlot::Processor,
                SlotTiers::new(
                    SlotGate::Budget,
                    true,
                    vec![
                        Tier::new(
                            30000,
                            "AMD Ryzen 5 5600X",
                            12000,
                            "Excellent price-to-performance ratio for gaming and productivity",
                        ),
                        Tier::new(
                            20000,
                            "AMD Ryzen 5 3600",
                            8000,
                            "Great budget CPU with solid performance",
                        ),
                        Tier::new(
                            0,
                            "AMD Ryzen 3 3200G",
                            5500,
                            "Budget CPU with integrated graphics",
                        ),
                    ],
                ),
            )
            .with_slot(
                ComponentSlot::Motherboard,
                SlotTiers::single(
                    SlotGate::Budget,
                    Tier::new(
                        0,
                        "MSI B450M PRO-VDH MAX",
                        4500,
                        "Reliable micro-ATX motherboard with good features",
                    ),
                ),
            )
            .with_slot(
                ComponentSlot::Memory,
                SlotTiers::single(
                    SlotGate::Budget,
                    Tier::new(
                        0,
                        "16GB DDR4-3200 (2x8GB)",
                        3500,
                        "16GB is the sweet spot for modern gaming and multitasking",
                    ),
                ),
            )
            .with_slot(
                ComponentSlot::Gpu,
                SlotTiers::new(
                    SlotGate::Budget,
                    false,
                    vec![
                        Tier::new(
                            50000,
                            "RTX 4060 Ti",
                            25000,
                            "Great 1440p gaming performance with ray tracing support",
                        ),
                        Tier::new(
                            35000,
                            "RTX 4060",
                            18000,
                            "Solid 1080p gaming performance with modern features",
                        ),
                    ],
                ),
            )
            .with_slot(
                ComponentSlot::Ssd,
                SlotTiers::single(
                    SlotGate::Remaining,
                    Tier::new(
                        0,
                        "500GB NVMe SSD",
                        3000,
                        "Fast boot times and application loading",
                    ),
                ),
            )
            .with_slot(
                ComponentSlot::Psu,
                SlotTiers::single(
                    SlotGate::Remaining,
                    Tier::new(
                        0,
                        "650W 80+ Bronze PSU",
                        3500,
                        "Reliable power delivery with efficiency certification",
                    ),
                ),
            )
            .with_slot(
                ComponentSlot::Casing,
                SlotTiers::single(
                    SlotGate::Remaining,
                    Tier::new(
                        0,
                        "Cooler Master MasterBox Q300L",
                        2500,
                        "Compact micro-ATX case with good airflow",
                    ),
                ),
            )
            .with_slot(
                ComponentSlot::CpuCooler,
                SlotTiers::single(
                    SlotGate::Remaining,
                    Tier::new(
                        0,
                        "Cooler Master Hyper 212",
                        1500,
                        "Reliable air cooler for most CPUs",
                    ),
                ),
            )
    }

    pub fn with_slot(mut self, slot: ComponentSlot, tiers: SlotTiers) -> Self {
        self.slots.insert(slot, tiers);
        self
    }

    pub fn set(&mut self, slot: ComponentSlot, tiers: SlotTiers) {
        self.slots.insert(slot, tiers);
    }

    pub fn get(&self, slot: ComponentSlot) -> Option<&SlotTiers> {
        self.slots.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentSlot, &SlotTiers)> {
        self.slots.iter()
    }
}

/// How remaining-gated slots are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatingPolicy {
    /// Every slot is tiered off the original budget; remaining gates are ignored.
    Coarse,
    /// Remaining-gated slots need `budget - spent so far >= price`, re-checked per slot.
    Remaining,
    /// Remainder is taken once, at the first remaining-gated slot, and every
    /// remaining-gated slot is checked against that one value.
    #[default]
    RemainingSnapshot,
}

impl GatingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatingPolicy::Coarse => "coarse",
            GatingPolicy::Remaining => "remaining",
            GatingPolicy::RemainingSnapshot => "remaining-snapshot",
        }
    }
}

impl fmt::Display for GatingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coarse" => Ok(GatingPolicy::Coarse),
            "remaining" => Ok(GatingPolicy::Remaining),
            "remaining-snapshot" | "snapshot" => Ok(GatingPolicy::RemainingSnapshot),
            other => Err(format!(
                "unknown gating policy '{}', expected coarse, remaining or remaining-snapshot",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceBand {
    pub min_budget: u64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceTable {
    #[serde(default)]
    pub bands: Vec<PerformanceBand>,
    pub default: String,
}

impl PerformanceTable {
    pub fn new(bands: Vec<PerformanceBand>, default: impl Into<String>) -> Self {
        Self {
            bands,
            default: default.into(),
        }
    }

    pub fn reference() -> Self {
        Self::new(
            vec![
                PerformanceBand {
                    min_budget: 40000,
                    summary: "High-end gaming and content creation".to_string(),
                },
                PerformanceBand {
                    min_budget: 25000,
                    summary: "Solid 1080p gaming performance".to_string(),
                },
            ],
            "Budget-friendly for basic gaming and productivity",
        )
    }

    pub fn summary_for(&self, budget: &Budget) -> &str {
        self.bands
            .iter()
            .filter(|band| budget.meets(band.min_budget))
            .max_by_key(|band| band.min_budget)
            .map(|band| band.summary.as_str())
            .unwrap_or(&self.default)
    }
}

impl Default for PerformanceTable {
    fn default() -> Self {
        Self::reference()
    }
}

pub const DEFAULT_NOTES_TEMPLATE: &str = "This build is optimized for your ₱{budget} PHP budget. \
Prices are estimated based on Philippine market rates and may vary.";

pub fn render_notes(template: &str, budget: &Budget) -> String {
    template.replace("{budget}", budget.as_entered())
}
