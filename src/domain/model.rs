use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{check_budget_value, parse_budget};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Component categories a build may contain, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentSlot {
    Processor,
    Motherboard,
    Memory,
    Gpu,
    Ssd,
    Hdd,
    Psu,
    Casing,
    CpuCooler,
}

impl ComponentSlot {
    pub const ALL: [ComponentSlot; 9] = [
        ComponentSlot::Processor,
        ComponentSlot::Motherboard,
        ComponentSlot::Memory,
        ComponentSlot::Gpu,
        ComponentSlot::Ssd,
        ComponentSlot::Hdd,
        ComponentSlot::Psu,
        ComponentSlot::Casing,
        ComponentSlot::CpuCooler,
    ];

    /// Form key, as used in configuration files and `--owned slot=model`.
    pub fn key(&self) -> &'static str {
        match self {
            ComponentSlot::Processor => "processor",
            ComponentSlot::Motherboard => "motherboard",
            ComponentSlot::Memory => "memory",
            ComponentSlot::Gpu => "gpu",
            ComponentSlot::Ssd => "ssd",
            ComponentSlot::Hdd => "hdd",
            ComponentSlot::Psu => "psu",
            ComponentSlot::Casing => "casing",
            ComponentSlot::CpuCooler => "cpuCooler",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentSlot::Processor => "Processor",
            ComponentSlot::Motherboard => "Motherboard",
            ComponentSlot::Memory => "Memory",
            ComponentSlot::Gpu => "Graphics Card",
            ComponentSlot::Ssd => "SSD Storage",
            ComponentSlot::Hdd => "HDD Storage",
            ComponentSlot::Psu => "Power Supply",
            ComponentSlot::Casing => "PC Case",
            ComponentSlot::CpuCooler => "CPU Cooler",
        }
    }
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ComponentSlot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();

        ComponentSlot::ALL
            .into_iter()
            .find(|slot| slot.key().to_lowercase() == normalized)
            .ok_or_else(|| {
                let keys: Vec<&str> = ComponentSlot::ALL.iter().map(|s| s.key()).collect();
                format!("unknown component '{}', expected one of: {}", s, keys.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedComponent {
    #[serde(rename = "component")]
    pub slot: ComponentSlot,
    pub model: String,
}

impl OwnedComponent {
    pub fn new(slot: ComponentSlot, model: impl Into<String>) -> Self {
        Self {
            slot,
            model: model.into(),
        }
    }

    /// A blank model name means the user ticked the slot but named nothing.
    pub fn is_effective(&self) -> bool {
        !self.model.trim().is_empty()
    }
}

impl FromStr for OwnedComponent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (slot, model) = s
            .split_once('=')
            .ok_or_else(|| format!("expected slot=model, got '{}'", s))?;
        Ok(Self::new(slot.parse()?, model.trim()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnedComponents(Vec<OwnedComponent>);

impl OwnedComponents {
    pub fn new(components: Vec<OwnedComponent>) -> Self {
        Self(components)
    }

    pub fn owns(&self, slot: ComponentSlot) -> bool {
        self.0.iter().any(|c| c.slot == slot && c.is_effective())
    }

    /// Entries that actually exclude a slot, blank models dropped.
    pub fn effective(&self) -> impl Iterator<Item = &OwnedComponent> {
        self.0.iter().filter(|c| c.is_effective())
    }

    pub fn is_empty(&self) -> bool {
        self.effective().next().is_none()
    }
}

impl FromIterator<OwnedComponent> for OwnedComponents {
    fn from_iter<I: IntoIterator<Item = OwnedComponent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<OwnedComponent>> for OwnedComponents {
    fn from(components: Vec<OwnedComponent>) -> Self {
        Self(components)
    }
}

/// A validated budget: finite and strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    amount: f64,
    raw: String,
}

impl Budget {
    pub fn parse(input: &str) -> Result<Self> {
        let amount = parse_budget(input)?;
        Ok(Self {
            amount,
            raw: input.trim().to_string(),
        })
    }

    pub fn new(amount: f64) -> Result<Self> {
        let amount = check_budget_value(&amount.to_string(), amount)?;
        Ok(Self {
            amount,
            raw: amount.to_string(),
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn meets(&self, threshold: u64) -> bool {
        self.amount >= threshold as f64
    }

    /// The value as the caller wrote it.
    pub fn as_entered(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Budget {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        Budget::parse(s)
    }
}

/// Largest price accepted for a single part, from the upstream or a config file.
pub const MAX_PRICE: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildItem {
    #[serde(rename = "type")]
    pub slot_label: String,
    pub model: String,
    pub price: u64,
    #[serde(default)]
    pub reason: String,
}

impl BuildItem {
    pub fn new(
        slot_label: impl Into<String>,
        model: impl Into<String>,
        price: u64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            slot_label: slot_label.into(),
            model: model.into(),
            price,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    pub total_cost: u64,
    pub components: Vec<BuildItem>,
    pub performance: String,
    pub notes: String,
}

impl BuildResult {
    /// The total is always folded from the items, never taken from outside.
    /// It saturates at `u64::MAX`.
    pub fn from_items(components: Vec<BuildItem>, performance: String, notes: String) -> Self {
        let total_cost = components
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.price));
        Self {
            total_cost,
            components,
            performance,
            notes,
        }
    }

    /// Like `from_items`, but `None` when the item prices do not fit a `u64` total.
    pub fn try_from_items(
        components: Vec<BuildItem>,
        performance: String,
        notes: String,
    ) -> Option<Self> {
        let total_cost = components
            .iter()
            .try_fold(0u64, |total, item| total.checked_add(item.price))?;
        Some(Self {
            total_cost,
            components,
            performance,
            notes,
        })
    }

    pub fn find(&self, slot: ComponentSlot) -> Option<&BuildItem> {
        self.components
            .iter()
            .find(|item| item.slot_label == slot.label())
    }
}

/// Input handed to an upstream generator.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    pub budget: Budget,
    pub owned: OwnedComponents,
}

impl BuildRequest {
    pub fn new(budget: Budget, owned: OwnedComponents) -> Self {
        Self { budget, owned }
    }

    /// Slots the upstream is asked to fill. hdd is never requested.
    pub fn required_slots(&self) -> Vec<ComponentSlot> {
        ComponentSlot::ALL
            .into_iter()
            .filter(|slot| *slot != ComponentSlot::Hdd && !self.owned.owns(*slot))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSource {
    Upstream,
    Allocator,
}

impl fmt::Display for BuildSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildSource::Upstream => f.write_str("AI-generated"),
            BuildSource::Allocator => f.write_str("rule-based"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub source: BuildSource,
    #[serde(flatten)]
    pub build: BuildResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_parsing_accepts_form_keys() {
        assert_eq!("cpuCooler".parse::<ComponentSlot>().unwrap(), ComponentSlot::CpuCooler);
        assert_eq!("cpu_cooler".parse::<ComponentSlot>().unwrap(), ComponentSlot::CpuCooler);
        assert_eq!("CPU-Cooler".parse::<ComponentSlot>().unwrap(), ComponentSlot::CpuCooler);
        assert_eq!(" GPU ".parse::<ComponentSlot>().unwrap(), ComponentSlot::Gpu);
        assert!("keyboard".parse::<ComponentSlot>().is_err());
    }

    #[test]
    fn test_slot_serializes_as_form_key() {
        let json = serde_json::to_string(&ComponentSlot::CpuCooler).unwrap();
        assert_eq!(json, "\"cpuCooler\"");
        for slot in ComponentSlot::ALL {
            let json = serde_json::to_string(&slot).unwrap();
            assert_eq!(json, format!("\"{}\"", slot.key()));
        }
    }

    #[test]
    fn test_owned_component_parsing() {
        let owned: OwnedComponent = "processor=i5-10400".parse().unwrap();
        assert_eq!(owned.slot, ComponentSlot::Processor);
        assert_eq!(owned.model, "i5-10400");

        let blank: OwnedComponent = "gpu=   ".parse().unwrap();
        assert!(!blank.is_effective());

        assert!("processor".parse::<OwnedComponent>().is_err());
        assert!("mouse=logitech".parse::<OwnedComponent>().is_err());
    }

    #[test]
    fn test_blank_model_is_not_owned() {
        let owned = OwnedComponents::new(vec![
            OwnedComponent::new(ComponentSlot::Gpu, "  "),
            OwnedComponent::new(ComponentSlot::Memory, "32GB DDR4"),
        ]);
        assert!(!owned.owns(ComponentSlot::Gpu));
        assert!(owned.owns(ComponentSlot::Memory));
        assert_eq!(owned.effective().count(), 1);
        assert!(!owned.is_empty());
        assert!(OwnedComponents::new(vec![OwnedComponent::new(ComponentSlot::Ssd, "")]).is_empty());
    }

    #[test]
    fn test_budget_keeps_entered_text() {
        let budget = Budget::parse(" 15000.50 ").unwrap();
        assert_eq!(budget.amount(), 15000.5);
        assert_eq!(budget.to_string(), "15000.50");
        assert!(budget.meets(15000));
        assert!(!budget.meets(15001));

        assert_eq!(Budget::new(60000.0).unwrap().to_string(), "60000");
        assert!(Budget::new(0.0).is_err());
        assert!(Budget::new(f64::NAN).is_err());
    }

    #[test]
    fn test_build_result_total_is_folded() {
        let build = BuildResult::from_items(
            vec![
                BuildItem::new("Processor", "A", 12000, ""),
                BuildItem::new("Memory", "B", 3500, ""),
            ],
            String::new(),
            String::new(),
        );
        assert_eq!(build.total_cost, 15500);
        assert_eq!(build.find(ComponentSlot::Memory).unwrap().model, "B");
        assert!(build.find(ComponentSlot::Gpu).is_none());
    }

    #[test]
    fn test_build_result_total_never_overflows() {
        let items = || {
            vec![
                BuildItem::new("Processor", "A", u64::MAX - 10, ""),
                BuildItem::new("Memory", "B", 3500, ""),
            ]
        };
        let build = BuildResult::from_items(items(), String::new(), String::new());
        assert_eq!(build.total_cost, u64::MAX);
        assert!(BuildResult::try_from_items(items(), String::new(), String::new()).is_none());

        let build = BuildResult::try_from_items(
            vec![BuildItem::new("Memory", "B", MAX_PRICE, "")],
            String::new(),
            String::new(),
        )
        .unwrap();
        assert_eq!(build.total_cost, MAX_PRICE);
    }

    #[test]
    fn test_build_result_wire_shape() {
        let build = BuildResult::from_items(
            vec![BuildItem::new("CPU Cooler", "Hyper 212", 1500, "Quiet")],
            "ok".to_string(),
            "n".to_string(),
        );
        let value = serde_json::to_value(&build).unwrap();
        assert_eq!(value["totalCost"], 1500);
        assert_eq!(value["components"][0]["type"], "CPU Cooler");
        assert_eq!(value["components"][0]["reason"], "Quiet");
        assert_eq!(value["performance"], "ok");
    }

    #[test]
    fn test_required_slots_skip_owned_and_hdd() {
        let request = BuildRequest::new(
            Budget::parse("30000").unwrap(),
            OwnedComponents::new(vec![OwnedComponent::new(ComponentSlot::Gpu, "RTX 3060")]),
        );
        let slots = request.required_slots();
        assert_eq!(slots.len(), 7);
        assert!(!slots.contains(&ComponentSlot::Gpu));
        assert!(!slots.contains(&ComponentSlot::Hdd));
        assert_eq!(slots[0], ComponentSlot::Processor);
    }
}
