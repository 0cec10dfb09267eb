use pc_build_advisor::core::tiers::{GatingPolicy, TierTable};
use pc_build_advisor::{
    Advisor, AdvisorError, Budget, BudgetAllocator, BuildResult, BuildSource, ComponentSlot,
    OwnedComponent, OwnedComponents,
};

const OPTIONAL_SLOTS: [ComponentSlot; 5] = [
    ComponentSlot::Gpu,
    ComponentSlot::Ssd,
    ComponentSlot::Psu,
    ComponentSlot::Casing,
    ComponentSlot::CpuCooler,
];

fn allocate(allocator: &BudgetAllocator, amount: u64, owned: &OwnedComponents) -> BuildResult {
    let budget = Budget::parse(&amount.to_string()).unwrap();
    allocator.allocate(&budget, owned)
}

fn optional_count(build: &BuildResult) -> usize {
    OPTIONAL_SLOTS
        .iter()
        .filter(|slot| build.find(**slot).is_some())
        .count()
}

fn budgets() -> impl Iterator<Item = u64> {
    (1..=120_000).step_by(250)
}

#[test]
fn test_every_valid_budget_produces_a_build() {
    for policy in [
        GatingPolicy::Coarse,
        GatingPolicy::Remaining,
        GatingPolicy::RemainingSnapshot,
    ] {
        let allocator = BudgetAllocator::new(TierTable::reference(), policy);
        for amount in budgets() {
            let build = allocate(&allocator, amount, &OwnedComponents::default());
            assert!(!build.components.is_empty(), "{} at {}", policy, amount);
            for slot in [
                ComponentSlot::Processor,
                ComponentSlot::Motherboard,
                ComponentSlot::Memory,
            ] {
                assert!(build.find(slot).is_some(), "{} missing at {}", slot, amount);
            }
            assert!(build.find(ComponentSlot::Hdd).is_none());
        }
    }
}

#[test]
fn test_allocation_is_deterministic() {
    let allocator = BudgetAllocator::default();
    let owned = OwnedComponents::new(vec![OwnedComponent::new(ComponentSlot::Memory, "32GB")]);
    for amount in [1, 15000, 35000, 60000] {
        assert_eq!(
            allocate(&allocator, amount, &owned),
            allocate(&allocator, amount, &owned)
        );
    }
}

#[test]
fn test_total_cost_matches_item_sum() {
    let allocator = BudgetAllocator::default();
    let owned = OwnedComponents::new(vec![OwnedComponent::new(ComponentSlot::Ssd, "970 EVO")]);
    for amount in budgets() {
        let build = allocate(&allocator, amount, &owned);
        let sum: u64 = build.components.iter().map(|item| item.price).sum();
        assert_eq!(build.total_cost, sum, "drift at {}", amount);
    }
}

#[test]
fn test_owned_slots_are_never_generated() {
    let allocator = BudgetAllocator::default();
    for slot in ComponentSlot::ALL {
        let owned = OwnedComponents::new(vec![OwnedComponent::new(slot, "Already have it")]);
        let build = allocate(&allocator, 100_000, &owned);
        assert!(build.find(slot).is_none(), "{} was generated", slot);
    }
}

#[test]
fn test_blank_owned_models_are_ignored() {
    let allocator = BudgetAllocator::default();
    let owned: OwnedComponents = ComponentSlot::ALL
        .into_iter()
        .map(|slot| OwnedComponent::new(slot, " \t "))
        .collect();

    assert_eq!(
        allocate(&allocator, 60000, &owned),
        allocate(&allocator, 60000, &OwnedComponents::default())
    );
}

#[test]
fn test_coarse_optional_count_is_monotonic() {
    let allocator = BudgetAllocator::default().with_policy(GatingPolicy::Coarse);
    let mut previous = 0;
    for amount in budgets() {
        let count = optional_count(&allocate(&allocator, amount, &OwnedComponents::default()));
        assert!(count >= previous, "count dropped at {}", amount);
        previous = count;
    }
}

#[test]
fn test_remaining_optional_count_is_monotonic_within_tier_bands() {
    // Bands between processor/gpu thresholds keep the budget-gated spend fixed.
    let bands = [(1, 19_999), (20_000, 29_999), (30_000, 34_999), (35_000, 49_999), (50_000, 120_000)];
    for policy in [GatingPolicy::Remaining, GatingPolicy::RemainingSnapshot] {
        let allocator = BudgetAllocator::default().with_policy(policy);
        for (low, high) in bands {
            let mut previous = 0;
            for amount in (low..=high).step_by(50) {
                let build = allocate(&allocator, amount, &OwnedComponents::default());
                let count = optional_count(&build);
                assert!(count >= previous, "{}: count dropped at {}", policy, amount);
                previous = count;
            }
        }
    }
}

#[test]
fn test_thresholds_are_inclusive() {
    let allocator = BudgetAllocator::default();
    let none = OwnedComponents::default();

    let at = allocate(&allocator, 50000, &none);
    let below = allocate(&allocator, 49999, &none);
    assert_eq!(at.find(ComponentSlot::Gpu).unwrap().price, 25000);
    assert_eq!(below.find(ComponentSlot::Gpu).unwrap().price, 18000);

    assert_eq!(
        allocate(&allocator, 20000, &none)
            .find(ComponentSlot::Processor)
            .unwrap()
            .price,
        8000
    );

    // 17000 - 5500 - 4500 - 3500 leaves exactly the psu price for every gated slot.
    let exact = allocate(&allocator, 17000, &none);
    assert_eq!(exact.find(ComponentSlot::Psu).unwrap().price, 3500);
    assert_eq!(exact.total_cost, 24000);
    let short = allocate(&allocator, 16999, &none);
    assert!(short.find(ComponentSlot::Psu).is_none());
    assert!(short.find(ComponentSlot::Casing).is_some());
    assert_eq!(short.total_cost, 20500);

    // With a running remainder, 22500 - 8000 - 4500 - 3500 - 3000 leaves exactly the psu price.
    let running = BudgetAllocator::default().with_policy(GatingPolicy::Remaining);
    let exact = allocate(&running, 22500, &none);
    assert_eq!(exact.find(ComponentSlot::Ssd).unwrap().price, 3000);
    assert_eq!(exact.find(ComponentSlot::Psu).unwrap().price, 3500);
    assert!(exact.find(ComponentSlot::Casing).is_none());
    assert!(exact.find(ComponentSlot::CpuCooler).is_none());
    assert_eq!(exact.total_cost, 22500);
}

#[test]
fn test_invalid_budgets_are_rejected() {
    let allocator = BudgetAllocator::default();
    for input in ["0", "-100", "abc", ""] {
        let result = allocator.allocate_input(input, &OwnedComponents::default());
        assert!(matches!(result, Err(AdvisorError::InvalidBudget { .. })), "{:?}", input);
    }
}

#[test]
fn test_scenario_60000_from_scratch() {
    let build = BudgetAllocator::default()
        .allocate_input("60000", &OwnedComponents::default())
        .unwrap();
    assert_eq!(build.components.len(), 8);
    assert_eq!(build.total_cost, 55500);
    assert_eq!(build.find(ComponentSlot::Gpu).unwrap().model, "RTX 4060 Ti");
}

#[test]
fn test_scenario_15000_with_owned_processor() {
    let owned = OwnedComponents::new(vec![OwnedComponent::new(
        ComponentSlot::Processor,
        "i5-10400",
    )]);
    let build = BudgetAllocator::default()
        .allocate_input("15000", &owned)
        .unwrap();

    let labels: Vec<&str> = build
        .components
        .iter()
        .map(|item| item.slot_label.as_str())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Motherboard",
            "Memory",
            "SSD Storage",
            "Power Supply",
            "PC Case",
            "CPU Cooler"
        ]
    );
    assert_eq!(build.total_cost, 18500);
}

#[test]
fn test_offline_advisor_matches_allocator() {
    let advisor = Advisor::offline(BudgetAllocator::default());
    let recommendation =
        tokio_test::block_on(advisor.recommend("42000", &OwnedComponents::default())).unwrap();

    assert_eq!(recommendation.source, BuildSource::Allocator);
    assert_eq!(
        recommendation.build,
        BudgetAllocator::default()
            .allocate_input("42000", &OwnedComponents::default())
            .unwrap()
    );
}
