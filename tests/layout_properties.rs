//! Property tests for the layer computation and registry lifecycle.

use proptest::prelude::*;
use spark_layout::engine::{
    RegionSnapshot, derive_items, final_edges, generate_layers, layout_sequence,
};
use spark_layout::{
    LayoutItemProps, LayoutRegistry, MainStyles, Position, PropValue, RegionInputs,
};
use spark_signals::{Signal, signal};

// =============================================================================
// Strategies
// =============================================================================

#[derive(Debug, Clone)]
struct RegionSpec {
    position: Position,
    size: u32,
    order: i32,
    active: bool,
}

fn arb_position() -> impl Strategy<Value = Position> {
    prop::sample::select(Position::ALL.to_vec())
}

fn arb_region() -> impl Strategy<Value = RegionSpec> {
    (arb_position(), 0u32..400, -3i32..3, any::<bool>()).prop_map(
        |(position, size, order, active)| RegionSpec {
            position,
            size,
            order,
            active,
        },
    )
}

fn register(registry: &LayoutRegistry, id: &str, spec: &RegionSpec) {
    registry
        .register(RegionInputs::new(
            id,
            LayoutItemProps {
                position: PropValue::Static(spec.position),
                layout_size: PropValue::Static(f64::from(spec.size)),
                order: PropValue::Static(spec.order),
                active: PropValue::Static(spec.active),
                ..Default::default()
            },
        ))
        .unwrap();
}

fn register_all(registry: &LayoutRegistry, specs: &[RegionSpec]) -> Vec<String> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let id = format!("region-{i}");
            register(registry, &id, spec);
            id
        })
        .collect()
}

/// A step applied to a live registry. Indices pick among the live regions.
#[derive(Debug, Clone)]
enum Step {
    Register(RegionSpec),
    Unregister(usize),
    ToggleActive(usize),
    SetOrder(usize, i32),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => arb_region().prop_map(Step::Register),
        1 => any::<usize>().prop_map(Step::Unregister),
        2 => any::<usize>().prop_map(Step::ToggleActive),
        2 => (any::<usize>(), -3i32..3).prop_map(|(index, order)| Step::SetOrder(index, order)),
    ]
}

/// A region as the model tracks it, with the signals it was registered with.
struct LiveRegion {
    id: String,
    position: Position,
    size: u32,
    order: Signal<i32>,
    active: Signal<bool>,
}

impl LiveRegion {
    fn snapshot(&self) -> RegionSnapshot {
        RegionSnapshot {
            id: self.id.clone(),
            order: self.order.get(),
            position: self.position,
            layout_size: f64::from(self.size),
            active: self.active.get(),
        }
    }
}

fn register_live(registry: &LayoutRegistry, id: String, spec: &RegionSpec) -> LiveRegion {
    let live = LiveRegion {
        id,
        position: spec.position,
        size: spec.size,
        order: signal(spec.order),
        active: signal(spec.active),
    };
    registry
        .register(RegionInputs::new(
            live.id.clone(),
            LayoutItemProps {
                position: PropValue::Static(live.position),
                layout_size: PropValue::Static(f64::from(live.size)),
                order: PropValue::Signal(live.order.clone()),
                active: PropValue::Signal(live.active.clone()),
                ..Default::default()
            },
        ))
        .unwrap();
    live
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Main padding on every edge is the sum of the active sizes on that edge.
    #[test]
    fn main_padding_sums_active_sizes(specs in prop::collection::vec(arb_region(), 0..12)) {
        let registry = LayoutRegistry::root();
        register_all(&registry, &specs);

        let padding = registry.main_styles().padding();
        for position in Position::ALL {
            let expected: f64 = specs
                .iter()
                .filter(|spec| spec.position == position && spec.active)
                .map(|spec| f64::from(spec.size))
                .sum();
            prop_assert_eq!(padding.get(position), expected);
        }
    }

    /// A lower order contributes first, whichever registers first.
    #[test]
    fn lower_order_contributes_first(
        position in arb_position(),
        low_size in 1u32..200,
        high_size in 1u32..200,
        low_order in -5i32..0,
        high_order in 0i32..5,
        low_first in any::<bool>(),
    ) {
        let registry = LayoutRegistry::root();
        let low = RegionSpec { position, size: low_size, order: low_order, active: true };
        let high = RegionSpec { position, size: high_size, order: high_order, active: true };
        if low_first {
            register(&registry, "low", &low);
            register(&registry, "high", &high);
        } else {
            register(&registry, "high", &high);
            register(&registry, "low", &low);
        }

        let low_item = registry.get_layout_item("low").unwrap();
        let high_item = registry.get_layout_item("high").unwrap();
        prop_assert_eq!(low_item.offset(position), 0.0);
        prop_assert_eq!(high_item.offset(position), f64::from(low_size));
    }

    /// Equal orders stack in registration order.
    #[test]
    fn ties_follow_registration(
        position in arb_position(),
        sizes in prop::collection::vec(1u32..100, 2..6),
        order in -3i32..3,
    ) {
        let registry = LayoutRegistry::root();
        let specs: Vec<RegionSpec> = sizes
            .iter()
            .map(|&size| RegionSpec { position, size, order, active: true })
            .collect();
        let ids = register_all(&registry, &specs);

        let mut expected = 0.0;
        for (id, size) in ids.iter().zip(&sizes) {
            prop_assert_eq!(registry.get_layout_item(id).unwrap().offset(position), expected);
            expected += f64::from(*size);
        }
    }

    /// Later registrations stack beneath earlier ones at equal order.
    #[test]
    fn z_index_decreases_with_registration(specs in prop::collection::vec(arb_region(), 1..12)) {
        let registry = LayoutRegistry::root();
        let flat: Vec<RegionSpec> = specs
            .into_iter()
            .map(|spec| RegionSpec { order: 0, ..spec })
            .collect();
        let ids = register_all(&registry, &flat);

        let z: Vec<i32> = ids.iter().map(|id| registry.region(id).unwrap().z_index()).collect();
        for pair in z.windows(2) {
            prop_assert!(pair[0] > pair[1], "z-indices not decreasing: {:?}", z);
        }
        prop_assert!(z.iter().all(|&z| z > registry.root_z_index()));
    }

    /// z-index follows the layering sequence for mixed orders.
    #[test]
    fn z_index_follows_items(specs in prop::collection::vec(arb_region(), 1..12)) {
        let registry = LayoutRegistry::root();
        register_all(&registry, &specs);

        let z: Vec<i32> = registry
            .items()
            .iter()
            .map(|item| registry.region(&item.id).unwrap().z_index())
            .collect();
        for pair in z.windows(2) {
            prop_assert!(pair[0] > pair[1]);
        }
    }

    /// Registering and unregistering everything restores the empty state.
    #[test]
    fn register_unregister_round_trip(specs in prop::collection::vec(arb_region(), 0..12)) {
        let registry = LayoutRegistry::root();
        let ids = register_all(&registry, &specs);
        for id in &ids {
            prop_assert!(registry.unregister(id));
        }

        prop_assert!(registry.items().is_empty());
        prop_assert_eq!(registry.layers().len(), 1);
        prop_assert_eq!(registry.main_styles(), MainStyles::default());
    }

    /// "a:b" moves b by a's thickness and a by minus b's, while both live.
    #[test]
    fn overlap_is_symmetric_and_removable(
        a in arb_region(),
        b in arb_region(),
        remove_a in any::<bool>(),
    ) {
        let plain = LayoutRegistry::root();
        register(&plain, "a", &a);
        register(&plain, "b", &b);

        let overlapped = LayoutRegistry::new(PropValue::Static(vec!["a:b".to_string()]), None);
        register(&overlapped, "a", &a);
        register(&overlapped, "b", &b);

        let a_plain = plain.get_layout_item("a").unwrap();
        let b_plain = plain.get_layout_item("b").unwrap();
        let a_over = overlapped.get_layout_item("a").unwrap();
        let b_over = overlapped.get_layout_item("b").unwrap();

        prop_assert_eq!(
            b_over.offset(a.position),
            b_plain.offset(a.position) + f64::from(a.size)
        );
        prop_assert_eq!(
            a_over.offset(b.position),
            a_plain.offset(b.position) - f64::from(b.size)
        );

        let (gone, kept) = if remove_a { ("a", "b") } else { ("b", "a") };
        plain.unregister(gone);
        overlapped.unregister(gone);
        prop_assert_eq!(overlapped.get_layout_item(kept), plain.get_layout_item(kept));
    }

    /// Reading after every step sees the same geometry as computing it from scratch.
    #[test]
    fn incremental_reads_match_fresh_computation(
        steps in prop::collection::vec(arb_step(), 1..30),
    ) {
        let registry = LayoutRegistry::root();
        let mut live: Vec<LiveRegion> = Vec::new();
        let mut next_id = 0;

        for step in steps {
            match step {
                Step::Register(spec) => {
                    let id = format!("region-{next_id}");
                    next_id += 1;
                    live.push(register_live(&registry, id, &spec));
                }
                Step::Unregister(index) if !live.is_empty() => {
                    let gone = live.remove(index % live.len());
                    prop_assert!(registry.unregister(&gone.id));
                }
                Step::ToggleActive(index) if !live.is_empty() => {
                    let region = &live[index % live.len()];
                    region.active.set(!region.active.get());
                }
                Step::SetOrder(index, order) if !live.is_empty() => {
                    live[index % live.len()].order.set(order);
                }
                _ => {}
            }

            let snapshots: Vec<RegionSnapshot> = live.iter().map(LiveRegion::snapshot).collect();
            let layers = generate_layers(&layout_sequence(&snapshots));
            let expected = derive_items(&layers, |id| {
                snapshots
                    .iter()
                    .find(|region| region.id == id)
                    .map(|region| region.layout_size)
            });

            prop_assert_eq!(registry.items(), expected);
            prop_assert_eq!(registry.main_styles(), MainStyles::new(final_edges(&layers), true));
            for region in &live {
                let item = registry.get_layout_item(&region.id);
                prop_assert!(item.is_some(), "{} missing from items", region.id);
            }
        }
    }
}
