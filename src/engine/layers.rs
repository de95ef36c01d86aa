//! Layer computation - the pure part of the registry.
//!
//! The registry snapshots its reactive inputs into [`RegionSnapshot`]s and runs
//! these functions inside its deriveds. Keeping them free of signals makes the
//! geometry rules testable on their own.
//!
//! ```text
//! regions (registration order)
//!     → layout_sequence   (stable by `order`)
//!     → generate_layers   (running edge offsets)
//!     → derive_items      (offsets each region must respect + own size)
//!     → apply_overlaps    (declared "top:bottom" exceptions)
//! ```
//!
//! [`Geometry::compute`] runs the whole chain at once. The registry keeps a
//! single derived over it, so every value it hands out comes from the same
//! read of its inputs.

use std::collections::HashMap;

use crate::types::{Edges, Layer, LayoutItem, Overlap, OverlapAdjustment, Position, Z_INDEX_STRIDE};

/// One region's inputs, read at a single point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSnapshot {
    pub id: String,
    pub order: i32,
    pub position: Position,
    pub layout_size: f64,
    pub active: bool,
}

impl RegionSnapshot {
    /// Thickness this region adds to its edge right now.
    pub fn contribution(&self) -> f64 {
        if self.active { self.layout_size } else { 0.0 }
    }
}

/// A region's snapshot plus the inputs that only affect how it renders.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionState {
    pub snapshot: RegionSnapshot,
    pub element_size: Option<f64>,
    pub absolute: bool,
    pub disable_transitions: bool,
}

impl RegionState {
    pub fn id(&self) -> &str {
        &self.snapshot.id
    }
}

/// Layers, items and transition state computed from one set of region states.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Region states in registration order.
    pub regions: Vec<RegionState>,
    pub layers: Vec<Layer>,
    /// Items in layering order, overlaps applied.
    pub items: Vec<LayoutItem>,
    pub transitions_enabled: bool,
}

impl Geometry {
    pub fn compute(regions: Vec<RegionState>, overlaps: &[String]) -> Self {
        let snapshots: Vec<RegionSnapshot> =
            regions.iter().map(|region| region.snapshot.clone()).collect();
        let layers = generate_layers(&layout_sequence(&snapshots));
        let mut items = derive_items(&layers, |id| {
            snapshots
                .iter()
                .find(|region| region.id == id)
                .map(|region| region.layout_size)
        });
        apply_overlaps(&mut items, &compute_overlaps(overlaps, &snapshots));
        let transitions_enabled = !regions.iter().any(|region| region.disable_transitions);

        Self {
            regions,
            layers,
            items,
            transitions_enabled,
        }
    }

    pub fn empty() -> Self {
        Self::compute(Vec::new(), &[])
    }

    /// Layering snapshots in registration order.
    pub fn snapshots(&self) -> Vec<RegionSnapshot> {
        self.regions.iter().map(|region| region.snapshot.clone()).collect()
    }

    pub fn region(&self, id: &str) -> Option<&RegionState> {
        self.regions.iter().find(|region| region.id() == id)
    }

    pub fn item(&self, id: &str) -> Option<&LayoutItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Position of `id` among the computed items.
    pub fn item_index(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// `root + layers * 2 - index * 2`, with index -1 for an unknown id.
    pub fn z_index(&self, id: &str, root_z_index: i32) -> i32 {
        let index = self.item_index(id).map_or(-1, |index| index as i32);
        root_z_index + (self.layers.len() as i32 - index) * Z_INDEX_STRIDE
    }

    /// Offsets left for main content.
    pub fn main_edges(&self) -> Edges {
        final_edges(&self.layers)
    }
}

/// Order regions for layering: ascending `order`, ties kept in registration order.
pub fn layout_sequence(regions: &[RegionSnapshot]) -> Vec<&RegionSnapshot> {
    let mut sequence: Vec<&RegionSnapshot> = regions.iter().collect();
    // stable: equal orders keep registration order
    sequence.sort_by_key(|region| region.order);
    sequence
}

/// Walk the sequence and record the running offsets after each region.
///
/// Always starts with the origin layer. Inactive regions still get a layer,
/// carrying the unchanged offsets.
pub fn generate_layers(sequence: &[&RegionSnapshot]) -> Vec<Layer> {
    let mut previous = Edges::ZERO;
    let mut layers = Vec::with_capacity(sequence.len() + 1);
    layers.push(Layer::origin());

    for region in sequence {
        let edges = previous.with_added(region.position, region.contribution());
        layers.push(Layer {
            id: region.id.clone(),
            edges,
        });
        previous = edges;
    }

    layers
}

/// Pair every region with the layer before its own contribution.
///
/// `size_of` resolves a region's configured thickness; ids it cannot resolve
/// are skipped.
pub fn derive_items(layers: &[Layer], size_of: impl Fn(&str) -> Option<f64>) -> Vec<LayoutItem> {
    layers
        .iter()
        .skip(1)
        .zip(layers.iter())
        .filter_map(|(layer, preceding)| {
            let size = size_of(&layer.id)?;
            Some(LayoutItem::new(layer.id.clone(), preceding.edges, size))
        })
        .collect()
}

/// Resolve declared overlap pairs against the currently registered regions.
///
/// Pairs naming an unregistered id are skipped: they apply only while both
/// participants are live.
pub fn compute_overlaps(
    overlaps: &[String],
    regions: &[RegionSnapshot],
) -> HashMap<String, OverlapAdjustment> {
    let mut adjustments = HashMap::new();

    for overlap in overlaps.iter().filter_map(|raw| Overlap::parse(raw)) {
        let top = regions.iter().find(|region| region.id == overlap.top);
        let bottom = regions.iter().find(|region| region.id == overlap.bottom);
        let (Some(top), Some(bottom)) = (top, bottom) else {
            continue;
        };

        adjustments.insert(
            bottom.id.clone(),
            OverlapAdjustment {
                position: top.position,
                amount: top.layout_size,
            },
        );
        adjustments.insert(
            top.id.clone(),
            OverlapAdjustment {
                position: bottom.position,
                amount: -bottom.layout_size,
            },
        );
    }

    adjustments
}

/// Apply overlap adjustments to computed items in place.
pub fn apply_overlaps(
    items: &mut [LayoutItem],
    adjustments: &HashMap<String, OverlapAdjustment>,
) {
    for item in items.iter_mut() {
        if let Some(adjustment) = adjustments.get(&item.id) {
            *item.offset_mut(adjustment.position) += adjustment.amount;
        }
    }
}

/// Offsets remaining for main content: the last layer.
pub fn final_edges(layers: &[Layer]) -> Edges {
    layers.last().map(|layer| layer.edges).unwrap_or(Edges::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: &str, order: i32, position: Position, size: f64) -> RegionSnapshot {
        RegionSnapshot {
            id: id.to_string(),
            order,
            position,
            layout_size: size,
            active: true,
        }
    }

    fn sizes(regions: &[RegionSnapshot]) -> impl Fn(&str) -> Option<f64> + '_ {
        move |id| {
            regions
                .iter()
                .find(|region| region.id == id)
                .map(|region| region.layout_size)
        }
    }

    #[test]
    fn test_empty_layers_have_origin_only() {
        let layers = generate_layers(&[]);
        assert_eq!(layers, vec![Layer::origin()]);
        assert_eq!(final_edges(&layers), Edges::ZERO);
    }

    #[test]
    fn test_sequence_orders_by_priority_then_registration() {
        let regions = vec![
            region("late", 2, Position::Top, 10.0),
            region("a", 0, Position::Top, 10.0),
            region("b", 0, Position::Left, 10.0),
            region("early", -1, Position::Top, 10.0),
        ];

        let ids: Vec<&str> = layout_sequence(&regions)
            .iter()
            .map(|region| region.id.as_str())
            .collect();

        assert_eq!(ids, vec!["early", "a", "b", "late"]);
    }

    #[test]
    fn test_bar_then_drawer() {
        let regions = vec![
            region("bar", 0, Position::Top, 64.0),
            region("drawer", 0, Position::Left, 256.0),
        ];
        let layers = generate_layers(&layout_sequence(&regions));
        let items = derive_items(&layers, sizes(&regions));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0], LayoutItem::new("bar", Edges::ZERO, 64.0));
        assert_eq!(items[1].top, 64.0);
        assert_eq!(items[1].left, 0.0);
        assert_eq!(items[1].size, 256.0);

        let main = final_edges(&layers);
        assert_eq!(main.top, 64.0);
        assert_eq!(main.left, 256.0);
    }

    #[test]
    fn test_inactive_region_keeps_layer_but_adds_nothing() {
        let mut bar = region("bar", 0, Position::Top, 64.0);
        bar.active = false;
        let regions = vec![bar, region("drawer", 0, Position::Left, 256.0)];

        let layers = generate_layers(&layout_sequence(&regions));
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[1].id, "bar");
        assert_eq!(layers[1].edges, Edges::ZERO);

        let items = derive_items(&layers, sizes(&regions));
        assert_eq!(items[1].top, 0.0);
        // the item still reports its configured size
        assert_eq!(items[0].size, 64.0);
    }

    #[test]
    fn test_same_edge_regions_stack() {
        let regions = vec![
            region("system", 0, Position::Top, 24.0),
            region("bar", 0, Position::Top, 64.0),
        ];
        let layers = generate_layers(&layout_sequence(&regions));
        let items = derive_items(&layers, sizes(&regions));

        assert_eq!(items[0].top, 0.0);
        assert_eq!(items[1].top, 24.0);
        assert_eq!(final_edges(&layers).top, 88.0);
    }

    #[test]
    fn test_overlap_adjustments() {
        let regions = vec![
            region("bar", 0, Position::Top, 64.0),
            region("drawer", 0, Position::Left, 256.0),
        ];
        let overlaps = vec!["drawer:bar".to_string()];
        let adjustments = compute_overlaps(&overlaps, &regions);

        assert_eq!(
            adjustments.get("bar"),
            Some(&OverlapAdjustment {
                position: Position::Left,
                amount: 256.0,
            })
        );
        assert_eq!(
            adjustments.get("drawer"),
            Some(&OverlapAdjustment {
                position: Position::Top,
                amount: -64.0,
            })
        );

        let layers = generate_layers(&layout_sequence(&regions));
        let mut items = derive_items(&layers, sizes(&regions));
        apply_overlaps(&mut items, &adjustments);

        assert_eq!(items[0].left, 256.0);
        assert_eq!(items[1].top, 0.0);
    }

    #[test]
    fn test_overlap_with_unknown_id_is_ignored() {
        let regions = vec![region("bar", 0, Position::Top, 64.0)];
        let overlaps = vec!["bar:ghost".to_string(), "not-a-pair".to_string()];
        assert!(compute_overlaps(&overlaps, &regions).is_empty());
    }

    fn state(snapshot: RegionSnapshot) -> RegionState {
        RegionState {
            snapshot,
            element_size: None,
            absolute: false,
            disable_transitions: false,
        }
    }

    #[test]
    fn test_geometry_matches_the_pure_chain() {
        let regions = vec![
            region("bar", 0, Position::Top, 64.0),
            region("drawer", 0, Position::Left, 256.0),
        ];
        let overlaps = vec!["bar:drawer".to_string()];
        let geometry = Geometry::compute(regions.iter().cloned().map(state).collect(), &overlaps);

        let layers = generate_layers(&layout_sequence(&regions));
        let mut items = derive_items(&layers, sizes(&regions));
        apply_overlaps(&mut items, &compute_overlaps(&overlaps, &regions));

        assert_eq!(geometry.layers, layers);
        assert_eq!(geometry.items, items);
        assert_eq!(geometry.main_edges(), final_edges(&layers));
        assert_eq!(geometry.snapshots(), regions);
        assert!(geometry.transitions_enabled);
    }

    #[test]
    fn test_geometry_z_index() {
        let regions = vec![
            state(region("bar", 0, Position::Top, 64.0)),
            state(region("drawer", 0, Position::Left, 256.0)),
        ];
        let geometry = Geometry::compute(regions, &[]);

        assert_eq!(geometry.z_index("bar", 1000), 1006);
        assert_eq!(geometry.z_index("drawer", 1000), 1004);
        // unknown ids sort above everything
        assert_eq!(geometry.z_index("ghost", 1000), 1008);
    }

    #[test]
    fn test_geometry_transitions() {
        let mut bar = state(region("bar", 0, Position::Top, 64.0));
        bar.disable_transitions = true;
        let geometry = Geometry::compute(vec![bar], &[]);
        assert!(!geometry.transitions_enabled);

        let empty = Geometry::empty();
        assert!(empty.transitions_enabled);
        assert_eq!(empty.layers, vec![Layer::origin()]);
        assert!(empty.region("bar").is_none());
    }
}
