//! Layout Registry - ordered regions and their derived geometry.
//!
//! One registry per layout scope. Regions register reactive inputs; the
//! registry keeps them in structural order and derives:
//!
//! ```text
//! registered ids + RegionSlots + overlaps → geometry (layers, items, transitions)
//!                                              ↓
//!                          main styles, per-region z-index / styles / scrim
//! ```
//!
//! Every derived downstream of `geometry` reads it and nothing else from the
//! region inputs. A derived must not read a source both directly and through
//! another derived over that source: the inner derived can be marked clean
//! without recomputing and hand back a stale value.
//!
//! All mutation happens in [`LayoutRegistry::register`] and
//! [`LayoutRegistry::unregister`]. The ordered-id signal is written last, so a
//! derived never sees a half-applied registration.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use spark_signals::{derived, signal, slot, Derived, Signal, Slot};

use crate::error::{LayoutError, Result};
use crate::primitives::{LayoutItemProps, PropValue};
use crate::style::{
    ItemStyleInputs, LayoutItemStyles, MainStyles, ScrimStyles, layout_item_styles,
};
use crate::types::{
    ContentRect, Layer, LayoutItem, MAX_REGIONS_PER_TIER, NESTED_Z_INDEX_STEP, Position,
    ROOT_Z_INDEX, TreePath,
};

use super::layers::{Geometry, RegionSnapshot};
use super::region::{RegionSlots, bind_slot};

// =============================================================================
// Types
// =============================================================================

/// A boxed derived, shareable between the registry and region handles.
pub type Computed<T> = Rc<Derived<T, Box<dyn Fn() -> T>>>;

fn computed<T: Clone + PartialEq + 'static>(f: impl Fn() -> T + 'static) -> Computed<T> {
    let f: Box<dyn Fn() -> T> = Box::new(f);
    Rc::new(derived(f))
}

type RegionMap = Rc<RefCell<HashMap<String, Rc<RegionSlots>>>>;

/// Everything a region registers with.
#[derive(Clone)]
pub struct RegionInputs {
    pub id: String,
    pub tree_path: Option<TreePath>,
    pub order: PropValue<i32>,
    pub position: PropValue<Position>,
    pub layout_size: PropValue<f64>,
    pub element_size: PropValue<Option<f64>>,
    pub active: PropValue<bool>,
    pub absolute: PropValue<bool>,
    pub disable_transitions: Option<PropValue<bool>>,
}

impl RegionInputs {
    pub fn new(id: impl Into<String>, props: LayoutItemProps) -> Self {
        Self {
            id: id.into(),
            tree_path: props.tree_path,
            order: props.order,
            position: props.position,
            layout_size: props.layout_size,
            element_size: props.element_size,
            active: props.active,
            absolute: props.absolute,
            disable_transitions: props.disable_transitions,
        }
    }

    fn validate(&self) -> Result<()> {
        let layout_size = self.layout_size.get();
        if !is_valid_size(layout_size) {
            return Err(LayoutError::InvalidSize {
                id: self.id.clone(),
                value: layout_size.to_string(),
            });
        }
        if let Some(element_size) = self.element_size.get() {
            if !is_valid_size(element_size) {
                return Err(LayoutError::InvalidSize {
                    id: self.id.clone(),
                    value: element_size.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn is_valid_size(size: f64) -> bool {
    size.is_finite() && size >= 0.0
}

/// What `register` hands back: the region's own derived values.
#[derive(Clone)]
pub struct RegisteredRegion {
    id: String,
    z_index: Computed<i32>,
    styles: Computed<Result<LayoutItemStyles>>,
    scrim_styles: Computed<ScrimStyles>,
}

impl RegisteredRegion {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn z_index(&self) -> i32 {
        self.z_index.get()
    }

    /// The region's style. `Err` once the region is no longer registered.
    pub fn styles(&self) -> Result<LayoutItemStyles> {
        self.styles.get()
    }

    pub fn scrim_styles(&self) -> ScrimStyles {
        self.scrim_styles.get()
    }
}

impl fmt::Debug for RegisteredRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredRegion").field("id", &self.id).finish_non_exhaustive()
    }
}

// =============================================================================
// Registry State
// =============================================================================

struct RegistryState {
    root_z_index: i32,
    nested: bool,

    /// Region ids in structural order.
    registered: Signal<Vec<String>>,
    regions: RegionMap,
    paths: RefCell<HashMap<String, TreePath>>,
    handles: RefCell<HashMap<String, RegisteredRegion>>,

    overlaps: Rc<Slot<Vec<String>>>,
    mounted: Signal<bool>,
    layout_rect: Signal<Option<ContentRect>>,

    geometry: Computed<Geometry>,
    main_styles: Computed<MainStyles>,
}

/// The registry of one layout scope. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct LayoutRegistry {
    state: Rc<RegistryState>,
}

/// Non-owning reference to a registry, held by region handles.
#[derive(Clone)]
pub struct WeakLayoutRegistry {
    state: Weak<RegistryState>,
}

impl WeakLayoutRegistry {
    pub fn upgrade(&self) -> Option<LayoutRegistry> {
        self.state.upgrade().map(|state| LayoutRegistry { state })
    }
}

impl LayoutRegistry {
    /// Create a registry. `parent` is the nearest enclosing registry, if any.
    pub fn new(overlaps: PropValue<Vec<String>>, parent: Option<&LayoutRegistry>) -> Self {
        let root_z_index = match parent {
            Some(parent) => parent.root_z_index() - NESTED_Z_INDEX_STEP,
            None => ROOT_Z_INDEX,
        };
        if parent.is_some() {
            tracing::debug!(root_z_index, "created nested layout registry");
        }

        let registered: Signal<Vec<String>> = signal(Vec::new());
        let regions: RegionMap = Rc::new(RefCell::new(HashMap::new()));

        let overlaps_slot = Rc::new(slot(Some(Vec::new())));
        bind_slot!(overlaps_slot, overlaps);

        let geometry = {
            let registered = registered.clone();
            let regions = regions.clone();
            let overlaps = overlaps_slot.clone();
            computed(move || {
                let ids = registered.get();
                let live: Vec<Rc<RegionSlots>> = {
                    let regions = regions.borrow();
                    ids.iter().filter_map(|id| regions.get(id).cloned()).collect()
                };
                let states = live.iter().map(|region| region.state()).collect();
                let geometry = Geometry::compute(states, &overlaps.get());
                tracing::trace!(regions = geometry.regions.len(), "recomputed layout geometry");
                geometry
            })
        };

        let main_styles = {
            let geometry = geometry.clone();
            computed(move || {
                let geometry = geometry.get();
                MainStyles::new(geometry.main_edges(), geometry.transitions_enabled)
            })
        };

        Self {
            state: Rc::new(RegistryState {
                root_z_index,
                nested: parent.is_some(),
                registered,
                regions,
                paths: RefCell::new(HashMap::new()),
                handles: RefCell::new(HashMap::new()),
                overlaps: overlaps_slot,
                mounted: signal(false),
                layout_rect: signal(None),
                geometry,
                main_styles,
            }),
        }
    }

    /// Create a root registry with no overlaps.
    pub fn root() -> Self {
        Self::new(PropValue::Static(Vec::new()), None)
    }

    pub fn downgrade(&self) -> WeakLayoutRegistry {
        WeakLayoutRegistry {
            state: Rc::downgrade(&self.state),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a region.
    ///
    /// The id is inserted in structural order when a tree path is given,
    /// appended otherwise. Every `register` must be paired with one
    /// [`unregister`](Self::unregister) of the same id.
    pub fn register(&self, inputs: RegionInputs) -> Result<RegisteredRegion> {
        let state = &self.state;
        let id = inputs.id.clone();

        if state.regions.borrow().contains_key(&id) {
            return Err(LayoutError::DuplicateRegion(id));
        }
        inputs.validate()?;

        let region = Rc::new(RegionSlots::new(id.clone()));
        bind_slot!(region.order, inputs.order);
        bind_slot!(region.position, inputs.position);
        bind_slot!(region.layout_size, inputs.layout_size);
        bind_slot!(region.element_size, inputs.element_size);
        bind_slot!(region.active, inputs.active);
        bind_slot!(region.absolute, inputs.absolute);
        if let Some(disable_transitions) = inputs.disable_transitions {
            bind_slot!(region.disable_transitions, disable_transitions);
        }

        let handle = self.derive_region(&id);

        state.regions.borrow_mut().insert(id.clone(), region);
        state.handles.borrow_mut().insert(id.clone(), handle.clone());

        let mut registered = state.registered.get();
        let index = {
            let mut paths = state.paths.borrow_mut();
            let index = insertion_index(&registered, &paths, inputs.tree_path.as_ref());
            if let Some(path) = inputs.tree_path {
                paths.insert(id.clone(), path);
            }
            index
        };
        registered.insert(index, id.clone());
        let count = registered.len();
        state.registered.set(registered);

        tracing::debug!(id = %id, index, count, "registered layout item");
        if exceeds_tier_budget(count) {
            tracing::warn!(
                count,
                max = MAX_REGIONS_PER_TIER,
                "layout has more regions than its z-index tier can separate"
            );
        }

        Ok(handle)
    }

    /// Remove a region and all its inputs. Returns false if it wasn't registered.
    pub fn unregister(&self, id: &str) -> bool {
        let state = &self.state;
        let Some(region) = state.regions.borrow_mut().remove(id) else {
            tracing::trace!(id, "unregister of unknown layout item");
            return false;
        };
        state.paths.borrow_mut().remove(id);
        state.handles.borrow_mut().remove(id);

        let mut registered = state.registered.get();
        registered.retain(|registered_id| registered_id != id);
        let count = registered.len();
        state.registered.set(registered);

        region.disconnect();
        tracing::debug!(id, count, "unregistered layout item");
        true
    }

    /// Build the per-region deriveds: z-index, styles, scrim.
    fn derive_region(&self, id: &str) -> RegisteredRegion {
        let state = &self.state;
        let root_z_index = state.root_z_index;
        let nested = state.nested;

        let z_index = {
            let geometry = state.geometry.clone();
            let id = id.to_string();
            computed(move || geometry.get().z_index(&id, root_z_index))
        };

        let styles = {
            let geometry = state.geometry.clone();
            let mounted = state.mounted.clone();
            let id = id.to_string();
            computed(move || {
                let mounted = mounted.get();
                let geometry = geometry.get();
                let Some(region) = geometry.region(&id) else {
                    return Err(LayoutError::MissingLayoutItem(id.clone()));
                };
                layout_item_styles(&ItemStyleInputs {
                    id: &id,
                    position: region.snapshot.position,
                    active: region.snapshot.active,
                    absolute: region.absolute,
                    element_size: region.element_size,
                    nested,
                    z_index: geometry.z_index(&id, root_z_index),
                    transitions_enabled: geometry.transitions_enabled,
                    mounted,
                    item: geometry.item(&id),
                })
            })
        };

        let scrim_styles = {
            let z_index = z_index.clone();
            computed(move || ScrimStyles::new(z_index.get(), nested))
        };

        RegisteredRegion {
            id: id.to_string(),
            z_index,
            styles,
            scrim_styles,
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Base z-index: 1000 at the root, 100 lower per nesting level.
    pub fn root_z_index(&self) -> i32 {
        self.state.root_z_index
    }

    pub fn is_nested(&self) -> bool {
        self.state.nested
    }

    /// Registered ids in structural order.
    pub fn registered_ids(&self) -> Vec<String> {
        self.state.registered.get()
    }

    pub fn len(&self) -> usize {
        self.state.registered.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.state.regions.borrow().contains_key(id)
    }

    /// Everything derived from the current inputs, read at once.
    ///
    /// Deriveds built on top of the registry should read this rather than
    /// combine several of the accessors below.
    pub fn geometry(&self) -> Geometry {
        self.state.geometry.get()
    }

    /// Input snapshots in registration order.
    pub fn snapshots(&self) -> Vec<RegionSnapshot> {
        self.geometry().snapshots()
    }

    pub fn layers(&self) -> Vec<Layer> {
        self.geometry().layers
    }

    pub fn items(&self) -> Vec<LayoutItem> {
        self.geometry().items
    }

    /// The computed item for `id`, if registered and resolved.
    pub fn get_layout_item(&self, id: &str) -> Option<LayoutItem> {
        self.geometry().item(id).cloned()
    }

    pub fn main_styles(&self) -> MainStyles {
        self.state.main_styles.get()
    }

    pub fn transitions_enabled(&self) -> bool {
        self.geometry().transitions_enabled
    }

    /// Rendered thickness of a region, if it set one.
    pub fn element_size(&self, id: &str) -> Option<f64> {
        self.geometry().region(id).and_then(|region| region.element_size)
    }

    /// The derived values a region got back from `register`.
    pub fn region(&self, id: &str) -> Option<RegisteredRegion> {
        self.state.handles.borrow().get(id).cloned()
    }

    // =========================================================================
    // Overlaps
    // =========================================================================

    pub fn overlaps(&self) -> Vec<String> {
        self.state.overlaps.get()
    }

    pub fn set_overlaps(&self, overlaps: PropValue<Vec<String>>) {
        bind_slot!(self.state.overlaps, overlaps);
    }

    // =========================================================================
    // Mount / Resize
    // =========================================================================

    /// Mark the first measurement pass complete.
    pub fn mark_mounted(&self) {
        self.state.mounted.set(true);
    }

    pub fn is_mounted(&self) -> bool {
        self.state.mounted.get()
    }

    /// Content rectangle of the layout element, as last observed.
    pub fn layout_rect(&self) -> Option<ContentRect> {
        self.state.layout_rect.get()
    }

    pub fn layout_rect_signal(&self) -> Signal<Option<ContentRect>> {
        self.state.layout_rect.clone()
    }

    /// Feed a resize observation.
    pub fn set_layout_rect(&self, rect: Option<ContentRect>) {
        self.state.layout_rect.set(rect);
    }
}

impl fmt::Debug for LayoutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRegistry")
            .field("root_z_index", &self.state.root_z_index)
            .field("registered", &self.state.registered.get())
            .finish_non_exhaustive()
    }
}

/// True once the topmost region would reach the parent tier's base.
fn exceeds_tier_budget(count: usize) -> bool {
    count > MAX_REGIONS_PER_TIER
}

/// Where a new id goes in the structural order.
///
/// Before the first registered id whose path sorts after `path`; ids without
/// a path are never used as anchors. No path appends.
fn insertion_index(
    registered: &[String],
    paths: &HashMap<String, TreePath>,
    path: Option<&TreePath>,
) -> usize {
    let Some(path) = path else {
        return registered.len();
    };
    registered
        .iter()
        .position(|id| paths.get(id).is_some_and(|other| other > path))
        .unwrap_or(registered.len())
}

// =============================================================================
// Tests
// =============================================================================
