//! RegionSlots - the reactive inputs of one registered region.
//!
//! Each registered region gets one `RegionSlots` that lives until it is
//! unregistered. Every input is a `Slot` bound to the caller's prop (signal,
//! getter, or static value), so the registry deriveds pick up changes just by
//! reading `.get()`.

use spark_signals::{slot, Slot};

use crate::types::Position;

use super::layers::{RegionSnapshot, RegionState};

/// Bind a PropValue to a Slot, keeping signals and getters live.
macro_rules! bind_slot {
    ($slot:expr, $prop:expr) => {
        match $prop {
            $crate::primitives::PropValue::Static(v) => $slot.set_value(v),
            $crate::primitives::PropValue::Signal(s) => $slot.set_signal(s),
            $crate::primitives::PropValue::Getter(g) => $slot.set_signal_readonly(move || g()),
        }
    };
}

pub(crate) use bind_slot;

/// Reactive inputs of one region.
pub struct RegionSlots {
    pub id: String,

    /// Layering priority, lower first.
    pub order: Slot<i32>,

    /// Edge the region is pinned to.
    pub position: Slot<Position>,

    /// Thickness along the region's axis when active.
    pub layout_size: Slot<f64>,

    /// Rendered thickness, if it differs from the layout thickness.
    pub element_size: Slot<Option<f64>>,

    /// Effective active flag (already folded with kept-alive suspension).
    pub active: Slot<bool>,

    pub disable_transitions: Slot<bool>,

    /// Position relative to the nearest positioned ancestor.
    pub absolute: Slot<bool>,
}

impl RegionSlots {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            order: slot(Some(0)),
            position: slot(Some(Position::Top)),
            layout_size: slot(Some(0.0)),
            element_size: slot(Some(None)),
            active: slot(Some(true)),
            disable_transitions: slot(Some(false)),
            absolute: slot(Some(false)),
        }
    }

    /// Thickness with invalid values dropped to zero.
    ///
    /// `register` rejects invalid sizes up front; this only catches a bound
    /// signal that later turned bad.
    pub fn resolved_layout_size(&self) -> f64 {
        let size = self.layout_size.get();
        if size.is_finite() && size >= 0.0 {
            size
        } else {
            tracing::warn!(id = %self.id, size, "dropping invalid layout size");
            0.0
        }
    }

    pub fn resolved_element_size(&self) -> Option<f64> {
        match self.element_size.get() {
            Some(size) if size.is_finite() && size >= 0.0 => Some(size),
            Some(size) => {
                tracing::warn!(id = %self.id, size, "dropping invalid element size");
                None
            }
            None => None,
        }
    }

    /// Read the layering inputs. Tracks every slot it reads.
    pub fn snapshot(&self) -> RegionSnapshot {
        RegionSnapshot {
            id: self.id.clone(),
            order: self.order.get(),
            position: self.position.get(),
            layout_size: self.resolved_layout_size(),
            active: self.active.get(),
        }
    }

    /// Read every input. Tracks every slot it reads.
    pub fn state(&self) -> RegionState {
        RegionState {
            snapshot: self.snapshot(),
            element_size: self.resolved_element_size(),
            absolute: self.absolute.get(),
            disable_transitions: self.disable_transitions.get(),
        }
    }

    /// Break all reactive connections.
    ///
    /// Called from `unregister` so a still-live signal no longer reaches into
    /// a region that is gone.
    pub fn disconnect(&self) {
        self.order.set_value(0);
        self.position.set_value(Position::Top);
        self.layout_size.set_value(0.0);
        self.element_size.set_value(None);
        self.active.set_value(false);
        self.disable_transitions.set_value(false);
        self.absolute.set_value(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::PropValue;
    use spark_signals::signal;

    #[test]
    fn test_region_slots_defaults() {
        let region = RegionSlots::new("bar");
        assert_eq!(region.order.get(), 0);
        assert_eq!(region.position.get(), Position::Top);
        assert_eq!(region.element_size.get(), None);
        assert!(region.active.get());
    }

    #[test]
    fn test_region_slots_bound_signal() {
        let region = RegionSlots::new("bar");
        let size = signal(64.0);

        bind_slot!(region.layout_size, PropValue::Signal(size.clone()));
        assert_eq!(region.snapshot().layout_size, 64.0);

        size.set(48.0);
        assert_eq!(region.snapshot().layout_size, 48.0);
    }

    #[test]
    fn test_invalid_size_resolves_to_zero() {
        let region = RegionSlots::new("bar");
        region.layout_size.set_value(f64::NAN);
        assert_eq!(region.resolved_layout_size(), 0.0);

        region.element_size.set_value(Some(-4.0));
        assert_eq!(region.resolved_element_size(), None);
    }

    #[test]
    fn test_state_reads_render_inputs() {
        let region = RegionSlots::new("rail");
        bind_slot!(region.element_size, PropValue::Static(Some(56.0)));
        bind_slot!(region.absolute, PropValue::Static(true));

        let state = region.state();
        assert_eq!(state.id(), "rail");
        assert_eq!(state.element_size, Some(56.0));
        assert!(state.absolute);
        assert!(!state.disable_transitions);
    }

    #[test]
    fn test_disconnect_detaches_signal() {
        let region = RegionSlots::new("bar");
        let active = signal(true);
        bind_slot!(region.active, PropValue::Signal(active.clone()));

        region.disconnect();
        active.set(true);
        assert!(!region.active.get());
    }
}
