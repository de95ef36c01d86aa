//! Generated region ids.

use std::cell::Cell;

thread_local! {
    /// Counter for generated ids. Never reset, so ids stay unique per thread.
    static UID_COUNTER: Cell<u64> = const { Cell::new(0) };
}

/// Next unique id for a region that didn't name itself: `layout-item-N`.
pub fn generate_layout_item_id() -> String {
    UID_COUNTER.with(|counter| {
        let uid = counter.get();
        counter.set(uid + 1);
        format!("layout-item-{uid}")
    })
}
