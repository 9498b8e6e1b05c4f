use std::sync::atomic::{AtomicU64, Ordering};

// Process-global so rigs built by different characters never share an id.
static NEXT_RIG_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_rig_id() -> u64 {
    NEXT_RIG_ID.fetch_add(1, Ordering::Relaxed)
}
