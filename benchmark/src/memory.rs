//! Heap usage tracking.
//!
//! [TrackingAllocator] wraps the system allocator and keeps the number of
//! live heap bytes and their high-water mark. A binary opts in with
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//! ```
//!
//! Without it every measurement reads 0.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    sync::atomic::{AtomicUsize, Ordering},
};

pub struct TrackingAllocator;

static LIVE: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);
static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
            let live = LIVE.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
            PEAK.fetch_max(live, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        LIVE.fetch_sub(layout.size(), Ordering::Relaxed);
        System.dealloc(ptr, layout);
    }
}

/// Bytes currently allocated through [TrackingAllocator].
pub fn live_bytes() -> usize {
    LIVE.load(Ordering::Relaxed)
}

/// Whether [TrackingAllocator] is the global allocator of this process.
pub fn is_tracking() -> bool {
    ALLOCATIONS.load(Ordering::Relaxed) > 0
}

/// Runs `f` and returns its result with the peak number of heap bytes it
/// held above the level at the start of the call.
///
/// Allocations from other threads during the call are included.
pub fn measure<R>(f: impl FnOnce() -> R) -> (R, u64) {
    let baseline = LIVE.load(Ordering::Relaxed);
    PEAK.store(baseline, Ordering::Relaxed);

    let result = f();

    let peak = PEAK.load(Ordering::Relaxed);
    (result, peak.saturating_sub(baseline) as u64)
}
