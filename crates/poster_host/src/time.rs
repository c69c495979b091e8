//! Time helpers shared across host contracts and adapters.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_OBSERVED_MS: Cell<u64> = const { Cell::new(0) };
}

fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a unix millisecond timestamp that never goes backwards within the current thread.
///
/// Wall-clock adjustments are absorbed by repeating the last observed value.
pub fn monotonic_now_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_OBSERVED_MS.with(|last| {
        let next = now.max(last.get());
        last.set(next);
        next
    })
}

/// Milliseconds from `since` to `now`, zero when `now` is earlier.
pub const fn elapsed_ms(since: u64, now: u64) -> u64 {
    now.saturating_sub(since)
}
