// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock source for history timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch. Entries record start and completion
/// times through this, so durations are deterministic under a fake.
pub trait Clock: Clone + Send + Sync + 'static {
    fn epoch_ms(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    const START_MS: u64 = 1_000_000;

    /// Manually advanced clock; clones share the same time.
    #[derive(Clone, Debug)]
    pub struct FakeClock {
        now_ms: Arc<Mutex<u64>>,
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self { now_ms: Arc::new(Mutex::new(START_MS)) }
        }

        pub fn advance(&self, duration: Duration) {
            *self.now_ms.lock() += duration.as_millis() as u64;
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for FakeClock {
        fn epoch_ms(&self) -> u64 {
            *self.now_ms.lock()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
