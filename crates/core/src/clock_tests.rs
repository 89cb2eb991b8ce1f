// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[test]
fn system_clock_is_past_2020() {
    // 2020-01-01T00:00:00Z
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.epoch_ms();
    clock.advance(Duration::from_secs(60));
    assert_eq!(clock.epoch_ms() - t1, 60_000);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    clock2.advance(Duration::from_millis(42));
    assert_eq!(clock1.epoch_ms(), 1_000_042);
}

#[test]
fn fake_clock_default_starts_at_fixed_epoch() {
    assert_eq!(FakeClock::default().epoch_ms(), 1_000_000);
}
