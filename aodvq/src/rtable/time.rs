// AODVQ: Multipath Routing Table for Ad-hoc Networks
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Time
//!
//! Absolute points in time, and the clocks used by the routing table to compute expiry
//! timestamps. All expiry timestamps are computed as `now + lifetime` at the moment an entry is
//! inserted, invalidated or blacklisted.

use std::cell::Cell;
use std::ops::Add;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Absolute point in time, measured from the start of the simulation (or of the clock).
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Default)]
pub struct Time(pub Duration);

impl Time {
    /// The start of the simulation
    pub const ZERO: Time = Time(Duration::from_secs(0));

    /// Create a point in time from a number of seconds since the start.
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Create a point in time from a number of milliseconds since the start.
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Number of seconds since the start
    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Returns the number of seconds from `self` until `later`. The result is negative if `later`
    /// lies before `self`.
    pub fn secs_until(&self, later: Time) -> f64 {
        later.as_secs_f64() - self.as_secs_f64()
    }

    /// Returns the duration from `self` until `later`, or `None` if `later` already passed.
    pub fn duration_until(&self, later: Time) -> Option<Duration> {
        later.0.checked_sub(self.0)
    }
}

/// Adding a duration saturates at the latest representable point in time.
impl Add<Duration> for Time {
    type Output = Time;

    fn add(self, rhs: Duration) -> Time {
        Time(self.0.checked_add(rhs).unwrap_or(Duration::MAX))
    }
}

/// Monotonic source of the current time.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Time;
}

/// # Simulated Clock
///
/// Clock for discrete-event simulation, which only moves when it is advanced explicitly. All
/// clones share the same time, such that the scheduler can keep one handle while the routing
/// table owns another one.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<Time>>,
}

impl SimClock {
    /// Create a new clock, starting at [`Time::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Jump to `time`. Jumping backwards is ignored, since the clock is monotonic.
    pub fn set(&self, time: Time) {
        if time > self.now.get() {
            self.now.set(time);
        }
    }
}

impl Clock for SimClock {
    fn now(&self) -> Time {
        self.now.get()
    }
}

/// Wall clock, measuring the time since it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a new wall clock, starting at [`Time::ZERO`] right now.
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Time {
        Time(self.start.elapsed())
    }
}
