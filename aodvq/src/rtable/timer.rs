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

//! # Timers
//!
//! Timers are owned by the routing protocol, not by the route entries. A route entry may only
//! carry the [`TimerToken`] of a timer scheduled on its behalf. When the routing table drops an
//! entry, it collects the token, and the protocol cancels it after draining
//! [`RoutingTable::take_released_timers`](crate::rtable::RoutingTable::take_released_timers).

use crate::rtable::Time;
use log::*;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled timer
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct TimerToken(u64);

/// # Timer Queue
///
/// Queue of timers, ordered by their deadline. Timers with the same deadline fire in the order
/// in which they were scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    next_token: u64,
    pending: BTreeMap<(Time, TimerToken), E>,
    deadlines: HashMap<TimerToken, Time>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    /// Create an empty timer queue
    pub fn new() -> Self {
        Self { next_token: 0, pending: BTreeMap::new(), deadlines: HashMap::new() }
    }

    /// Schedule `event` to fire at time `at`.
    pub fn schedule(&mut self, at: Time, event: E) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.insert((at, token), event);
        self.deadlines.insert(token, at);
        trace!("Schedule timer {:?} at {:.3}s", token, at.as_secs_f64());
        token
    }

    /// Schedule `event` to fire `delay` after `now`.
    pub fn schedule_in(&mut self, now: Time, delay: Duration, event: E) -> TimerToken {
        self.schedule(now + delay, event)
    }

    /// Cancel a timer. Returns the event, if the timer was still pending.
    pub fn cancel(&mut self, token: TimerToken) -> Option<E> {
        let at = self.deadlines.remove(&token)?;
        trace!("Cancel timer {:?}", token);
        self.pending.remove(&(at, token))
    }

    /// Cancel all given timers, and return how many of them were still pending.
    pub fn cancel_all<I>(&mut self, tokens: I) -> usize
    where
        I: IntoIterator<Item = TimerToken>,
    {
        tokens.into_iter().filter_map(|t| self.cancel(t)).count()
    }

    /// Remove and return all timers whose deadline is at or before `now`, ordered by deadline.
    pub fn pop_expired(&mut self, now: Time) -> Vec<(TimerToken, E)> {
        let mut expired = Vec::new();
        while let Some(&(at, token)) = self.pending.keys().next() {
            if at > now {
                break;
            }
            if let Some(event) = self.pending.remove(&(at, token)) {
                self.deadlines.remove(&token);
                expired.push((token, event));
            }
        }
        expired
    }

    /// Deadline of the next timer to fire
    pub fn next_deadline(&self) -> Option<Time> {
        self.pending.keys().next().map(|(at, _)| *at)
    }

    /// Returns `true` if the timer is still pending.
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.deadlines.contains_key(&token)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no timer is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
