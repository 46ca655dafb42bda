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

//! # Multipath Routing Table
//!
//! This module contains the routing table of a single node. It maps every destination to an
//! ordered list of [`RouteEntry`], one for each candidate path.

use crate::rtable::config::RoutingTableConfig;
use crate::rtable::{
    Address, Clock, ConfigError, InterfaceAddress, RouteEntry, RouteFlag, TableError, Time,
    TimerToken,
};
use itertools::Itertools;
use log::*;
use std::collections::BTreeMap;
use std::time::Duration;

/// Map from each destination to all its route entries, in insertion order.
pub type RouteMap = BTreeMap<Address, Vec<RouteEntry>>;

/// # Routing Table
///
/// Multipath routing table of one node. Each destination maps to a list of route entries, ordered
/// by insertion. Several entries towards the same destination may use the same next hop, unless
/// they are consolidated by [`RoutingTable::update`].
///
/// Most operations first [purge](RoutingTable::purge) the table: Expired valid routes are
/// invalidated (and kept for the bad-link lifetime), and expired invalid routes are removed.
/// Routes which are `InSearch` never expire.
///
/// A destination whose last entry is removed is removed as well.
///
/// All lookups return copies. To change the table, use one of the mutating methods, like
/// [`RoutingTable::update`] or [`RoutingTable::set_entry_state`].
#[derive(Debug)]
pub struct RoutingTable<C: Clock> {
    entries: RouteMap,
    /// Lifetime given to a route when it becomes invalid.
    bad_link_lifetime: Duration,
    clock: C,
    /// Timers attached to entries which were removed from the table.
    released_timers: Vec<TimerToken>,
}

impl<C: Clock> RoutingTable<C> {
    /// Create an empty routing table. Valid routes that become invalid are kept for
    /// `bad_link_lifetime`.
    pub fn new(bad_link_lifetime: Duration, clock: C) -> Self {
        Self { entries: BTreeMap::new(), bad_link_lifetime, clock, released_timers: Vec::new() }
    }

    /// Create an empty routing table, using the delete period of the configuration as bad-link
    /// lifetime.
    pub fn from_config(config: &RoutingTableConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.bad_link_lifetime(), clock))
    }

    /// Current time of the clock of this table
    pub fn now(&self) -> Time {
        self.clock.now()
    }

    /// Reference to the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Grace lifetime of invalid routes
    pub fn bad_link_lifetime(&self) -> Duration {
        self.bad_link_lifetime
    }

    /// Number of destinations in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table knows no destination.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over all known destinations, in ascending order. The table is not purged.
    pub fn destinations(&self) -> impl Iterator<Item = Address> + '_ {
        self.entries.keys().copied()
    }

    // ---------------------------------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------------------------------

    /// Returns all route entries towards `dst`, after purging the table.
    pub fn lookup_route(&mut self, dst: Address) -> Result<Vec<RouteEntry>, TableError> {
        self.routes(dst).map(|routes| routes.to_vec())
    }

    /// Returns all valid route entries towards `dst`. If `dst` is known, but none of its routes
    /// is valid, `TableError::NotFound` is returned.
    pub fn lookup_valid_route(&mut self, dst: Address) -> Result<Vec<RouteEntry>, TableError> {
        let valid: Vec<RouteEntry> =
            self.routes(dst)?.iter().filter(|e| e.flag() == RouteFlag::Valid).cloned().collect();
        if valid.is_empty() {
            trace!("Route to {} has no valid entry", dst);
            Err(TableError::NotFound(dst))
        } else {
            Ok(valid)
        }
    }

    /// Returns the first route entry towards `dst`.
    pub fn lookup_first(&mut self, dst: Address) -> Result<RouteEntry, TableError> {
        self.routes(dst)?.first().cloned().ok_or(TableError::NotFound(dst))
    }

    /// Returns the first valid route entry towards `dst`.
    pub fn lookup_first_valid(&mut self, dst: Address) -> Result<RouteEntry, TableError> {
        self.routes(dst)?
            .iter()
            .find(|e| e.flag() == RouteFlag::Valid)
            .cloned()
            .ok_or(TableError::NotFound(dst))
    }

    /// purge the table and return the stored routes of `dst`.
    fn routes(&mut self, dst: Address) -> Result<&[RouteEntry], TableError> {
        self.purge();
        if self.entries.is_empty() {
            trace!("Route to {} not found; the table is empty", dst);
            return Err(TableError::Empty);
        }
        match self.entries.get(&dst) {
            Some(routes) => {
                trace!("Route to {} found", dst);
                Ok(routes.as_slice())
            }
            None => {
                trace!("Route to {} not found", dst);
                Err(TableError::NotFound(dst))
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Insert, Update and Delete
    // ---------------------------------------------------------------------------------------------

    /// Append a route entry to the routes of its destination. Unless the entry is `InSearch`, its
    /// route request counter is reset.
    pub fn add_route(&mut self, mut entry: RouteEntry) {
        self.purge();
        if entry.flag() != RouteFlag::InSearch {
            entry.set_rreq_count(0);
        }
        let dst = entry.destination();
        let routes = self.entries.entry(dst).or_insert_with(Vec::new);
        routes.push(entry);
        debug!("New entry in routing table towards {} ({} in total)", dst, routes.len());
    }

    /// Remove all route entries towards `dst`, and return them.
    pub fn delete_route(&mut self, dst: Address) -> Result<Vec<RouteEntry>, TableError> {
        self.purge();
        match self.entries.remove(&dst) {
            Some(routes) => {
                debug!("Route deletion to {} successful", dst);
                self.released_timers.extend(routes.iter().filter_map(|e| e.ack_timer()));
                Ok(routes)
            }
            None => {
                debug!("Route deletion to {} not successful", dst);
                Err(TableError::NotFound(dst))
            }
        }
    }

    /// Update the routes towards the destination of `entry`.
    ///
    /// - If the destination has a single route, it is replaced by `entry`, regardless of the next
    ///   hop.
    /// - Otherwise, every route with the same next hop as `entry` is replaced by `entry` (with a
    ///   reset route request counter), unless that route is `InSearch`. In that case, it is
    ///   removed. All routes with a different next hop are kept. If no route has the same next
    ///   hop, `entry` is not inserted.
    pub fn update(&mut self, mut entry: RouteEntry) -> Result<(), TableError> {
        let dst = entry.destination();
        let routes = match self.entries.get_mut(&dst) {
            Some(routes) => routes,
            None => {
                debug!("Route update to {} fails; not found", dst);
                return Err(TableError::NotFound(dst));
            }
        };
        let new_timer = entry.ack_timer();

        if routes.len() == 1 {
            trace!("Replace the single route towards {}", dst);
            let old = std::mem::replace(&mut routes[0], entry);
            release_timer(&mut self.released_timers, &old, new_timer);
            return Ok(());
        }

        entry.set_rreq_count(0);
        let mut rebuilt = Vec::with_capacity(routes.len());
        for old in routes.drain(..) {
            if old.next_hop() != entry.next_hop() {
                rebuilt.push(old);
                continue;
            }
            if old.flag() == RouteFlag::InSearch {
                trace!("Drop route towards {} via {} in search", dst, old.next_hop());
            } else {
                trace!("Replace route towards {} via {}", dst, old.next_hop());
                rebuilt.push(entry.clone());
            }
            release_timer(&mut self.released_timers, &old, new_timer);
        }
        debug!("Updated routes towards {}: {} entries", dst, rebuilt.len());

        if rebuilt.is_empty() {
            self.entries.remove(&dst);
        } else {
            *routes = rebuilt;
        }
        Ok(())
    }

    /// Set the state of every route towards `dst`, and reset their route request counters.
    ///
    /// Routes which become `Invalid` (from `Valid` or `InSearch`) expire after the bad-link
    /// lifetime. Routes which are already invalid keep their expiry.
    pub fn set_entry_state(&mut self, dst: Address, state: RouteFlag) -> Result<(), TableError> {
        let now = self.clock.now();
        let routes = self.entries.get_mut(&dst).ok_or(TableError::NotFound(dst))?;
        for entry in routes.iter_mut() {
            if state == RouteFlag::Invalid {
                entry.invalidate(now, self.bad_link_lifetime);
            } else {
                entry.set_flag(state);
            }
            entry.set_rreq_count(0);
        }
        debug!("Route set entry state to {}: new state is {}", dst, state);
        Ok(())
    }

    /// Remove every route which uses the interface `iface`, and return how many were removed.
    pub fn delete_all_routes_from_interface(&mut self, iface: InterfaceAddress) -> usize {
        let released = &mut self.released_timers;
        let mut removed = 0;
        self.entries.retain(|_, routes| {
            routes.retain(|e| {
                if e.interface() == iface {
                    released.extend(e.ack_timer());
                    removed += 1;
                    false
                } else {
                    true
                }
            });
            !routes.is_empty()
        });
        debug!("Removed {} routes using interface {}", removed, iface.local);
        removed
    }

    // ---------------------------------------------------------------------------------------------
    // Link breakage
    // ---------------------------------------------------------------------------------------------

    /// Returns every destination which is reached (by at least one route) via `next_hop`, together
    /// with its sequence number. If multiple routes towards the same destination use `next_hop`,
    /// the sequence number of the first one is used.
    pub fn get_list_of_destination_with_next_hop(
        &mut self,
        next_hop: Address,
    ) -> BTreeMap<Address, u32> {
        self.purge();
        let mut unreachable = BTreeMap::new();
        for entry in self.entries.values().flatten().filter(|e| e.next_hop() == next_hop) {
            unreachable.entry(entry.destination()).or_insert_with(|| entry.seq_no());
        }
        trace!("Destinations via {}: [{}]", next_hop, unreachable.keys().join(", "));
        unreachable
    }

    /// Invalidate all valid routes towards each destination in `unreachable`.
    pub fn invalidate_routes_with_dst(&mut self, unreachable: &BTreeMap<Address, u32>) {
        self.purge();
        let now = self.clock.now();
        for dst in unreachable.keys() {
            if let Some(routes) = self.entries.get_mut(dst) {
                for entry in routes.iter_mut().filter(|e| e.flag() == RouteFlag::Valid) {
                    debug!("Invalidate route with destination address {}", dst);
                    entry.invalidate(now, self.bad_link_lifetime);
                }
            }
        }
    }

    /// Blacklist every route towards `neighbor` for `blacklist_timeout`, after the link towards
    /// it was found to be unidirectional.
    pub fn mark_link_as_unidirectional(
        &mut self,
        neighbor: Address,
        blacklist_timeout: Duration,
    ) -> Result<(), TableError> {
        let now = self.clock.now();
        let routes = match self.entries.get_mut(&neighbor) {
            Some(routes) => routes,
            None => {
                debug!("Mark link unidirectional to {} fails; not found", neighbor);
                return Err(TableError::NotFound(neighbor));
            }
        };
        for entry in routes.iter_mut() {
            entry.set_unidirectional(true);
            entry.set_blacklist_timeout(now, blacklist_timeout);
            entry.set_rreq_count(0);
        }
        debug!("Set link to {} to unidirectional", neighbor);
        Ok(())
    }

    /// Returns `true` if any route towards `neighbor` is currently blacklisted.
    pub fn is_neighbor_blacklisted(&self, neighbor: Address) -> bool {
        let now = self.clock.now();
        self.entries
            .get(&neighbor)
            .map(|routes| routes.iter().any(|e| e.is_blacklisted(now)))
            .unwrap_or(false)
    }

    // ---------------------------------------------------------------------------------------------
    // Precursors
    // ---------------------------------------------------------------------------------------------

    /// Add `precursor` to every route towards `dst`. Returns `Ok(true)` if it was new for at least
    /// one route.
    pub fn insert_precursor(
        &mut self,
        dst: Address,
        precursor: Address,
    ) -> Result<bool, TableError> {
        let routes = self.entries.get_mut(&dst).ok_or(TableError::NotFound(dst))?;
        let mut inserted = false;
        for entry in routes.iter_mut() {
            inserted |= entry.insert_precursor(precursor);
        }
        Ok(inserted)
    }

    /// Remove `precursor` from every route towards `dst`. Returns `Ok(true)` if any route had it.
    pub fn delete_precursor(
        &mut self,
        dst: Address,
        precursor: Address,
    ) -> Result<bool, TableError> {
        let routes = self.entries.get_mut(&dst).ok_or(TableError::NotFound(dst))?;
        let mut deleted = false;
        for entry in routes.iter_mut() {
            deleted |= entry.delete_precursor(precursor);
        }
        Ok(deleted)
    }

    /// Remove `precursor` from every route in the table, and return the number of routes that
    /// contained it.
    pub fn delete_precursor_everywhere(&mut self, precursor: Address) -> usize {
        self.entries
            .values_mut()
            .flatten()
            .map(|e| e.delete_precursor(precursor))
            .filter(|deleted| *deleted)
            .count()
    }

    /// Union of the precursors of all routes towards `dst`, to be notified when `dst` becomes
    /// unreachable.
    pub fn get_precursors(&mut self, dst: Address) -> Result<Vec<Address>, TableError> {
        let mut prec = Vec::new();
        for entry in self.routes(dst)? {
            entry.get_precursors(&mut prec);
        }
        Ok(prec)
    }

    // ---------------------------------------------------------------------------------------------
    // Purge
    // ---------------------------------------------------------------------------------------------

    /// Invalidate all valid routes whose lifetime has passed, and remove all invalid routes whose
    /// lifetime has passed. `InSearch` routes are never touched.
    pub fn purge(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let now = self.clock.now();
        purge_routes(&mut self.entries, now, self.bad_link_lifetime, &mut self.released_timers);
    }

    /// Copy of all routes, without purging.
    pub fn snapshot(&self) -> RouteMap {
        self.entries.clone()
    }

    /// Purge a copy of the table (see [`RoutingTable::snapshot`]) with the clock and the bad-link
    /// lifetime of this table. The table itself is not modified.
    pub fn purge_snapshot(&self, snapshot: &mut RouteMap) {
        let mut ignored = Vec::new();
        purge_routes(snapshot, self.clock.now(), self.bad_link_lifetime, &mut ignored);
    }

    /// Take the tokens of all timers attached to routes that were removed since the last call.
    /// These timers should be cancelled.
    pub fn take_released_timers(&mut self) -> Vec<TimerToken> {
        std::mem::take(&mut self.released_timers)
    }
}

fn purge_routes(
    entries: &mut RouteMap,
    now: Time,
    bad_link_lifetime: Duration,
    released: &mut Vec<TimerToken>,
) {
    entries.retain(|dst, routes| {
        routes.retain_mut(|entry| {
            if !entry.is_expired(now) {
                return true;
            }
            match entry.flag() {
                RouteFlag::Invalid => {
                    trace!("Remove expired route to {} via {}", dst, entry.next_hop());
                    released.extend(entry.ack_timer());
                    false
                }
                RouteFlag::Valid => {
                    trace!("Invalidate route with destination address {}", dst);
                    entry.invalidate(now, bad_link_lifetime);
                    true
                }
                RouteFlag::InSearch => true,
            }
        });
        !routes.is_empty()
    });
}

/// Remember the timer of a removed entry, unless the entry replacing it keeps the same timer.
fn release_timer(released: &mut Vec<TimerToken>, old: &RouteEntry, keep: Option<TimerToken>) {
    if let Some(token) = old.ack_timer() {
        if Some(token) != keep && !released.contains(&token) {
            released.push(token);
        }
    }
}
