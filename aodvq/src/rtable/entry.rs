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

//! Module defining a single route entry of the multipath routing table.

use crate::rtable::{Address, InterfaceAddress, RouteFlag, Time, TimerToken};
use log::*;
use std::time::Duration;

/// # Route Entry
///
/// One candidate path towards a destination. A destination may have several entries in the
/// [`RoutingTable`](crate::rtable::RoutingTable), usually with different next hops.
///
/// The entry stores the absolute time at which it expires. For valid routes, this is the end of
/// the active route lifetime. For invalid routes, it is the end of the grace period, after which
/// the entry is removed. Entries in state `InSearch` never expire.
///
/// Route entries are plain values. A copy returned by a lookup is not connected to the table.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    destination: Address,
    next_hop: Address,
    interface: InterfaceAddress,
    valid_seq_no: bool,
    seq_no: u32,
    hops: u16,
    expires: Time,
    flag: RouteFlag,
    /// number of route requests sent for this destination
    rreq_count: u8,
    blacklisted: bool,
    blacklist_timeout: Time,
    /// link quality and key availability of the path, computed outside of the table.
    quality: u32,
    /// neighbors which use this node as next hop towards the destination
    precursors: Vec<Address>,
    ack_timer: Option<TimerToken>,
}

impl RouteEntry {
    /// Create a new, valid route entry towards `destination` via `next_hop`, which expires after
    /// `lifetime`. The sequence number is unknown, the hop count and the quality are zero.
    pub fn new(
        destination: Address,
        next_hop: Address,
        interface: InterfaceAddress,
        lifetime: Duration,
        now: Time,
    ) -> Self {
        Self {
            destination,
            next_hop,
            interface,
            valid_seq_no: false,
            seq_no: 0,
            hops: 0,
            expires: now + lifetime,
            flag: RouteFlag::Valid,
            rreq_count: 0,
            blacklisted: false,
            blacklist_timeout: now,
            quality: 0,
            precursors: Vec::new(),
            ack_timer: None,
        }
    }

    /// Set a valid sequence number
    pub fn with_seq_no(mut self, seq_no: u32) -> Self {
        self.seq_no = seq_no;
        self.valid_seq_no = true;
        self
    }

    /// Set the hop count
    pub fn with_hops(mut self, hops: u16) -> Self {
        self.hops = hops;
        self
    }

    /// Set the quality score
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the route state
    pub fn with_flag(mut self, flag: RouteFlag) -> Self {
        self.flag = flag;
        self
    }

    /// Attach the token of a timer which must be cancelled once the entry is removed.
    pub fn with_ack_timer(mut self, token: TimerToken) -> Self {
        self.ack_timer = Some(token);
        self
    }

    // ---------------------------------------------------------------------------------------------
    // Precursors
    // ---------------------------------------------------------------------------------------------

    /// Insert a precursor. Returns `false` if it was already present.
    pub fn insert_precursor(&mut self, precursor: Address) -> bool {
        if self.lookup_precursor(precursor) {
            false
        } else {
            self.precursors.push(precursor);
            true
        }
    }

    /// Returns `true` if `precursor` is in the precursor list.
    pub fn lookup_precursor(&self, precursor: Address) -> bool {
        let found = self.precursors.contains(&precursor);
        trace!("Precursor {} {}found", precursor, if found { "" } else { "not " });
        found
    }

    /// Remove a precursor. Returns `false` if it was not present.
    pub fn delete_precursor(&mut self, precursor: Address) -> bool {
        let len_before = self.precursors.len();
        self.precursors.retain(|p| *p != precursor);
        len_before != self.precursors.len()
    }

    /// Remove all precursors
    pub fn delete_all_precursors(&mut self) {
        self.precursors.clear();
    }

    /// Returns `true` if no precursor is stored.
    pub fn is_precursor_list_empty(&self) -> bool {
        self.precursors.is_empty()
    }

    /// Append every precursor of this entry to `prec` which is not yet contained in it.
    pub fn get_precursors(&self, prec: &mut Vec<Address>) {
        for p in self.precursors.iter() {
            if !prec.contains(p) {
                prec.push(*p);
            }
        }
    }

    /// Slice of all precursors, in insertion order
    pub fn precursors(&self) -> &[Address] {
        &self.precursors
    }

    // ---------------------------------------------------------------------------------------------
    // Validity
    // ---------------------------------------------------------------------------------------------

    /// Mark the route as invalid. It will expire after `bad_link_lifetime`. If the route is already
    /// invalid, nothing happens, and in particular, the expiry is not moved.
    pub fn invalidate(&mut self, now: Time, bad_link_lifetime: Duration) {
        if self.flag == RouteFlag::Invalid {
            return;
        }
        trace!("Invalidate route to {} via {}", self.destination, self.next_hop);
        self.flag = RouteFlag::Invalid;
        self.rreq_count = 0;
        self.expires = now + bad_link_lifetime;
    }

    /// Returns `true` if the lifetime of the entry has passed. The state is not considered.
    pub fn is_expired(&self, now: Time) -> bool {
        self.expires < now
    }

    /// Absolute time at which the entry expires
    pub fn expires(&self) -> Time {
        self.expires
    }

    /// Remaining lifetime, or `None` if the entry has expired.
    pub fn lifetime(&self, now: Time) -> Option<Duration> {
        now.duration_until(self.expires)
    }

    /// Let the entry expire after `lifetime`
    pub fn set_lifetime(&mut self, now: Time, lifetime: Duration) {
        self.expires = now + lifetime;
    }

    /// Current state of the route
    pub fn flag(&self) -> RouteFlag {
        self.flag
    }

    /// Set the state of the route. The route request counter is not touched.
    pub fn set_flag(&mut self, flag: RouteFlag) {
        self.flag = flag;
    }

    // ---------------------------------------------------------------------------------------------
    // Blacklist
    // ---------------------------------------------------------------------------------------------

    /// Returns `true` if the link to the next hop was marked as unidirectional.
    pub fn is_unidirectional(&self) -> bool {
        self.blacklisted
    }

    /// Set or clear the unidirectional (blacklist) flag.
    pub fn set_unidirectional(&mut self, unidirectional: bool) {
        self.blacklisted = unidirectional;
    }

    /// Blacklist the neighbor until `now + timeout`.
    pub fn set_blacklist_timeout(&mut self, now: Time, timeout: Duration) {
        self.blacklist_timeout = now + timeout;
    }

    /// Absolute time at which the blacklisting ends
    pub fn blacklist_timeout(&self) -> Time {
        self.blacklist_timeout
    }

    /// Returns `true` if the entry is blacklisted, and the blacklist has not yet timed out.
    pub fn is_blacklisted(&self, now: Time) -> bool {
        self.blacklisted && now < self.blacklist_timeout
    }

    // ---------------------------------------------------------------------------------------------
    // Plain fields
    // ---------------------------------------------------------------------------------------------

    /// Destination of the route
    pub fn destination(&self) -> Address {
        self.destination
    }

    /// Next hop (gateway) of the route
    pub fn next_hop(&self) -> Address {
        self.next_hop
    }

    /// Change the next hop
    pub fn set_next_hop(&mut self, next_hop: Address) {
        self.next_hop = next_hop;
    }

    /// Outgoing interface
    pub fn interface(&self) -> InterfaceAddress {
        self.interface
    }

    /// Change the outgoing interface
    pub fn set_interface(&mut self, interface: InterfaceAddress) {
        self.interface = interface;
    }

    /// Destination sequence number
    pub fn seq_no(&self) -> u32 {
        self.seq_no
    }

    /// Set the destination sequence number. It does not change its validity.
    pub fn set_seq_no(&mut self, seq_no: u32) {
        self.seq_no = seq_no;
    }

    /// Returns `true` if the sequence number is known.
    pub fn valid_seq_no(&self) -> bool {
        self.valid_seq_no
    }

    /// Mark the sequence number as known or unknown
    pub fn set_valid_seq_no(&mut self, valid: bool) {
        self.valid_seq_no = valid;
    }

    /// Number of hops towards the destination
    pub fn hops(&self) -> u16 {
        self.hops
    }

    /// Set the hop count
    pub fn set_hops(&mut self, hops: u16) {
        self.hops = hops;
    }

    /// Number of route requests sent for this destination
    pub fn rreq_count(&self) -> u8 {
        self.rreq_count
    }

    /// Set the route request counter
    pub fn set_rreq_count(&mut self, count: u8) {
        self.rreq_count = count;
    }

    /// Increment the route request counter, saturating at its maximum.
    pub fn increment_rreq_count(&mut self) {
        self.rreq_count = self.rreq_count.saturating_add(1);
    }

    /// Quality score of the route
    pub fn quality(&self) -> u32 {
        self.quality
    }

    /// Set the quality score
    pub fn set_quality(&mut self, quality: u32) {
        self.quality = quality;
    }

    /// Token of the timer attached to this entry
    pub fn ack_timer(&self) -> Option<TimerToken> {
        self.ack_timer
    }

    /// Attach or detach a timer token. Returns the previous token.
    pub fn set_ack_timer(&mut self, token: Option<TimerToken>) -> Option<TimerToken> {
        std::mem::replace(&mut self.ack_timer, token)
    }
}
