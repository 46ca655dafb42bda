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

//! # Helper (printer) functions for the Routing Table
//! Module containing helper functions to get formatted strings and print the routing table. None
//! of these functions change the table.

use crate::rtable::{Clock, RouteEntry, RoutingTable, Time};

/// Header line of the routing table
pub const TABLE_HEADER: &str = "Destination\tGateway\t\tInterface\tFlag\tExpire\t\tHops\t\tL_route";

/// Returns the formatted string for a single route entry: destination, gateway, local interface
/// address, state, remaining lifetime in seconds (negative if it has expired already), hop count
/// and quality score.
pub fn route_entry(entry: &RouteEntry, now: Time) -> String {
    format!(
        "{dst}\t{gw}\t{iface}\t{flag}\t{expire:<14.2}\t{hops}\t\t{quality}",
        dst = entry.destination(),
        gw = entry.next_hop(),
        iface = entry.interface().local,
        flag = entry.flag(),
        expire = now.secs_until(entry.expires()),
        hops = entry.hops(),
        quality = entry.quality(),
    )
}

/// Get a vector of strings, which represent the routing table. The first two strings contain the
/// title and the header, and each following string represents one route entry. The entries are
/// taken from a purged copy of the table, such that expired routes are shown as they would be
/// after the next purge.
pub fn routing_table<C: Clock>(table: &RoutingTable<C>) -> Vec<String> {
    let now = table.now();
    let mut snapshot = table.snapshot();
    table.purge_snapshot(&mut snapshot);
    let mut result = vec![String::from("AODVQ Routing table"), String::from(TABLE_HEADER)];
    result.extend(snapshot.values().flatten().map(|entry| route_entry(entry, now)));
    result
}

/// Print the routing table, one line per string of [`routing_table`].
pub fn print_routing_table<C: Clock>(table: &RoutingTable<C>) {
    for line in routing_table(table) {
        println!("{}", line);
    }
}
