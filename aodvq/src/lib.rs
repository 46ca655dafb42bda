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

#![deny(missing_docs)]

//! # AODVQ: Multipath Routing Table for Ad-hoc Networks
//! This library contains the routing table of AODVQ, a reactive ad-hoc routing protocol derived
//! from AODV. In contrast to AODV, every destination can have multiple candidate routes, each
//! annotated with a quality score describing the link quality and key availability of the path.
//!
//! ## Structure
//!
//! - **[`RoutingTable`](rtable::RoutingTable)**: The multipath routing table of one node, mapping
//!   each destination to a list of [route entries](rtable::RouteEntry). The table implements the
//!   route state machine (see [`RouteFlag`](rtable::RouteFlag)), the update policy for multiple
//!   routes, and the lazy, time-driven purge of expired routes.
//!
//! - **[`Time`](rtable::time)**: Absolute time and the [`Clock`](rtable::Clock) used to compute
//!   expiry timestamps. [`SimClock`](rtable::SimClock) is used in discrete-event simulation.
//!
//! - **[`Timers`](rtable::timer)**: Cancellable timers owned by the routing protocol. Route
//!   entries only carry a [`TimerToken`](rtable::TimerToken), and the table reports the tokens of
//!   removed entries.
//!
//! - **[`Config`](rtable::config)**: AODV timing parameters, from which the bad-link lifetime and
//!   the blacklist timeout are derived.
//!
//! - **[`Printer`](rtable::printer)**: Non-mutating dump of the routing table.
//!
//! ## Usage
//!
//! Each node owns its own routing table (and its own timers). The protocol calls into the table
//! when a route is discovered, a link breaks or an interface goes down.
//!
//! ```
//! use aodvq::rtable::*;
//! use aodvq::Error;
//! use std::collections::BTreeMap;
//! use std::net::Ipv4Addr;
//!
//! fn main() -> Result<(), Error> {
//!     let config = RoutingTableConfig::default();
//!     let clock = SimClock::new();
//!     let mut table = RoutingTable::from_config(&config, clock.clone())?;
//!
//!     let dst = Ipv4Addr::new(10, 0, 0, 9);
//!     let neighbor = Ipv4Addr::new(10, 0, 0, 2);
//!     let iface = InterfaceAddress::new(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(255, 0, 0, 0));
//!
//!     // a route reply arrived
//!     let entry = RouteEntry::new(dst, neighbor, iface, config.active_route_timeout, clock.now())
//!         .with_seq_no(7)
//!         .with_hops(3)
//!         .with_quality(80);
//!     table.add_route(entry);
//!     table.insert_precursor(dst, Ipv4Addr::new(10, 0, 0, 3))?;
//!
//!     // the link towards the neighbor breaks
//!     let unreachable = table.get_list_of_destination_with_next_hop(neighbor);
//!     let mut expected = BTreeMap::new();
//!     expected.insert(dst, 7);
//!     assert_eq!(unreachable, expected);
//!     table.invalidate_routes_with_dst(&unreachable);
//!
//!     assert!(table.lookup_first_valid(dst).is_err());
//!     assert_eq!(table.get_precursors(dst)?, vec![Ipv4Addr::new(10, 0, 0, 3)]);
//!
//!     Ok(())
//! }
//! ```

mod error;
pub mod rtable;
mod test;

pub use error::Error;
