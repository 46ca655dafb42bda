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

#![deny(missing_docs, missing_debug_implementations)]

//! # RTable
//!
//! The multipath routing table of a single AODVQ node, together with the time and timer
//! primitives it needs.
//!
//! ## Example usage
//!
//! The following example stores a route towards `10.0.0.5` via the neighbor `10.0.0.2`. After
//! the route expired, it is invalidated (but still kept in the table), until the bad-link lifetime
//! has passed as well.
//!
//! ```rust
//! use aodvq::rtable::{
//!     Clock, InterfaceAddress, RouteEntry, RouteFlag, RoutingTable, SimClock, TableError,
//! };
//! use std::net::Ipv4Addr;
//! use std::time::Duration;
//!
//! fn main() -> Result<(), TableError> {
//!     let clock = SimClock::new();
//!     let mut table = RoutingTable::new(Duration::from_secs(15), clock.clone());
//!
//!     let dst = Ipv4Addr::new(10, 0, 0, 5);
//!     let nh = Ipv4Addr::new(10, 0, 0, 2);
//!     let mask = Ipv4Addr::new(255, 255, 255, 0);
//!     let iface = InterfaceAddress::new(Ipv4Addr::new(10, 0, 0, 1), mask);
//!
//!     table.add_route(RouteEntry::new(dst, nh, iface, Duration::from_secs(10), clock.now()));
//!     assert_eq!(table.lookup_valid_route(dst)?.len(), 1);
//!
//!     // after 11 seconds, the route is invalid
//!     clock.advance(Duration::from_secs(11));
//!     assert_eq!(table.lookup_valid_route(dst), Err(TableError::NotFound(dst)));
//!     assert_eq!(table.lookup_first(dst)?.flag(), RouteFlag::Invalid);
//!
//!     // after the bad-link lifetime, it is removed
//!     clock.advance(Duration::from_secs(16));
//!     assert_eq!(table.lookup_route(dst), Err(TableError::Empty));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub(crate) mod entry;
pub mod printer;
pub(crate) mod table;
pub mod time;
pub mod timer;
pub(crate) mod types;

pub use config::RoutingTableConfig;
pub use entry::RouteEntry;
pub use table::{RouteMap, RoutingTable};
pub use time::{Clock, SimClock, SystemClock, Time};
pub use timer::{TimerQueue, TimerToken};
pub use types::{Address, ConfigError, InterfaceAddress, RouteFlag, TableError};
