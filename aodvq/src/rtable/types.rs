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

//! Module containing all type definitions

use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Address of a node (destination, next hop or precursor). The table never interprets it.
pub type Address = Ipv4Addr;

/// Outgoing interface of a route, identified by its local address and network mask.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct InterfaceAddress {
    /// Local address of the interface
    pub local: Ipv4Addr,
    /// Network mask of the interface
    pub mask: Ipv4Addr,
}

impl InterfaceAddress {
    /// Create a new interface address
    pub fn new(local: Ipv4Addr, mask: Ipv4Addr) -> Self {
        Self { local, mask }
    }
}

/// # Route State
/// State of a single [`RouteEntry`](crate::rtable::RouteEntry).
///
/// - `Valid` routes can be used for forwarding.
/// - `Invalid` routes are kept for the bad-link lifetime, before they are removed during a purge.
/// - `InSearch` routes wait for an outstanding route discovery. They never expire.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum RouteFlag {
    /// The route is usable
    Valid,
    /// The route is broken or expired
    Invalid,
    /// A route discovery is in progress
    InSearch,
}

impl fmt::Display for RouteFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouteFlag::Valid => "UP",
            RouteFlag::Invalid => "DOWN",
            RouteFlag::InSearch => "IN_SEARCH",
        })
    }
}

/// Routing Table Errors
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum TableError {
    /// The destination is not known, or it has no route that matches the query.
    #[error("No route to {0} found in the routing table")]
    NotFound(Address),
    /// The routing table does not contain any destination.
    #[error("The routing table is empty")]
    Empty,
}

/// Configuration Error
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    /// A protocol parameter has a value that cannot be used.
    #[error("Invalid protocol parameter: {0}")]
    InvalidParameter(&'static str),
}
