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

//! # Routing Table Configuration
//!
//! The routing table itself only needs a single value, the bad-link lifetime (or *delete
//! period*), which is applied whenever a valid route becomes invalid. This module derives that
//! value (and the blacklist timeout, which the protocol passes to
//! [`RoutingTable::mark_link_as_unidirectional`](crate::rtable::RoutingTable::mark_link_as_unidirectional))
//! from the usual AODV timing parameters (RFC 3561, section 10).
//!
//! ```
//! use aodvq::rtable::config::RoutingTableConfig;
//! use std::time::Duration;
//!
//! let config = RoutingTableConfig::default();
//! assert_eq!(config.delete_period(), Duration::from_secs(15));
//! assert_eq!(config.blacklist_timeout(), Duration::from_millis(5600));
//!
//! let config = RoutingTableConfig { active_route_timeout: Duration::from_secs(10), ..config };
//! assert_eq!(config.delete_period(), Duration::from_secs(50));
//! ```

use crate::rtable::ConfigError;
use std::time::Duration;

/// AODV timing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTableConfig {
    /// Lifetime of a valid route which is not used.
    pub active_route_timeout: Duration,
    /// Conservative estimate of the one-hop traversal time (including queueing).
    pub node_traversal_time: Duration,
    /// Maximum number of hops between two nodes in the network.
    pub net_diameter: u32,
    /// Maximum number of route request retries.
    pub rreq_retries: u32,
}

impl Default for RoutingTableConfig {
    fn default() -> Self {
        Self {
            active_route_timeout: Duration::from_secs(3),
            node_traversal_time: Duration::from_millis(40),
            net_diameter: 35,
            rreq_retries: 2,
        }
    }
}

impl RoutingTableConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate of the time a message needs to traverse the network twice. Saturates at
    /// `Duration::MAX`.
    pub fn net_traversal_time(&self) -> Duration {
        self.node_traversal_time.saturating_mul(2).saturating_mul(self.net_diameter)
    }

    /// Time for which a neighbor is ignored after the link to it was found unidirectional.
    /// Saturates at `Duration::MAX`.
    pub fn blacklist_timeout(&self) -> Duration {
        self.net_traversal_time().saturating_mul(self.rreq_retries)
    }

    /// Time for which an invalid route is kept before it is deleted. Saturates at
    /// `Duration::MAX`.
    pub fn delete_period(&self) -> Duration {
        std::cmp::max(self.active_route_timeout, self.node_traversal_time).saturating_mul(5)
    }

    /// The grace lifetime of the routing table, equal to the delete period.
    pub fn bad_link_lifetime(&self) -> Duration {
        self.delete_period()
    }

    /// Check that all parameters are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.active_route_timeout == Duration::from_secs(0) {
            return Err(ConfigError::InvalidParameter("active route timeout must be positive"));
        }
        if self.node_traversal_time == Duration::from_secs(0) {
            return Err(ConfigError::InvalidParameter("node traversal time must be positive"));
        }
        if self.net_diameter == 0 {
            return Err(ConfigError::InvalidParameter("net diameter must be positive"));
        }
        let blacklist_timeout = self
            .node_traversal_time
            .checked_mul(2)
            .and_then(|t| t.checked_mul(self.net_diameter))
            .and_then(|t| t.checked_mul(self.rreq_retries));
        if blacklist_timeout.is_none() {
            return Err(ConfigError::InvalidParameter("blacklist timeout overflows"));
        }
        let longest = std::cmp::max(self.active_route_timeout, self.node_traversal_time);
        if longest.checked_mul(5).is_none() {
            return Err(ConfigError::InvalidParameter("delete period overflows"));
        }
        Ok(())
    }
}
