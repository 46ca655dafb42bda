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

#[cfg(test)]
mod test_table;

#[cfg(test)]
pub(crate) mod helpers {
    use crate::rtable::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    /// Bad-link lifetime used by all test tables
    pub const BAD_LINK_LIFETIME: Duration = Duration::from_secs(15);

    pub fn init_logger() {
        let _ = pretty_env_logger::try_init();
    }

    /// Address `10.0.0.x`
    pub fn addr(x: u8) -> Address {
        Ipv4Addr::new(10, 0, 0, x)
    }

    /// Interface with local address `10.0.x.1/24`
    pub fn iface(x: u8) -> InterfaceAddress {
        InterfaceAddress::new(Ipv4Addr::new(10, 0, x, 1), Ipv4Addr::new(255, 255, 255, 0))
    }

    pub fn table() -> (RoutingTable<SimClock>, SimClock) {
        init_logger();
        let clock = SimClock::new();
        (RoutingTable::new(BAD_LINK_LIFETIME, clock.clone()), clock)
    }

    /// Valid route towards `dst` via `nh` on interface 0, with the given lifetime in seconds.
    pub fn route(clock: &SimClock, dst: u8, nh: u8, lifetime: u64) -> RouteEntry {
        RouteEntry::new(addr(dst), addr(nh), iface(0), Duration::from_secs(lifetime), clock.now())
    }
}
