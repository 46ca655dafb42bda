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

use super::helpers::*;
use crate::rtable::*;
use crate::Error;
use maplit::btreemap;
use std::time::Duration;

#[test]
fn test_lookup_unknown() {
    let (mut t, clock) = table();
    assert_eq!(t.lookup_route(addr(5)), Err(TableError::Empty));
    assert_eq!(t.lookup_first(addr(5)), Err(TableError::Empty));

    t.add_route(route(&clock, 6, 2, 10));
    assert_eq!(t.lookup_route(addr(5)), Err(TableError::NotFound(addr(5))));
    assert_eq!(t.lookup_valid_route(addr(5)), Err(TableError::NotFound(addr(5))));
    assert_eq!(t.lookup_first(addr(5)), Err(TableError::NotFound(addr(5))));
    assert_eq!(t.lookup_first_valid(addr(5)), Err(TableError::NotFound(addr(5))));
    assert_eq!(t.delete_route(addr(5)), Err(TableError::NotFound(addr(5))));
    assert_eq!(t.update(route(&clock, 5, 2, 10)), Err(TableError::NotFound(addr(5))));
    assert_eq!(
        t.set_entry_state(addr(5), RouteFlag::Invalid),
        Err(TableError::NotFound(addr(5)))
    );
    assert_eq!(
        t.mark_link_as_unidirectional(addr(5), Duration::from_secs(5)),
        Err(TableError::NotFound(addr(5)))
    );
    assert_eq!(t.insert_precursor(addr(5), addr(3)), Err(TableError::NotFound(addr(5))));
    assert_eq!(t.len(), 1);
}

#[test]
fn test_add_then_lookup() {
    let (mut t, clock) = table();
    let e = route(&clock, 5, 2, 10).with_seq_no(3).with_hops(2).with_quality(42);
    t.add_route(e.clone());
    assert_eq!(t.lookup_route(addr(5)), Ok(vec![e.clone()]));
    assert_eq!(t.lookup_valid_route(addr(5)), Ok(vec![e.clone()]));
    assert_eq!(t.lookup_first(addr(5)), Ok(e.clone()));
    assert_eq!(t.lookup_first_valid(addr(5)), Ok(e));
}

#[test]
fn test_add_resets_rreq_count() {
    let (mut t, clock) = table();
    let mut valid = route(&clock, 5, 2, 10);
    valid.increment_rreq_count();
    let mut searching = route(&clock, 6, 2, 10).with_flag(RouteFlag::InSearch);
    searching.increment_rreq_count();
    searching.increment_rreq_count();
    t.add_route(valid);
    t.add_route(searching);
    assert_eq!(t.lookup_first(addr(5)).unwrap().rreq_count(), 0);
    assert_eq!(t.lookup_first(addr(6)).unwrap().rreq_count(), 2);
}

#[test]
fn test_add_appends_without_dedup() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10));
    t.add_route(route(&clock, 5, 3, 10));
    t.add_route(route(&clock, 5, 2, 20));
    let routes = t.lookup_route(addr(5)).unwrap();
    assert_eq!(
        routes.iter().map(|e| e.next_hop()).collect::<Vec<_>>(),
        vec![addr(2), addr(3), addr(2)]
    );
    assert_eq!(t.len(), 1);
    assert_eq!(t.destinations().collect::<Vec<_>>(), vec![addr(5)]);
}

#[test]
fn test_lookup_valid_filters() {
    let (mut t, clock) = table();
    let invalid = route(&clock, 5, 2, 10).with_flag(RouteFlag::Invalid);
    let searching = route(&clock, 5, 3, 10).with_flag(RouteFlag::InSearch);
    let valid = route(&clock, 5, 4, 10);
    t.add_route(invalid.clone());
    t.add_route(searching);
    assert_eq!(t.lookup_valid_route(addr(5)), Err(TableError::NotFound(addr(5))));
    assert_eq!(t.lookup_first_valid(addr(5)), Err(TableError::NotFound(addr(5))));
    assert_eq!(t.lookup_first(addr(5)), Ok(invalid));
    t.add_route(valid.clone());
    assert_eq!(t.lookup_valid_route(addr(5)), Ok(vec![valid.clone()]));
    assert_eq!(t.lookup_first_valid(addr(5)), Ok(valid));
    assert_eq!(t.lookup_route(addr(5)).unwrap().len(), 3);
}

#[test]
fn test_delete_route() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10));
    t.add_route(route(&clock, 5, 3, 10));
    t.add_route(route(&clock, 6, 3, 10));
    let removed = t.delete_route(addr(5)).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(t.lookup_route(addr(5)), Err(TableError::NotFound(addr(5))));
    assert!(t.lookup_route(addr(6)).is_ok());
    assert_eq!(t.delete_route(addr(5)), Err(TableError::NotFound(addr(5))));
}

#[test]
fn test_update_single_replaces() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10).with_flag(RouteFlag::InSearch));
    // a different next hop still replaces the only entry
    let mut new = route(&clock, 5, 3, 20).with_seq_no(9);
    new.increment_rreq_count();
    t.update(new.clone()).unwrap();
    assert_eq!(t.lookup_route(addr(5)), Ok(vec![new]));
}

#[test]
fn test_update_multipath() {
    let (mut t, clock) = table();
    let via_2 = route(&clock, 5, 2, 10);
    let via_3 = route(&clock, 5, 3, 10).with_quality(3);
    let via_4 = route(&clock, 5, 4, 10).with_flag(RouteFlag::InSearch);
    t.add_route(via_2);
    t.add_route(via_3.clone());
    t.add_route(via_4);

    // replace the route via 2
    let mut new_2 = route(&clock, 5, 2, 30).with_seq_no(4).with_quality(99);
    new_2.increment_rreq_count();
    t.update(new_2.clone()).unwrap();
    let mut expected_2 = new_2.clone();
    expected_2.set_rreq_count(0);
    let routes = t.lookup_route(addr(5)).unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0], expected_2);
    assert_eq!(routes[1], via_3);
    assert_eq!(routes[2].next_hop(), addr(4));

    // the route via 4 is in search, so it is dropped
    t.update(route(&clock, 5, 4, 30)).unwrap();
    let routes = t.lookup_route(addr(5)).unwrap();
    assert_eq!(routes, vec![expected_2, via_3]);

    // an unknown next hop is not inserted
    t.update(route(&clock, 5, 7, 30)).unwrap();
    assert_eq!(t.lookup_route(addr(5)).unwrap().len(), 2);
}

#[test]
fn test_update_consolidates_duplicates() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10));
    t.add_route(route(&clock, 5, 2, 10).with_flag(RouteFlag::Invalid));
    t.add_route(route(&clock, 5, 3, 10));
    let new = route(&clock, 5, 2, 40).with_hops(1);
    t.update(new.clone()).unwrap();
    let routes = t.lookup_route(addr(5)).unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0], new);
    assert_eq!(routes[1], new);
    assert_eq!(routes[2].next_hop(), addr(3));
}

#[test]
fn test_update_only_in_search_removes_destination() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10).with_flag(RouteFlag::InSearch));
    t.add_route(route(&clock, 5, 2, 10).with_flag(RouteFlag::InSearch));
    t.update(route(&clock, 5, 2, 10)).unwrap();
    assert_eq!(t.lookup_route(addr(5)), Err(TableError::Empty));
}

#[test]
fn test_set_entry_state() {
    let (mut t, clock) = table();
    clock.advance(Duration::from_secs(1));
    let mut a = route(&clock, 5, 2, 3600);
    a.increment_rreq_count();
    let mut b = route(&clock, 5, 3, 10).with_flag(RouteFlag::InSearch);
    b.increment_rreq_count();
    t.add_route(a);
    t.add_route(b);
    t.set_entry_state(addr(5), RouteFlag::Invalid).unwrap();
    for e in t.lookup_route(addr(5)).unwrap() {
        assert_eq!(e.flag(), RouteFlag::Invalid);
        assert_eq!(e.rreq_count(), 0);
        assert_eq!(e.expires(), Time::from_secs(1) + BAD_LINK_LIFETIME);
    }
    t.set_entry_state(addr(5), RouteFlag::Valid).unwrap();
    assert_eq!(t.lookup_valid_route(addr(5)).unwrap().len(), 2);

    // invalid routes are removed after the bad-link lifetime, not after their old lifetime
    clock.advance(Duration::from_secs(4));
    t.set_entry_state(addr(5), RouteFlag::Invalid).unwrap();
    clock.advance(BAD_LINK_LIFETIME);
    assert_eq!(t.lookup_route(addr(5)).unwrap().len(), 2);
    clock.advance(Duration::from_secs(1));
    assert_eq!(t.lookup_route(addr(5)), Err(TableError::Empty));
}

#[test]
fn test_set_entry_state_keeps_invalid_expiry() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10));
    t.set_entry_state(addr(5), RouteFlag::Invalid).unwrap();
    clock.advance(Duration::from_secs(5));
    t.set_entry_state(addr(5), RouteFlag::Invalid).unwrap();
    assert_eq!(t.lookup_first(addr(5)).unwrap().expires(), Time::ZERO + BAD_LINK_LIFETIME);
}

#[test]
fn test_unbounded_lifetimes() {
    let (mut t, clock) = table();
    clock.advance(Duration::from_secs(1));
    let entry = RouteEntry::new(addr(5), addr(2), iface(1), Duration::MAX, clock.now());
    assert_eq!(entry.expires(), Time(Duration::MAX));
    t.add_route(entry);
    t.mark_link_as_unidirectional(addr(5), Duration::MAX).unwrap();
    assert!(t.is_neighbor_blacklisted(addr(5)));

    clock.advance(Duration::from_secs(3600 * 24 * 365));
    assert!(t.is_neighbor_blacklisted(addr(5)));
    assert_eq!(t.lookup_valid_route(addr(5)).unwrap().len(), 1);

    let mut long = RoutingTable::new(Duration::MAX, clock.clone());
    long.add_route(route(&clock, 6, 2, 10));
    long.set_entry_state(addr(6), RouteFlag::Invalid).unwrap();
    assert_eq!(long.lookup_first(addr(6)).unwrap().expires(), Time(Duration::MAX));
}

#[test]
fn test_destinations_with_next_hop() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10).with_seq_no(11));
    t.add_route(route(&clock, 5, 2, 10).with_seq_no(12));
    t.add_route(route(&clock, 6, 3, 10).with_seq_no(13));
    t.add_route(route(&clock, 6, 2, 10).with_seq_no(14));
    t.add_route(route(&clock, 7, 3, 10).with_seq_no(15));
    assert_eq!(
        t.get_list_of_destination_with_next_hop(addr(2)),
        btreemap! { addr(5) => 11, addr(6) => 14 }
    );
    assert_eq!(
        t.get_list_of_destination_with_next_hop(addr(3)),
        btreemap! { addr(6) => 13, addr(7) => 15 }
    );
    assert!(t.get_list_of_destination_with_next_hop(addr(9)).is_empty());
}

#[test]
fn test_invalidate_routes_with_dst() {
    let (mut t, clock) = table();
    clock.advance(Duration::from_secs(1));
    t.add_route(route(&clock, 5, 2, 10));
    t.add_route(route(&clock, 5, 3, 10).with_flag(RouteFlag::InSearch));
    t.add_route(route(&clock, 6, 2, 10));
    t.invalidate_routes_with_dst(&btreemap! { addr(5) => 0, addr(9) => 0 });

    let routes = t.lookup_route(addr(5)).unwrap();
    assert_eq!(routes[0].flag(), RouteFlag::Invalid);
    assert_eq!(routes[0].expires(), Time::from_secs(1) + BAD_LINK_LIFETIME);
    assert_eq!(routes[1].flag(), RouteFlag::InSearch);
    assert_eq!(t.lookup_first(addr(6)).unwrap().flag(), RouteFlag::Valid);

    // invalidating again must not extend the grace period
    clock.advance(Duration::from_secs(2));
    t.invalidate_routes_with_dst(&btreemap! { addr(5) => 0 });
    let routes = t.lookup_route(addr(5)).unwrap();
    assert_eq!(routes[0].expires(), Time::from_secs(1) + BAD_LINK_LIFETIME);
}

#[test]
fn test_link_break_scenario() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10).with_seq_no(21));
    assert_eq!(t.lookup_valid_route(addr(5)).unwrap().len(), 1);

    clock.advance(Duration::from_secs(11));
    t.purge();
    assert_eq!(t.lookup_valid_route(addr(5)), Err(TableError::NotFound(addr(5))));
    let routes = t.lookup_route(addr(5)).unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].flag(), RouteFlag::Invalid);

    let unreachable = t.get_list_of_destination_with_next_hop(addr(2));
    assert_eq!(unreachable, btreemap! { addr(5) => 21 });
    let before = t.lookup_route(addr(5)).unwrap();
    t.invalidate_routes_with_dst(&unreachable);
    assert_eq!(t.lookup_route(addr(5)).unwrap(), before);
}

#[test]
fn test_delete_all_routes_from_interface() {
    let (mut t, clock) = table();
    let on_1 = |dst, nh| {
        let mut e = route(&clock, dst, nh, 10);
        e.set_interface(iface(1));
        e
    };
    t.add_route(route(&clock, 5, 2, 10));
    t.add_route(on_1(5, 3));
    t.add_route(on_1(6, 3));
    t.add_route(route(&clock, 7, 2, 10));
    assert_eq!(t.delete_all_routes_from_interface(iface(1)), 2);

    let routes = t.lookup_route(addr(5)).unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].interface(), iface(0));
    assert_eq!(t.lookup_route(addr(6)), Err(TableError::NotFound(addr(6))));
    assert_eq!(t.lookup_route(addr(7)).unwrap().len(), 1);
    assert_eq!(t.delete_all_routes_from_interface(iface(1)), 0);
}

#[test]
fn test_mark_link_as_unidirectional() {
    let (mut t, clock) = table();
    let mut a = route(&clock, 5, 5, 60);
    a.increment_rreq_count();
    t.add_route(a);
    t.add_route(route(&clock, 5, 2, 60).with_flag(RouteFlag::InSearch));
    t.add_route(route(&clock, 6, 5, 60));
    clock.advance(Duration::from_secs(2));
    t.mark_link_as_unidirectional(addr(5), Duration::from_secs(5)).unwrap();

    for e in t.lookup_route(addr(5)).unwrap() {
        assert!(e.is_unidirectional());
        assert_eq!(e.blacklist_timeout(), Time::from_secs(7));
        assert_eq!(e.rreq_count(), 0);
    }
    assert!(!t.lookup_first(addr(6)).unwrap().is_unidirectional());
    assert!(t.is_neighbor_blacklisted(addr(5)));
    assert!(!t.is_neighbor_blacklisted(addr(6)));

    clock.advance(Duration::from_secs(6));
    assert!(!t.is_neighbor_blacklisted(addr(5)));
}

#[test]
fn test_precursors() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10));
    t.add_route(route(&clock, 5, 3, 10));
    t.add_route(route(&clock, 6, 3, 10));

    assert_eq!(t.insert_precursor(addr(5), addr(8)), Ok(true));
    assert_eq!(t.insert_precursor(addr(5), addr(8)), Ok(false));
    assert_eq!(t.insert_precursor(addr(5), addr(9)), Ok(true));
    assert_eq!(t.insert_precursor(addr(6), addr(8)), Ok(true));
    for e in t.lookup_route(addr(5)).unwrap() {
        assert_eq!(e.precursors(), &[addr(8), addr(9)]);
    }
    assert_eq!(t.get_precursors(addr(5)), Ok(vec![addr(8), addr(9)]));

    assert_eq!(t.delete_precursor(addr(5), addr(9)), Ok(true));
    assert_eq!(t.delete_precursor(addr(5), addr(9)), Ok(false));
    assert_eq!(t.get_precursors(addr(5)), Ok(vec![addr(8)]));

    assert_eq!(t.delete_precursor_everywhere(addr(8)), 3);
    assert_eq!(t.get_precursors(addr(5)), Ok(vec![]));
    assert_eq!(t.get_precursors(addr(6)), Ok(vec![]));
    assert_eq!(t.get_precursors(addr(7)), Err(TableError::NotFound(addr(7))));
}

#[test]
fn test_lookup_results_are_copies() {
    let (mut t, clock) = table();
    t.add_route(route(&clock, 5, 2, 10));

    let mut copy = t.lookup_first(addr(5)).unwrap();
    copy.set_flag(RouteFlag::Invalid);
    copy.set_hops(17);
    copy.insert_precursor(addr(9));
    let mut all = t.lookup_route(addr(5)).unwrap();
    all[0].set_next_hop(addr(4));
    all.clear();

    let live = t.lookup_first(addr(5)).unwrap();
    assert_eq!(live.flag(), RouteFlag::Valid);
    assert_eq!(live.hops(), 0);
    assert_eq!(live.next_hop(), addr(2));
    assert!(live.is_precursor_list_empty());

    // changes only persist through explicit calls
    t.update(copy.clone()).unwrap();
    assert_eq!(t.lookup_first(addr(5)), Ok(copy));
}

#[test]
fn test_from_config() -> Result<(), Error> {
    let config = RoutingTableConfig::default();
    let t = RoutingTable::from_config(&config, SimClock::new())?;
    assert_eq!(t.bad_link_lifetime(), Duration::from_secs(15));
    assert!(t.is_empty());

    let config = RoutingTableConfig { net_diameter: 0, ..config };
    let err: Error = RoutingTable::from_config(&config, SimClock::new()).unwrap_err().into();
    assert!(matches!(err, Error::ConfigError(ConfigError::InvalidParameter(_))));
    Ok(())
}
