//! Tests for greedy smallest-first boat selection on a bare fleet.

use std::collections::BTreeSet;

use hire_engine::{allocate, Boat, BoatId, Fleet, HirePointId};

// ── Helpers ─────────────────────────────────────────────────────────────────

/// A fleet whose boat ids are 1, 2, 3, ... in the order of `seats`.
fn fleet(seats: &[u32]) -> Fleet {
    seats
        .iter()
        .enumerate()
        .map(|(i, &s)| Boat::new(BoatId(i as u64 + 1), HirePointId(1), s))
        .collect()
}

fn busy(ids: &[u64]) -> BTreeSet<BoatId> {
    ids.iter().copied().map(BoatId).collect()
}

fn ids(boats: Option<Vec<Boat>>) -> Option<Vec<u64>> {
    boats.map(|boats| boats.into_iter().map(|b| b.id.0).collect())
}

// ── Greedy accumulation ─────────────────────────────────────────────────────

#[test]
fn party_of_nine_accumulates_smallest_first() {
    // 2 → 2, +4 → 6, +4 → 10 ≥ 9; the 6-seater is never needed.
    let result = allocate(&fleet(&[2, 4, 4, 6]), &busy(&[]), 9);
    assert_eq!(ids(result), Some(vec![1, 2, 3]));
}

#[test]
fn party_of_nine_without_the_two_seater_takes_all_remaining() {
    let result = allocate(&fleet(&[2, 4, 4, 6]), &busy(&[1]), 9);
    assert_eq!(ids(result), Some(vec![2, 3, 4]));
}

#[test]
fn party_of_five_stops_at_first_boat_larger_than_party() {
    // 2 + 4 = 6 ≥ 5; the second 4-seater is skipped, the 6-seater ends the scan.
    let result = allocate(&fleet(&[2, 4, 4, 6]), &busy(&[]), 5);
    assert_eq!(ids(result), Some(vec![1, 2]));
}

#[test]
fn party_of_one_takes_the_smallest_boat() {
    let result = allocate(&fleet(&[2, 4, 4, 6]), &busy(&[]), 1);
    assert_eq!(ids(result), Some(vec![1]));
}

#[test]
fn free_boats_sorted_by_capacity_regardless_of_fleet_order() {
    let result = allocate(&fleet(&[6, 4, 2, 4]), &busy(&[]), 9);
    // Sorted: 2 (id 3), 4 (id 2), 4 (id 4), 6 (id 1).
    assert_eq!(ids(result), Some(vec![3, 2, 4]));
}

#[test]
fn equal_capacities_ordered_by_id() {
    let result = allocate(&fleet(&[4, 4, 4]), &busy(&[]), 7);
    assert_eq!(ids(result), Some(vec![1, 2]));
}

// ── Perfect match ───────────────────────────────────────────────────────────

#[test]
fn exact_capacity_match_wins_outright() {
    let result = allocate(&fleet(&[2, 4, 4, 6]), &busy(&[]), 4);
    // Only the first 4-seater, not 2 + 4.
    assert_eq!(ids(result), Some(vec![2]));
}

#[test]
fn exact_match_discards_earlier_accumulation() {
    // 2 → 2, +3 → 5 ≥ 5 already, then the 5-seater matches exactly.
    let result = allocate(&fleet(&[2, 3, 5]), &busy(&[]), 5);
    assert_eq!(ids(result), Some(vec![3]));
}

#[test]
fn exact_match_found_after_smaller_boats_once_party_fits() {
    // 1 + 1 + 1 = 3 ≥ 3 with smaller boats, but the 3-seater after them is a perfect match.
    let result = allocate(&fleet(&[1, 1, 1, 1, 3]), &busy(&[]), 3);
    assert_eq!(ids(result), Some(vec![5]));
}

#[test]
fn larger_boat_ends_scan_once_party_fits() {
    // Sorted: 2, 2, 7, 7. 2 → 2, +2 → 4 ≥ 4, then 7 > 4 stops the scan.
    let result = allocate(&fleet(&[7, 2, 2, 7]), &busy(&[]), 4);
    assert_eq!(ids(result), Some(vec![2, 3]));
}

#[test]
fn busy_exact_match_is_ignored() {
    let result = allocate(&fleet(&[2, 4, 4, 6]), &busy(&[4]), 6);
    // 2 → 2, +4 → 6 ≥ 6, next 4 is not larger than 6 so scanning continues, nothing left.
    assert_eq!(ids(result), Some(vec![1, 2]));
}

// ── Infeasible ──────────────────────────────────────────────────────────────

#[test]
fn party_larger_than_free_capacity_is_none() {
    assert_eq!(allocate(&fleet(&[2, 4, 4, 6]), &busy(&[]), 17), None);
    assert_eq!(allocate(&fleet(&[2, 4, 4, 6]), &busy(&[4]), 11), None);
}

#[test]
fn everything_busy_is_none() {
    assert_eq!(allocate(&fleet(&[2, 4]), &busy(&[1, 2]), 1), None);
}

#[test]
fn empty_fleet_is_none() {
    assert_eq!(allocate(&Fleet::default(), &busy(&[]), 1), None);
}

#[test]
fn party_of_zero_is_none() {
    assert_eq!(allocate(&fleet(&[2, 4]), &busy(&[]), 0), None);
}

// ── Large capacities ────────────────────────────────────────────────────────

#[test]
fn huge_boat_after_small_one_is_added_without_overflow() {
    // 5 < 10 so the huge boat is still picked up; the total exceeds u32.
    let result = allocate(&fleet(&[5, u32::MAX]), &busy(&[]), 10);
    assert_eq!(ids(result), Some(vec![1, 2]));
}

#[test]
fn huge_boats_alone_seat_a_huge_party() {
    let result = allocate(&fleet(&[u32::MAX, u32::MAX]), &busy(&[]), u32::MAX - 1);
    assert_eq!(ids(result), Some(vec![1]));
    assert_eq!(allocate(&fleet(&[u32::MAX]), &busy(&[1]), u32::MAX), None);
}

#[test]
fn total_seats_beyond_u32() {
    let fleet = fleet(&[u32::MAX, u32::MAX, 3]);
    assert_eq!(fleet.total_seats(), 2 * u64::from(u32::MAX) + 3);
}

// ── Determinism ─────────────────────────────────────────────────────────────

#[test]
fn repeated_calls_return_identical_selection() {
    let fleet = fleet(&[3, 1, 4, 1, 5, 9, 2, 6]);
    let busy = busy(&[3]);
    let first = allocate(&fleet, &busy, 8);
    for _ in 0..10 {
        assert_eq!(allocate(&fleet, &busy, 8), first);
    }
}
