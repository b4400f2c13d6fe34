// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use inflow::paginate::paginate;

#[test]
fn pages_slice_in_order() {
    let items: Vec<u32> = (1..=7).collect();
    let p = paginate(&items, 3, 2);
    assert_eq!(p.items, &[4, 5, 6]);
    assert_eq!(p.total_pages, 3);
    assert!(p.has_previous());
    assert!(p.has_next());
}

#[test]
fn past_the_end_returns_last_page() {
    let items: Vec<u32> = (1..=7).collect();
    let p = paginate(&items, 3, 99);
    assert_eq!(p.number, 3);
    assert_eq!(p.items, &[7]);
    assert!(!p.has_next());
}

#[test]
fn page_zero_clamps_to_first() {
    let items: Vec<u32> = (1..=4).collect();
    let p = paginate(&items, 2, 0);
    assert_eq!(p.number, 1);
    assert!(!p.has_previous());
    assert_eq!(p.items, &[1, 2]);
}

#[test]
fn next_disabled_exactly_at_count() {
    let items: Vec<u32> = (1..=6).collect();
    let p = paginate(&items, 3, 2);
    assert_eq!(p.number * p.page_size, 6);
    assert!(!p.has_next());
    let p1 = paginate(&items, 3, 1);
    assert!(p1.has_next());
    assert!(!p1.has_previous());
}

#[test]
fn empty_list_is_one_empty_page() {
    let items: Vec<u32> = Vec::new();
    let p = paginate(&items, 10, 3);
    assert_eq!(p.number, 1);
    assert_eq!(p.total_pages, 1);
    assert!(p.items.is_empty());
    assert!(!p.has_previous());
    assert!(!p.has_next());
}

#[test]
fn never_out_of_range() {
    let items: Vec<u32> = (0..23).collect();
    for size in 1..=8 {
        for n in 0..12 {
            let p = paginate(&items, size, n);
            assert!(p.number >= 1 && p.number <= p.total_pages);
            assert!(!p.items.is_empty());
            assert_eq!(p.has_previous(), p.number != 1);
            assert_eq!(p.has_next(), p.number * size < items.len());
        }
    }
}
