//! Public-surface tests for the value model and region discovery

use memsift::process::discover;
use memsift::{Candidate, Comparison, MemoryError, ResultSet, ValueBundle, ValueType};

#[test]
fn test_flat_index_spans_all_four_sequences() {
    let mut set = ResultSet::new();
    for (i, ty) in ValueType::ALL.into_iter().enumerate() {
        set.push(Candidate {
            value_type: ty,
            region_id: 0,
            offset: i as u32 * 8,
            bytes: [0; 8],
        });
    }

    assert_eq!(set.count(), 4);
    assert_eq!(set.total_bytes(), 24);
    assert_eq!(set.at(0).unwrap().value_type, ValueType::I32);
    assert_eq!(set.at(3).unwrap().value_type, ValueType::F64);
    assert!(set.at(4).is_none());
}

#[test]
fn test_bundle_covers_four_widths_at_once() {
    let bundle = ValueBundle::parse("100");
    assert_eq!(bundle.as_i32, 100);
    assert_eq!(bundle.as_i64, 100);
    assert_eq!(bundle.as_f32, 100.0);
    assert_eq!(bundle.as_f64, 100.0);

    // a fractional literal still scans as a float while the integer views
    // fall back to the sentinel
    let bundle = ValueBundle::parse("0.5");
    assert!(bundle.is_valid());
    assert_eq!(bundle.as_f64, 0.5);
    assert_eq!(bundle.as_i32, i32::MAX - 1);
}

#[test]
fn test_comparisons_follow_user_observed_order() {
    // "> 10": observed must exceed the user value
    assert!(Comparison::Gt.eval(10, 11));
    assert!(!Comparison::Gt.eval(10, 10));
    assert!(!Comparison::Gt.eval(10, 9));

    // "< 10": observed must be below it
    assert!(Comparison::Lt.eval(10, 9));
    assert!(!Comparison::Lt.eval(10, 10));
}

#[test]
fn test_discovery_on_a_literal_maps_table() {
    let maps = "\
559900000000-559900004000 rw-p 00000000 103:02 1 /usr/bin/app
7f0000000000-7f0000002000 rw-p 00000000 103:02 2 /usr/lib/libm.so.6
7f1000000000-7f1000002000 r--p 00000000 103:02 3 /etc/data
7ffe00000000-7ffe00021000 rw-p 00000000 00:00 0 [stack]
";

    let regions = discover(maps.as_bytes(), false).unwrap();
    assert_eq!(regions.len(), 2);

    // stack first, so a budget cutoff still covers it
    assert_eq!(regions[0].start, 0x7ffe00000000);
    assert_eq!(regions[0].id, 0);
    assert_eq!(regions[1].start, 0x559900000000);
    assert_eq!(regions[1].id, 1);
}

#[test]
fn test_discovery_with_nothing_suitable() {
    let maps = "7f0000000000-7f0000002000 r-xp 00000000 103:02 2 /usr/lib/libm.so.6\n";
    let err = discover(maps.as_bytes(), false).unwrap_err();
    assert!(matches!(err, MemoryError::NoSuitableRegions));
}
