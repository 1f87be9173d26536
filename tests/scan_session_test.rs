//! End-to-end scan sessions against the test process's own memory

use memsift::{Comparison, ScanOptions, Scanner, TypeFilter, ValueBundle, ValueType};

fn own_pid_options() -> ScanOptions {
    ScanOptions::for_pid(std::process::id() as i32)
}

#[test]
#[cfg_attr(miri, ignore = "/proc access not supported under Miri")]
fn test_scanner_discovers_regions_of_a_live_process() {
    let opts = own_pid_options();
    let scanner = Scanner::new(opts.pid, &opts).unwrap();
    assert!(scanner.region_count() > 0);
    assert_eq!(scanner.pid(), opts.pid);
}

#[test]
#[cfg_attr(miri, ignore = "/proc access not supported under Miri")]
fn test_stack_scan_restricts_discovery() {
    let mut opts = own_pid_options();
    opts.stack_scan = true;

    let scanner = Scanner::new(opts.pid, &opts).unwrap();
    let full = Scanner::new(opts.pid, &own_pid_options()).unwrap();
    assert!(scanner.region_count() <= full.region_count());
    assert!(scanner.region_count() >= 1);
}

#[test]
#[cfg_attr(miri, ignore = "/proc access not supported under Miri")]
fn test_missing_target_is_unopenable() {
    // pid 0 never has a readable maps file
    let opts = ScanOptions::for_pid(0);
    let err = Scanner::new(0, &opts).unwrap_err();
    assert!(matches!(
        err,
        memsift::MemoryError::HandleUnopenable { .. }
    ));
}

#[test]
#[cfg_attr(miri, ignore = "/proc access not supported under Miri")]
fn test_scan_locates_a_planted_value() {
    let marker: &'static mut [u8; 16] = Box::leak(Box::new([0u8; 16]));
    marker[4..8].copy_from_slice(&424_243i32.to_ne_bytes());

    let opts = own_pid_options();
    let scanner = Scanner::new(opts.pid, &opts).unwrap();
    let hits = scanner
        .scan(
            &opts,
            &TypeFilter::only(ValueType::I32),
            &ValueBundle::parse("424243"),
            Comparison::Eq,
        )
        .unwrap();

    assert!(hits.count() >= 1);
    assert!(hits.i64_hits.is_empty());
    assert!(hits.f32_hits.is_empty());
    assert!(hits.f64_hits.is_empty());

    // every candidate was observed holding the value at scan time
    for candidate in &hits.i32_hits {
        assert_eq!(candidate.value_type, ValueType::I32);
        assert_eq!(candidate.stored_bytes(), &424_243i32.to_ne_bytes());
    }

    // the planted cell itself still reads back
    let live = hits
        .i32_hits
        .iter()
        .filter(|c| scanner.read_current::<i32>(c).ok() == Some(424_243))
        .count();
    assert!(live >= 1);
}

#[test]
#[cfg_attr(miri, ignore = "/proc access not supported under Miri")]
fn test_refinement_narrows_a_live_set() {
    let marker: &'static mut [u8; 16] = Box::leak(Box::new([0u8; 16]));
    marker[0..4].copy_from_slice(&777_001i32.to_ne_bytes());

    let opts = own_pid_options();
    let scanner = Scanner::new(opts.pid, &opts).unwrap();
    let initial = scanner
        .scan(
            &opts,
            &TypeFilter::only(ValueType::I32),
            &ValueBundle::parse("777001"),
            Comparison::Eq,
        )
        .unwrap();
    assert!(initial.count() >= 1);

    // the same predicate again can only narrow the set
    let refined = scanner
        .refine_relational(&ValueBundle::parse("777001"), &initial, Comparison::Eq)
        .unwrap();
    assert!(refined.count() <= initial.count());
    assert!(refined.count() >= 1);

    // a second refinement can only narrow further
    let narrowed = scanner
        .refine_relational(&ValueBundle::parse("777002"), &refined, Comparison::Eq)
        .unwrap();
    assert!(narrowed.count() <= refined.count());
}

#[test]
#[cfg_attr(miri, ignore = "/proc access not supported under Miri")]
fn test_zero_budget_returns_partial_results() {
    let filler: &'static mut Vec<u8> = Box::leak(Box::new(vec![0x2A; 1 << 20]));
    assert_eq!(filler[0], 0x2A);
    let pattern = i32::from_ne_bytes([0x2A; 4]).to_string();

    let mut opts = own_pid_options();
    opts.memory_limit = 0;

    let scanner = Scanner::new(opts.pid, &opts).unwrap();
    let hits = scanner
        .scan(
            &opts,
            &TypeFilter::only(ValueType::I32),
            &ValueBundle::parse(&pattern),
            Comparison::Eq,
        )
        .unwrap();

    // the cutoff fires only after something was collected
    assert!(hits.count() > 0);
}

#[test]
#[cfg_attr(miri, ignore = "/proc access not supported under Miri")]
fn test_invalid_literal_is_refused_before_scanning() {
    assert!(ValueBundle::try_parse("not-a-number").is_err());
    assert!(!ValueBundle::parse("12,5").is_valid());
}
