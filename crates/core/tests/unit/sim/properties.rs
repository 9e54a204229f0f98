//! Replay Invariants.
//!
//! Randomized traces over random geometries. Whatever the hit/miss split, the totals
//! must account for exactly one classification per block access plus one bonus hit
//! per modify access.

use std::fmt::Write as _;

use csim_core::sim::Replayer;
use csim_core::trace::{Operation, TraceRecord};
use proptest::prelude::*;

use crate::common::geometry;

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Load),
        Just(Operation::Store),
        Just(Operation::Modify),
    ]
}

fn record() -> impl Strategy<Value = TraceRecord> {
    (operation(), 0u64..(1 << 20), 1u64..=64)
        .prop_map(|(op, addr, size)| TraceRecord::new(op, addr, size))
}

proptest! {
    #[test]
    fn totals_account_for_every_access(
        s in 0u32..4,
        ways in 1usize..4,
        b in 0u32..5,
        records in prop::collection::vec(record(), 0..100),
    ) {
        let block_size = 1u64 << b;
        let mut trace = String::new();
        let mut expected_accesses = 0u64;
        let mut expected_bonus = 0u64;
        for record in &records {
            writeln!(trace, "{record}").unwrap();
            let accesses = record.size.div_ceil(block_size);
            expected_accesses += accesses;
            if record.op == Operation::Modify {
                expected_bonus += accesses;
            }
        }

        let mut replayer = Replayer::with_geometry(geometry(s, ways, b)).unwrap();
        let stats = replayer.replay(trace.as_bytes()).unwrap();

        prop_assert_eq!(stats.accesses(), expected_accesses + expected_bonus);
        prop_assert!(stats.hits >= expected_bonus);
        prop_assert!(stats.evictions <= stats.misses);
        prop_assert_eq!(replayer.records_processed(), records.len() as u64);
    }

    /// Replaying a trace twice on fresh caches gives the same totals.
    #[test]
    fn replay_is_deterministic(
        records in prop::collection::vec(record(), 0..50),
    ) {
        let trace: String = records.iter().map(|r| format!("{r}\n")).collect();
        let first = Replayer::with_geometry(geometry(2, 2, 3))
            .unwrap()
            .replay(trace.as_bytes())
            .unwrap();
        let second = Replayer::with_geometry(geometry(2, 2, 3))
            .unwrap()
            .replay(trace.as_bytes())
            .unwrap();
        prop_assert_eq!(first, second);
    }
}
