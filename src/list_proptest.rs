#![cfg(test)]

// Property tests for SentinelList kept inside the crate so they can reach
// the sentinel handle and stale-handle behavior directly.

use crate::error::ListError;
use crate::list::{Handle, SentinelList};
use proptest::prelude::*;
use std::collections::VecDeque;

// Small value range so duplicates are common; MAX is the reserved marker.
fn arb_value() -> impl Strategy<Value = i32> {
    prop_oneof![
        8 => 0i32..6,
        1 => Just(i32::MAX),
    ]
}

#[derive(Clone, Debug)]
enum Op {
    InsertFront(i32),
    InsertBack(i32),
    Find(i32),
    RemoveFound(i32),
    RemoveStale,
    RemoveSentinel,
    PopFront,
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            4 => arb_value().prop_map(Op::InsertFront),
            3 => arb_value().prop_map(Op::InsertBack),
            2 => arb_value().prop_map(Op::Find),
            3 => arb_value().prop_map(Op::RemoveFound),
            1 => Just(Op::RemoveStale),
            1 => Just(Op::RemoveSentinel),
            2 => Just(Op::PopFront),
            1 => Just(Op::Clear),
        ],
        1..120,
    )
}

// Property: State-machine equivalence against a VecDeque model.
// Invariants exercised across random operation sequences:
// - Front/back insertion order matches the model; the reserved marker is
//   rejected and leaves the list unchanged.
// - `find` reports the first match from the front.
// - Removal by handle splices exactly one node; removed handles stay stale.
// - The sentinel can never be removed.
// - `len`/`is_empty`/`front`/`back` parity with the model after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: SentinelList<i32> = SentinelList::new();
        let mut model: VecDeque<i32> = VecDeque::new();
        let mut stale: Vec<Handle> = Vec::new();

        for op in ops {
            match op {
                Op::InsertFront(v) => match sut.insert(v) {
                    Ok(h) => {
                        prop_assert!(v != i32::MAX);
                        prop_assert_eq!(h.value(&sut), Some(&v));
                        model.push_front(v);
                    }
                    Err(e) => {
                        prop_assert_eq!(v, i32::MAX);
                        prop_assert_eq!(e, ListError::InvalidValue);
                    }
                },
                Op::InsertBack(v) => match sut.insert_back(v) {
                    Ok(h) => {
                        prop_assert!(v != i32::MAX);
                        prop_assert_eq!(h.value(&sut), Some(&v));
                        model.push_back(v);
                    }
                    Err(e) => {
                        prop_assert_eq!(v, i32::MAX);
                        prop_assert_eq!(e, ListError::InvalidValue);
                    }
                },
                Op::Find(v) => {
                    if v == i32::MAX {
                        prop_assert_eq!(sut.find(&v), Err(ListError::InvalidValue));
                    } else {
                        let found = sut.find(&v).expect("searchable value");
                        prop_assert_eq!(found.is_some(), model.contains(&v));
                        if let Some(h) = found {
                            // First match from the front: every node before it differs.
                            let before: Vec<_> = sut
                                .handles()
                                .take_while(|&(hh, _)| hh != h)
                                .map(|(_, x)| *x)
                                .collect();
                            prop_assert!(!before.contains(&v));
                        }
                    }
                }
                Op::RemoveFound(v) => {
                    if v == i32::MAX {
                        continue;
                    }
                    match sut.find(&v).expect("searchable value") {
                        Some(h) => {
                            let pos = model.iter().position(|&x| x == v).expect("present in model");
                            prop_assert_eq!(model.remove(pos), Some(v));
                            prop_assert_eq!(sut.remove(h), Ok(v));
                            stale.push(h);
                        }
                        None => prop_assert!(!model.contains(&v)),
                    }
                }
                Op::RemoveStale => {
                    if let Some(&h) = stale.last() {
                        prop_assert_eq!(sut.remove(h), Err(ListError::StaleHandle));
                    }
                }
                Op::RemoveSentinel => {
                    prop_assert_eq!(sut.remove(sut.head()), Err(ListError::InvalidOperation));
                }
                Op::PopFront => {
                    prop_assert_eq!(sut.pop_front(), model.pop_front());
                }
                Op::Clear => {
                    stale.extend(sut.handles().map(|(h, _)| h));
                    sut.clear();
                    model.clear();
                }
            }

            // Post-conditions after each op
            for &h in &stale {
                prop_assert!(h.value(&sut).is_none());
            }
            let seen: Vec<i32> = sut.iter().copied().collect();
            let expected: Vec<i32> = model.iter().copied().collect();
            prop_assert_eq!(seen, expected);
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.front(), model.front());
            prop_assert_eq!(sut.back(), model.back());
        }
    }
}
