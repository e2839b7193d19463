//! Property-based tests for the queue using proptest
//!
//! Random operation sequences run against both the queue and a plain
//! `VecDeque` model; every result and the final contents must agree.

use crate::queue::Queue;
use crate::Error;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    PushBatch(Vec<i32>),
    Pop,
    Peek,
    PeekN(usize),
    PopN(usize),
    PopAll,
    PopWhileBelow(i32),
    PopUntilAbove(i32),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        1 => prop::collection::vec(any::<i32>(), 0..8).prop_map(Op::PushBatch),
        2 => Just(Op::Pop),
        1 => Just(Op::Peek),
        1 => (0usize..10).prop_map(Op::PeekN),
        1 => (0usize..10).prop_map(Op::PopN),
        1 => Just(Op::PopAll),
        1 => any::<i32>().prop_map(Op::PopWhileBelow),
        1 => any::<i32>().prop_map(Op::PopUntilAbove),
        1 => Just(Op::Clear),
    ]
}

fn model_take_prefix(model: &mut VecDeque<i32>, keep_going: impl Fn(i32) -> bool) -> Vec<i32> {
    let mut taken = Vec::new();
    while let Some(&head) = model.front() {
        if !keep_going(head) {
            break;
        }
        taken.push(head);
        model.pop_front();
    }
    taken
}

fn insufficient(requested: usize, len: usize) -> Error {
    Error::Insufficient { requested, len }
}

proptest! {
    #[test]
    fn test_matches_vecdeque_model(ops in prop::collection::vec(op_strategy(), 1..100)) {
        let queue = Queue::new();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(value) => {
                    queue.push(value);
                    model.push_back(value);
                }
                Op::PushBatch(values) => {
                    prop_assert_eq!(queue.push_batch(values.clone()), values.len());
                    model.extend(values);
                }
                Op::Pop => {
                    prop_assert_eq!(queue.pop(), model.pop_front().ok_or(Error::Empty));
                }
                Op::Peek => {
                    prop_assert_eq!(queue.peek(), model.front().copied().ok_or(Error::Empty));
                }
                Op::PeekN(n) => {
                    let expected = if model.len() < n {
                        Err(insufficient(n, model.len()))
                    } else {
                        Ok(model.iter().take(n).copied().collect::<Vec<_>>())
                    };
                    prop_assert_eq!(queue.peek_n(n), expected);
                }
                Op::PopN(n) => {
                    let expected = if model.len() < n {
                        Err(insufficient(n, model.len()))
                    } else {
                        Ok(model.drain(..n).collect::<Vec<_>>())
                    };
                    prop_assert_eq!(queue.pop_n(n), expected);
                }
                Op::PopAll => {
                    prop_assert_eq!(queue.pop_all(), model.drain(..).collect::<Vec<_>>());
                }
                Op::PopWhileBelow(limit) => {
                    let expected = model_take_prefix(&mut model, |v| v < limit);
                    prop_assert_eq!(queue.pop_while(|v| *v < limit), expected);
                }
                Op::PopUntilAbove(limit) => {
                    let expected = model_take_prefix(&mut model, |v| v <= limit);
                    prop_assert_eq!(queue.pop_until(|v| *v > limit), expected);
                }
                Op::Clear => {
                    queue.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.is_empty(), model.is_empty());
        }

        prop_assert_eq!(queue.pop_all(), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_fifo_ordering(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let queue = Queue::new();
        for &value in &values {
            queue.push(value);
        }
        prop_assert_eq!(queue.pop_all(), values);
    }

    #[test]
    fn test_reads_are_idempotent(
        values in prop::collection::vec(any::<i32>(), 0..50),
        n in 0usize..60,
        repeats in 1usize..5,
    ) {
        let queue: Queue<i32> = values.iter().copied().collect();
        let first_peek = queue.peek();
        let first_peek_n = queue.peek_n(n);

        for _ in 0..repeats {
            prop_assert_eq!(queue.peek(), first_peek);
            prop_assert_eq!(queue.peek_n(n), first_peek_n.clone());
            prop_assert_eq!(queue.len(), values.len());
        }
    }

    #[test]
    fn test_pop_while_and_pop_until_split_the_queue(
        values in prop::collection::vec(0i32..100, 0..50),
        threshold in 0i32..100,
    ) {
        let queue: Queue<i32> = values.iter().copied().collect();
        let taken = queue.pop_while(|v| *v < threshold);
        let rest = queue.pop_all();

        prop_assert!(taken.iter().all(|v| *v < threshold));
        if let Some(head) = rest.first() {
            prop_assert!(*head >= threshold);
        }
        prop_assert_eq!([taken, rest].concat(), values.clone());

        let queue: Queue<i32> = values.iter().copied().collect();
        let before = queue.pop_until(|v| *v >= threshold);
        prop_assert!(before.iter().all(|v| *v < threshold));
        prop_assert_eq!(before.len() + queue.len(), values.len());
    }
}
