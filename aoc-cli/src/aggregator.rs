//! Puts results arriving from parallel workers back into year/day/part order
//!
//! Expected keys sit in a min-heap; results that arrive early are parked
//! until every key before them has been emitted.

use crate::executor::SolverResult;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    parked: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            parked: BTreeMap::new(),
        }
    }

    /// Accept a result and return every result now ready, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.parked.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(&Reverse(next)) = self.expected.peek() {
            let Some(result) = self.parked.remove(&next) else {
                break;
            };
            self.expected.pop();
            ready.push(result);
        }
        ready
    }

    /// Everything still parked, in order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.parked).into_values().collect()
    }

    /// Keys that never produced a result
    pub fn missing(&self) -> Vec<ResultKey> {
        let mut keys: Vec<ResultKey> = self
            .expected
            .iter()
            .map(|Reverse(key)| *key)
            .filter(|key| !self.parked.contains_key(key))
            .collect();
        keys.sort();
        keys
    }

    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{year}_{day}_{part}")),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    fn keys_of(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn test_in_order_results_pass_straight_through() {
        let mut agg = ResultAggregator::new([key(2023, 1, 1), key(2023, 1, 2)]);

        assert_eq!(keys_of(&agg.add(result(2023, 1, 1))), vec![key(2023, 1, 1)]);
        assert_eq!(keys_of(&agg.add(result(2023, 1, 2))), vec![key(2023, 1, 2)]);
        assert!(agg.is_complete());
        assert!(agg.drain().is_empty());
    }

    #[test]
    fn test_early_results_wait_for_their_turn() {
        let mut agg =
            ResultAggregator::new([key(2023, 2, 1), key(2023, 1, 2), key(2023, 1, 1)]);

        assert!(agg.add(result(2023, 1, 2)).is_empty());
        assert!(agg.add(result(2023, 2, 1)).is_empty());

        let ready = agg.add(result(2023, 1, 1));
        assert_eq!(
            keys_of(&ready),
            vec![key(2023, 1, 1), key(2023, 1, 2), key(2023, 2, 1)]
        );
        assert_eq!(ready[1].answer.as_deref().ok(), Some("2023_1_2"));
        assert!(agg.is_complete());
    }

    #[test]
    fn test_years_order_before_days() {
        let mut agg = ResultAggregator::new([key(2022, 25, 1), key(2023, 1, 1)]);
        assert!(agg.add(result(2023, 1, 1)).is_empty());
        assert_eq!(agg.add(result(2022, 25, 1)).len(), 2);
    }

    #[test]
    fn test_missing_and_drain() {
        let mut agg = ResultAggregator::new([key(2023, 1, 1), key(2023, 1, 2), key(2023, 3, 1)]);

        assert!(agg.add(result(2023, 3, 1)).is_empty());
        assert!(agg.add(result(2023, 1, 2)).is_empty());
        assert!(!agg.is_complete());
        assert_eq!(agg.missing(), vec![key(2023, 1, 1)]);

        let remaining = agg.drain();
        assert_eq!(keys_of(&remaining), vec![key(2023, 1, 2), key(2023, 3, 1)]);
    }
}
