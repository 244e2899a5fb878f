//! Property-based tests for the AocSolver derive macro and the registry

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, RegistrationError, SolveError, Solver,
    SolverError, SolverRegistryBuilder,
};
use proptest::prelude::*;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct TestSolver;

impl AocParser for TestSolver {
    type SharedData<'a> = Vec<i32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat("bad int".into()))
            })
            .collect()
    }
}

impl PartSolver<1> for TestSolver {
    type Answer = i32;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<i32, SolveError> {
        Ok(shared.iter().sum())
    }
}

impl PartSolver<2> for TestSolver {
    type Answer = i64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<i64, SolveError> {
        Ok(shared.iter().map(|&n| n as i64).product())
    }
}

fn render(numbers: &[i32]) -> String {
    numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

mod part_dispatch {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// `solve_part(n)` equals `PartSolver<n>::solve` rendered with Display.
        #[test]
        fn solve_part_dispatches_to_correct_part_solver(
            numbers in prop::collection::vec(1i32..10, 1..5),
            part in 1u8..=2
        ) {
            let mut via_dispatch = numbers.clone();
            let mut via_direct = numbers.clone();

            let dispatched = TestSolver::solve_part(&mut via_dispatch, part).unwrap();
            let direct = match part {
                1 => <TestSolver as PartSolver<1>>::solve(&mut via_direct).unwrap().to_string(),
                _ => <TestSolver as PartSolver<2>>::solve(&mut via_direct).unwrap().to_string(),
            };

            prop_assert_eq!(dispatched, direct);
        }

        /// Parts past `max_parts` are reported as not implemented.
        #[test]
        fn solve_part_rejects_unknown_parts(part in 3u8..=255) {
            let mut shared = vec![1, 2, 3];
            let result = TestSolver::solve_part(&mut shared, part);
            prop_assert!(matches!(result, Err(SolveError::PartNotImplemented(p)) if p == part));
        }
    }
}

mod registry_roundtrip {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Solving through the registry matches solving the type directly.
        #[test]
        fn registry_solver_matches_direct(
            numbers in prop::collection::vec(1i32..10, 1..6),
            year in 2015u16..2035,
            day in 1u8..=25,
        ) {
            let registry = SolverRegistryBuilder::new()
                .register_solver::<TestSolver>(year, day)
                .unwrap()
                .build();

            let input = render(&numbers);
            let mut solver = registry.create_solver(year, day, &input).unwrap();
            prop_assert_eq!(solver.parts(), 2);

            let mut shared = numbers.clone();
            for part in 1..=2 {
                let expected = TestSolver::solve_part(&mut shared, part).unwrap();
                prop_assert_eq!(solver.solve(part).unwrap().value, expected);
            }
        }
    }
}

#[test]
fn test_duplicate_registration_rejected() {
    let result = SolverRegistryBuilder::new()
        .register_solver::<TestSolver>(2023, 1)
        .unwrap()
        .register_solver::<TestSolver>(2023, 1);

    assert!(matches!(result, Err(RegistrationError::DuplicateSolver(2023, 1))));
}

#[test]
fn test_out_of_range_registration_rejected() {
    let result = SolverRegistryBuilder::new().register_solver::<TestSolver>(2023, 26);
    assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2023, 26))));

    let result = SolverRegistryBuilder::new().register_solver::<TestSolver>(2014, 1);
    assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2014, 1))));
}

#[test]
fn test_missing_solver_is_not_found() {
    let registry = SolverRegistryBuilder::new().build();
    assert!(registry.is_empty());

    let err = registry.create_solver(2023, 5, "").err().unwrap();
    assert!(matches!(err, SolverError::NotFound(2023, 5)));
}

#[test]
fn test_iter_info_is_ordered() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<TestSolver>(2023, 17)
        .unwrap()
        .register_solver::<TestSolver>(2016, 3)
        .unwrap()
        .register_solver::<TestSolver>(2023, 2)
        .unwrap()
        .build();

    let keys: Vec<(u16, u8)> = registry.iter_info().map(|i| (i.year, i.day)).collect();
    assert_eq!(keys, vec![(2016, 3), (2023, 2), (2023, 17)]);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.get_info(2023, 17).map(|i| i.parts), Some(2));
}

#[test]
fn test_solve_result_timing_is_ordered() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<TestSolver>(2023, 1)
        .unwrap()
        .build();

    let mut solver: Box<dyn DynSolver> = registry.create_solver(2023, 1, "4\n5").unwrap();
    assert!(solver.parsed().end >= solver.parsed().start);

    let result = solver.solve(2).unwrap();
    assert_eq!(result.value, "20");
    assert!(result.start >= solver.parsed().end);
    assert!(result.duration() >= chrono::TimeDelta::zero());
}

/// Answer whose rendering takes far longer than computing it
struct SlowToRender(u32);

impl std::fmt::Display for SlowToRender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::thread::sleep(std::time::Duration::from_millis(200));
        write!(f, "{}", self.0)
    }
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
struct SlowRender;

impl AocParser for SlowRender {
    type SharedData<'a> = u32;

    fn parse(input: &str) -> Result<u32, ParseError> {
        input
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidFormat(input.to_string()))
    }
}

impl PartSolver<1> for SlowRender {
    type Answer = SlowToRender;

    fn solve(shared: &mut u32) -> Result<SlowToRender, SolveError> {
        Ok(SlowToRender(*shared + 1))
    }
}

#[test]
fn test_solve_time_excludes_rendering() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<SlowRender>(2023, 2)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2023, 2, "41").unwrap();
    let result = solver.solve(1).unwrap();

    assert_eq!(result.value, "42");
    assert!(result.duration() < chrono::TimeDelta::milliseconds(200));
}

#[test]
fn test_timed_dispatch_matches_untimed() {
    let mut shared = vec![2, 3, 4];
    for part in 1..=2 {
        let timed = TestSolver::solve_part_timed(&mut shared, part).unwrap();
        assert_eq!(timed.value, TestSolver::solve_part(&mut shared, part).unwrap());
    }
    assert!(matches!(
        TestSolver::solve_part_timed(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
}

#[test]
fn test_out_of_range_part_is_rejected_before_dispatch() {
    let registry = SolverRegistryBuilder::new()
        .register_solver::<TestSolver>(2023, 3)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2023, 3, "1").unwrap();
    assert!(matches!(solver.solve(0), Err(SolveError::PartOutOfRange(0))));
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}
