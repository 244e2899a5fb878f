use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug, Clone)]
struct SharedData {
    numbers: Vec<i32>,
    sum: Option<i32>,
    count: Option<usize>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct TestDependentSolver;

impl AocParser for TestDependentSolver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers: Vec<i32> = input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<i32>()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SharedData {
            numbers,
            sum: None,
            count: None,
        })
    }
}

impl PartSolver<1> for TestDependentSolver {
    type Answer = i32;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<i32, SolveError> {
        let sum: i32 = shared.numbers.iter().sum();

        // Store for part 2
        shared.sum = Some(sum);
        shared.count = Some(shared.numbers.len());

        Ok(sum)
    }
}

impl PartSolver<2> for TestDependentSolver {
    type Answer = String;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = shared.sum.unwrap_or_else(|| shared.numbers.iter().sum());
        let count = shared.count.unwrap_or(shared.numbers.len());

        let avg = if count > 0 {
            sum as f64 / count as f64
        } else {
            0.0
        };
        Ok(format!("{:.2}", avg))
    }
}

#[test]
fn test_part1_stores_data() {
    let mut shared = TestDependentSolver::parse("10\n20\n30").unwrap();

    let result = TestDependentSolver::solve_part(&mut shared, 1).unwrap();
    assert_eq!(result, "60");

    assert_eq!(shared.sum, Some(60));
    assert_eq!(shared.count, Some(3));
}

#[test]
fn test_part2_uses_part1_data() {
    let mut shared = TestDependentSolver::parse("10\n20\n30").unwrap();

    TestDependentSolver::solve_part(&mut shared, 1).unwrap();
    // Poison the numbers: part 2 must read the stored sum instead
    shared.numbers.clear();

    let part2 = TestDependentSolver::solve_part(&mut shared, 2).unwrap();
    assert_eq!(part2, "20.00");
}

#[test]
fn test_part2_solves_independently() {
    let mut shared = TestDependentSolver::parse("10\n20\n30").unwrap();

    let result = TestDependentSolver::solve_part(&mut shared, 2).unwrap();
    assert_eq!(result, "20.00");
}

#[test]
fn test_unknown_part_is_not_implemented() {
    let mut shared = TestDependentSolver::parse("1").unwrap();

    assert!(matches!(
        TestDependentSolver::solve_part(&mut shared, 3),
        Err(SolveError::PartNotImplemented(3))
    ));
}
