use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::dp_cache::{DpCache, DpCacheError, DpProblem, Vec2DBackend};
use crate::utils::parse::unsigned_integers;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["2023", "dp", "parallel"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spring {
    Operational,
    Damaged,
    Unknown,
}

impl Spring {
    fn could_be_operational(self) -> bool {
        matches!(self, Spring::Operational | Spring::Unknown)
    }

    fn could_be_damaged(self) -> bool {
        matches!(self, Spring::Damaged | Spring::Unknown)
    }
}

impl TryFrom<char> for Spring {
    type Error = anyhow::Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Spring::Operational),
            '#' => Ok(Spring::Damaged),
            '?' => Ok(Spring::Unknown),
            _ => Err(anyhow!("unexpected spring symbol {c:?}")),
        }
    }
}

/// One row of springs and the damaged-group sizes it must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    springs: Vec<Spring>,
    groups: Vec<usize>,
}

impl Record {
    /// `copies` copies of the springs joined by unknowns, groups repeated.
    fn unfold(&self, copies: usize) -> Record {
        let mut springs = Vec::with_capacity((self.springs.len() + 1) * copies);
        for i in 0..copies {
            if i > 0 {
                springs.push(Spring::Unknown);
            }
            springs.extend_from_slice(&self.springs);
        }
        Record {
            springs,
            groups: self.groups.repeat(copies),
        }
    }

    fn arrangements(&self) -> Result<u64, DpCacheError> {
        DpCache::builder()
            .backend(Vec2DBackend::new(
                self.springs.len() + 2,
                self.groups.len() + 1,
            ))
            .problem(Arrangements { record: self })
            .build()
            .get(&(0, 0))
    }
}

/// `(position, group)`: ways to place `groups[group..]` into `springs[position..]`.
struct Arrangements<'r> {
    record: &'r Record,
}

impl Arrangements<'_> {
    fn group_fits(&self, position: usize, size: usize) -> bool {
        let springs = &self.record.springs;
        springs[position..position + size]
            .iter()
            .all(|s| s.could_be_damaged())
            && springs
                .get(position + size)
                .is_none_or(|s| s.could_be_operational())
    }
}

impl DpProblem<(usize, usize), u64> for Arrangements<'_> {
    fn deps(&self, &(position, group): &(usize, usize)) -> Vec<(usize, usize)> {
        let Record { springs, groups } = self.record;
        let Some(&size) = groups.get(group) else {
            return vec![];
        };
        if position + size > springs.len() {
            return vec![];
        }

        let mut deps = Vec::with_capacity(2);
        let here = springs[position];
        if here.could_be_operational() {
            deps.push((position + 1, group));
        }
        if here.could_be_damaged() && self.group_fits(position, size) {
            // skip the separator after the group
            deps.push((position + size + 1, group + 1));
        }
        deps
    }

    fn compute(&self, &(position, group): &(usize, usize), deps: Vec<u64>) -> u64 {
        let Record { springs, groups } = self.record;
        if group == groups.len() {
            let rest = springs.get(position..).unwrap_or_default();
            return rest.iter().all(|s| s.could_be_operational()) as u64;
        }
        deps.iter().sum()
    }
}

fn total_arrangements(records: &[Record], copies: usize, parallel: bool) -> Result<u64, SolveError> {
    let count = |record: &Record| record.unfold(copies).arrangements();
    let total = if parallel {
        records
            .par_iter()
            .map(count)
            .try_reduce(|| 0, |a, b| Ok(a + b))
    } else {
        records.iter().map(count).sum()
    };
    total.map_err(SolveError::failed)
}

fn parse_record(line: &str) -> anyhow::Result<Record> {
    let (springs, groups) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected springs and groups separated by a space"))?;

    let springs = springs
        .chars()
        .map(Spring::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let groups: Vec<usize> = unsigned_integers(groups).context("group size")?;

    if groups.is_empty() || groups.contains(&0) {
        return Err(anyhow!("group sizes must be positive, got {groups:?}"));
    }
    Ok(Record { springs, groups })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Record>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_record(line).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        total_arrangements(shared, 1, true)
    }
}

impl PartSolver<2> for Solver {
    type Answer = u64;

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<u64, SolveError> {
        total_arrangements(shared, 5, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const RECORDS: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

    #[test]
    fn test_per_line_counts() {
        let records = Solver::parse(RECORDS).unwrap();
        let folded: Vec<u64> = records.iter().map(|r| r.arrangements().unwrap()).collect();
        assert_eq!(folded, vec![1, 4, 1, 1, 4, 10]);

        let unfolded: Vec<u64> = records
            .iter()
            .map(|r| r.unfold(5).arrangements().unwrap())
            .collect();
        assert_eq!(unfolded, vec![1, 16384, 1, 16, 2500, 506250]);
    }

    #[test]
    fn test_parts() {
        let mut records = Solver::parse(RECORDS).unwrap();
        assert_eq!(Solver::solve_part(&mut records, 1).unwrap(), "21");
        assert_eq!(Solver::solve_part(&mut records, 2).unwrap(), "525152");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records = Solver::parse(RECORDS).unwrap();
        for copies in [1, 2, 5] {
            assert_eq!(
                total_arrangements(&records, copies, true).unwrap(),
                total_arrangements(&records, copies, false).unwrap()
            );
        }
    }

    #[test]
    fn test_unfold_joins_with_unknown() {
        let record = parse_record(".# 1").unwrap();
        let unfolded = record.unfold(2);
        assert_eq!(
            unfolded.springs,
            vec![
                Spring::Operational,
                Spring::Damaged,
                Spring::Unknown,
                Spring::Operational,
                Spring::Damaged
            ]
        );
        assert_eq!(unfolded.groups, vec![1, 1]);
    }

    #[test]
    fn test_impossible_record_counts_zero() {
        assert_eq!(parse_record("#.# 3").unwrap().arrangements(), Ok(0));
        assert_eq!(parse_record("... 1").unwrap().arrangements(), Ok(0));
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = Solver::parse("??? 1\n?x? 1").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
        assert!(Solver::parse("??? 0").is_err());
        assert!(Solver::parse("???").is_err());
    }
}
