//! Integer extraction from free-form puzzle lines.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static UNSIGNED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Every run of digits in `line`, in order. A leading `-` is ignored.
///
/// ```
/// use aoc_solutions::utils::parse::unsigned_integers;
///
/// let groups: Vec<usize> = unsigned_integers("1,1,3").unwrap();
/// assert_eq!(groups, vec![1, 1, 3]);
/// ```
pub fn unsigned_integers<T: FromStr>(line: &str) -> Result<Vec<T>, T::Err> {
    UNSIGNED.find_iter(line).map(|m| m.as_str().parse()).collect()
}
