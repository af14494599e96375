//! String similarity for "did you mean" suggestions.
//!
//! Implements the Ratcliff-Obershelp "gestalt pattern matching" ratio: find the longest
//! common block, recurse on both sides of it, and score `2 * matched / total_len`.
//! Candidate ranking mirrors the classic close-matches helper: keep every candidate at
//! or above a cutoff, order by score (ties broken by the candidate text, descending)
//! and return the first `n`.

use std::collections::HashMap;

/// Sequences at least this long get their most frequent elements ignored when
/// searching for matching blocks.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity ratio in `[0.0, 1.0]` between `candidate` and `query`.
///
/// Identical strings score `1.0`; two empty strings also score `1.0`.
///
/// # Example
///
/// ```
/// use booking::similarity::ratio;
///
/// assert!((ratio("abcd", "bcde") - 0.75).abs() < f64::EPSILON);
/// assert!(ratio("TechFest 2025", "TechFset") > 0.5);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)] // lengths of display names
pub fn ratio(candidate: &str, query: &str) -> f64 {
    let a: Vec<char> = candidate.chars().collect();
    let b: Vec<char> = query.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = SequenceMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Up to `limit` candidates whose [`ratio`] against `query` is at least `cutoff`,
/// best first.
///
/// # Example
///
/// ```
/// use booking::similarity::close_matches;
///
/// let names = ["TechFest 2025", "AI Summit", "Art & Design Expo"];
/// let matches = close_matches("TechFset", names, 3, 0.5);
/// assert_eq!(matches, vec!["TechFest 2025".to_string()]);
/// ```
pub fn close_matches<'a, I>(query: &str, candidates: I, limit: usize, cutoff: f64) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| (ratio(candidate, query), candidate))
        .filter(|(score, _)| *score >= cutoff)
        .collect();

    scored.sort_by(|(sa, na), (sb, nb)| sb.total_cmp(sa).then_with(|| nb.cmp(na)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, name)| name.to_string()).collect()
}

/// Matching-block search over two char sequences.
struct SequenceMatcher<'s> {
    a: &'s [char],
    b: &'s [char],
    /// Positions of each element of `b`, ascending; popular elements removed
    b2j: HashMap<char, Vec<usize>>,
}

impl<'s> SequenceMatcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            b2j.entry(*ch).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let popular_threshold = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= popular_threshold);
        }

        Self { a, b, b2j }
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given window, earliest in `a`
    /// (then earliest in `b`) among equally long blocks.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_runs: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_ending_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_runs.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            run_ending_at = next_runs;
        }

        (best_i, best_j, best_len)
    }

    /// Total number of elements covered by matching blocks.
    fn matched_len(&self) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }
}
