//! String similarity scorers, 0-100.
//!
//! `ratio` is the normalized indel similarity `2 * LCS / (len_a + len_b)`. The token and
//! partial variants build on it, and [`weighted_ratio`] picks the best of them with
//! penalties for partial and token-reordered matches, so it tolerates word order, case
//! and partially typed names.

use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;

/// Lower-case, turn non-alphanumerics into spaces, trim.
pub fn default_process(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.to_lowercase().trim().to_string()
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Normalized indel similarity of the raw strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any same-length window of the longer
/// one, including windows hanging over either end.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let m = short.len();
    let n = long.len();
    let mut best = 0.0f64;

    let mut consider = |window: &[char]| {
        let score = ratio_chars(&short, window);
        if score > best {
            best = score;
        }
        best >= 100.0
    };

    for start in 0..=(n - m) {
        if consider(&long[start..start + m]) {
            return 100.0;
        }
    }
    for k in 1..m.min(n + 1) {
        if consider(&long[..k]) || consider(&long[n - k..]) {
            return 100.0;
        }
    }
    best
}

fn tokens(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

fn sorted_tokens(s: &str) -> String {
    let mut t = tokens(s);
    t.sort_unstable();
    t.join(" ")
}

/// [`ratio`] after sorting the words of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

struct TokenSets {
    intersection: String,
    diff_ab: String,
    diff_ba: String,
    has_intersection: bool,
}

impl TokenSets {
    fn new(a: &str, b: &str) -> Self {
        let set_a: BTreeSet<&str> = tokens(a).into_iter().collect();
        let set_b: BTreeSet<&str> = tokens(b).into_iter().collect();
        let join = |it: Vec<&str>| it.join(" ");

        let intersection: Vec<&str> = set_a.intersection(&set_b).copied().collect();
        Self {
            has_intersection: !intersection.is_empty(),
            intersection: join(intersection),
            diff_ab: join(set_a.difference(&set_b).copied().collect()),
            diff_ba: join(set_b.difference(&set_a).copied().collect()),
        }
    }
}

/// Compares the shared words against each side's shared-plus-remaining words.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    if tokens(a).is_empty() || tokens(b).is_empty() {
        return 0.0;
    }
    let sets = TokenSets::new(a, b);

    // One side's words are a subset of the other's
    if sets.has_intersection && (sets.diff_ab.is_empty() || sets.diff_ba.is_empty()) {
        return 100.0;
    }

    let combine = |rest: &str| {
        if sets.intersection.is_empty() {
            rest.to_string()
        } else {
            format!("{} {}", sets.intersection, rest)
        }
    };
    let combined_ab = combine(&sets.diff_ab);
    let combined_ba = combine(&sets.diff_ba);

    let mut best = ratio(&combined_ab, &combined_ba);
    if sets.has_intersection {
        best = best
            .max(ratio(&sets.intersection, &combined_ab))
            .max(ratio(&sets.intersection, &combined_ba));
    }
    best
}

/// Partial matching over words: any shared word is a full match, otherwise the best
/// partial ratio of the sorted words or of the non-shared words.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    if tokens(a).is_empty() || tokens(b).is_empty() {
        return 0.0;
    }
    let sets = TokenSets::new(a, b);
    if sets.has_intersection {
        return 100.0;
    }

    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
        .max(partial_ratio(&sets.diff_ab, &sets.diff_ba))
}

/// Weighted combination of the scorers above, on processed input.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    weighted_ratio_processed(&default_process(a), &default_process(b))
}

/// [`weighted_ratio`] for strings that already went through [`default_process`].
pub fn weighted_ratio_processed(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let end_ratio = ratio(a, b);

    if len_ratio < 1.5 {
        let token_ratio = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return end_ratio.max(token_ratio * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let end_ratio = end_ratio.max(partial_ratio(a, b) * partial_scale);
    end_ratio.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}
