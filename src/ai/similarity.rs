//! Order-independent token-set similarity on a 0–100 scale.

use std::collections::BTreeSet;

/// Normalised similarity of two strings from the length of their longest
/// common subsequence: `100 * 2 * lcs / (len_a + len_b)`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }

    100.0 * (2 * lcs_len(&a, &b)) as f64 / total as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Single rolling row over b
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Token-set ratio over two token sets.
///
/// Shared tokens are compared against each side's leftovers, so word order
/// and repeated words do not matter, and a set that is fully contained in
/// the other scores 100.
pub fn token_set_ratio(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = a.intersection(b).copied().collect();
    let diff_ab: Vec<&str> = a.difference(b).copied().collect();
    let diff_ba: Vec<&str> = b.difference(a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = intersection.join(" ");
    let combined_ab = join_nonempty(&sect, &diff_ab.join(" "));
    let combined_ba = join_nonempty(&sect, &diff_ba.join(" "));

    let mut best = ratio(&combined_ab, &combined_ba);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined_ab))
            .max(ratio(&sect, &combined_ba));
    }
    best
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}
