use std::cmp::Ordering;

use crate::Score;

/// Most wins first; equal win counts fall back to username order so listings are stable.
pub fn compare_scores(a: &Score, b: &Score) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| a.username.cmp(&b.username))
}

pub fn sort_scores(scores: &mut [Score]) {
    scores.sort_by(compare_scores);
}

pub fn format_leaderboard(scores: &[Score]) -> String {
    if scores.is_empty() {
        return "No wins recorded yet".to_string();
    }

    scores
        .iter()
        .enumerate()
        .map(|(rank, score)| format!("{:>2}. {:<20} {}", rank + 1, score.username, score.wins))
        .collect::<Vec<_>>()
        .join("\n")
}
