//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth.
//! [`perft_stats`] additionally classifies the moves leading to those leaves,
//! which is how published shogi perft tables break their counts down.

use std::ops::AddAssign;

use super::{generate_moves, is_king_attacked, make_move};
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    match depth {
        0 => 1,
        1 => generate_moves(position).len() as u64,
        _ => generate_moves(position)
            .into_iter()
            .map(|m| perft(&make_move(position, m), depth - 1))
            .sum(),
    }
}

/// Breakdown of the moves that reach the leaves of a perft tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftStats {
    pub nodes: u64,
    pub captures: u64,
    pub drops: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl AddAssign for PerftStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.drops += other.drops;
        self.promotions += other.promotions;
        self.checks += other.checks;
    }
}

/// Counts leaf nodes at `depth` and classifies the last move into each.
///
/// At depth 0 the single leaf has no last move, so only `nodes` is set.
pub fn perft_stats(position: &Position, depth: u32) -> PerftStats {
    let mut stats = PerftStats::default();
    if depth == 0 {
        stats.nodes = 1;
        return stats;
    }

    for m in generate_moves(position) {
        let next = make_move(position, m);
        if depth > 1 {
            stats += perft_stats(&next, depth - 1);
            continue;
        }
        stats.nodes += 1;
        stats.captures += u64::from(m.captured.is_some());
        stats.drops += u64::from(m.is_drop());
        stats.promotions += u64::from(m.promote);
        stats.checks += u64::from(is_king_attacked(&next, next.side_to_move));
    }
    stats
}

/// Perft with divide: the node count below each root move, keyed by its USI
/// string and sorted. Useful for locating the move whose subtree is wrong.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = generate_moves(position)
        .into_iter()
        .map(|m| {
            let nodes = perft(&make_move(position, m), depth.saturating_sub(1));
            (m.to_usi(), nodes)
        })
        .collect();
    results.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    results
}
