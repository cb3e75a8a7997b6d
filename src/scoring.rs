use std::collections::HashSet;

use log::debug;

use crate::matrix::Position;
use crate::traceback::{AlignedPair, TracebackOperation};
use crate::ScoreParams;

/// Column counts of one alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    pub matches: u32,
    pub mismatches: u32,
    pub gaps: u32,
}

impl AlignmentStats {
    pub fn of(pair: &AlignedPair) -> Self {
        pair.operations()
            .fold(AlignmentStats::default(), |mut acc, op| {
                match op {
                    TracebackOperation::Match => acc.matches += 1,
                    TracebackOperation::Mismatch => acc.mismatches += 1,
                    TracebackOperation::Insertion | TracebackOperation::Deletion => acc.gaps += 1,
                }
                acc
            })
    }

    pub fn score(&self, params: &ScoreParams) -> i64 {
        i64::from(self.matches) * i64::from(params.match_score)
            + i64::from(self.mismatches) * i64::from(params.mismatch)
            + i64::from(self.gaps) * i64::from(params.gap)
    }
}

/// Column-wise score: `gap` for a gap column, otherwise `match_score` or
/// `mismatch`.
pub fn score_alignment(pair: &AlignedPair, params: &ScoreParams) -> i64 {
    AlignmentStats::of(pair).score(params)
}

/// The alignments sharing the maximum score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalAlignments {
    alignments: Vec<AlignedPair>,
    score: i64,
}

impl OptimalAlignments {
    pub fn alignments(&self) -> &[AlignedPair] {
        &self.alignments
    }

    pub fn into_alignments(self) -> Vec<AlignedPair> {
        self.alignments
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    pub fn contains(&self, pair: &AlignedPair) -> bool {
        self.alignments.contains(pair)
    }

    /// Board cells of each alignment, for highlighting the traceback.
    pub fn board_paths(&self, seq1_len: usize, seq2_len: usize) -> Vec<Vec<Position>> {
        self.alignments
            .iter()
            .map(|pair| pair.board_path(seq1_len, seq2_len))
            .collect()
    }
}

/// Keeps the candidates with the highest column-wise score.
///
/// Exact duplicates are dropped, every other tie is kept in the order it
/// was first seen. With no candidates the set is empty and `empty_score`
/// is reported.
pub fn select_optimal(
    candidates: Vec<AlignedPair>,
    params: &ScoreParams,
    empty_score: i64,
) -> OptimalAlignments {
    let total = candidates.len();
    let mut best: Option<i64> = None;
    let mut alignments: Vec<AlignedPair> = Vec::new();
    let mut seen: HashSet<AlignedPair> = HashSet::new();

    for pair in candidates {
        let score = score_alignment(&pair, params);
        match best {
            Some(current) if score < current => {}
            Some(current) if score == current => {
                if seen.insert(pair.clone()) {
                    alignments.push(pair);
                }
            }
            _ => {
                best = Some(score);
                alignments.clear();
                seen.clear();
                seen.insert(pair.clone());
                alignments.push(pair);
            }
        }
    }

    let score = best.unwrap_or(empty_score);
    debug!(
        "Selected {} of {} candidate alignments with score {}",
        alignments.len(),
        total,
        score
    );
    OptimalAlignments { alignments, score }
}
