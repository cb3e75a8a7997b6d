use std::fmt;

use log::trace;

use crate::matrix::{Direction, DirectionSet, Position, ScoringMatrix};
use crate::Sequence;

/// Per-column relation between the two aligned sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    /// Gap in the first sequence against a symbol of the second.
    Insertion,
    /// Symbol of the first sequence against a gap in the second.
    Deletion,
}

/// One traceback move.
///
/// `seq1_index` and `seq2_index` are the 1-based indices of the symbols the
/// move consumes; only the ones the direction consumes are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub direction: Direction,
    pub seq1_index: usize,
    pub seq2_index: usize,
}

impl Step {
    fn leaving(direction: Direction, pos: Position) -> Self {
        Self {
            direction,
            seq1_index: pos.row - 1,
            seq2_index: pos.col - 1,
        }
    }
}

/// Steps from the terminal cell to the origin, in that order.
pub type Path = Vec<Step>;

struct Frame {
    position: Position,
    pending: DirectionSet,
}

/// Depth-first enumeration of every path from `start` to the origin.
///
/// Every tie in the direction map opens a branch, so the result can grow
/// combinatorially with the number of tied cells. The search keeps its own
/// stack whose depth never exceeds `len(seq1) + len(seq2) + 1`. Nothing is
/// emitted when `start` is the origin.
pub fn enumerate_paths(matrix: &ScoringMatrix, start: Position) -> Vec<Path> {
    let mut paths = Vec::new();
    if start.is_origin() {
        return paths;
    }

    let mut path: Path = Vec::with_capacity(start.row + start.col);
    let mut stack = vec![Frame {
        position: start,
        pending: matrix.directions(start),
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.position.is_origin() {
            trace!("Traceback path #{} with {} steps", paths.len(), path.len());
            paths.push(path.clone());
            stack.pop();
            path.pop();
            continue;
        }

        match frame.pending.pop_first() {
            Some(direction) => {
                let from = frame.position;
                let next = direction.predecessor(from);
                path.push(Step::leaving(direction, from));
                stack.push(Frame {
                    position: next,
                    pending: matrix.directions(next),
                });
            }
            None => {
                stack.pop();
                path.pop();
            }
        }
    }

    paths
}

/// A single path following the first direction of every tie set.
pub fn first_path(matrix: &ScoringMatrix, start: Position) -> Option<Path> {
    if start.is_origin() {
        return None;
    }

    let mut path = Vec::with_capacity(start.row + start.col);
    let mut current = start;
    while !current.is_origin() {
        let direction = matrix.directions(current).first()?;
        path.push(Step::leaving(direction, current));
        current = direction.predecessor(current);
    }
    Some(path)
}

/// Turns a terminal-to-origin path into the aligned strings, read left to
/// right in sequence order.
pub fn reconstruct(path: &[Step], seq1: &Sequence, seq2: &Sequence, gap: char) -> AlignedPair {
    let mut aligned_seq1 = Vec::with_capacity(path.len());
    let mut aligned_seq2 = Vec::with_capacity(path.len());
    let mut operations = Vec::with_capacity(path.len());

    for step in path {
        match step.direction {
            Direction::Diagonal => {
                let (a, b) = (seq1[step.seq1_index - 1], seq2[step.seq2_index - 1]);
                aligned_seq1.push(a);
                aligned_seq2.push(b);
                operations.push(if a == b {
                    TracebackOperation::Match
                } else {
                    TracebackOperation::Mismatch
                });
            }
            Direction::Up => {
                aligned_seq1.push(seq1[step.seq1_index - 1]);
                aligned_seq2.push(gap);
                operations.push(TracebackOperation::Deletion);
            }
            Direction::Left => {
                aligned_seq1.push(gap);
                aligned_seq2.push(seq2[step.seq2_index - 1]);
                operations.push(TracebackOperation::Insertion);
            }
        }
    }

    // Built backwards from the terminal cell
    operations.reverse();
    AlignedPair {
        first: aligned_seq1.into_iter().rev().collect(),
        second: aligned_seq2.into_iter().rev().collect(),
        gap,
        operations,
    }
}

/// Two equal-length rows of symbols and gap markers, with the operation of
/// every column.
///
/// Pairs built by [`reconstruct`] know which columns are gaps, so a sequence
/// symbol equal to the gap marker is still scored as a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlignedPair {
    first: String,
    second: String,
    gap: char,
    operations: Vec<TracebackOperation>,
}

impl AlignedPair {
    /// Reads a pair from two rows. Any column holding `gap` is a gap column.
    pub fn new(first: impl Into<String>, second: impl Into<String>, gap: char) -> Self {
        let first = first.into();
        let second = second.into();
        let operations = first
            .chars()
            .zip(second.chars())
            .map(|(a, b)| {
                if a == gap {
                    TracebackOperation::Insertion
                } else if b == gap {
                    TracebackOperation::Deletion
                } else if a == b {
                    TracebackOperation::Match
                } else {
                    TracebackOperation::Mismatch
                }
            })
            .collect();
        Self {
            first,
            second,
            gap,
            operations,
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn gap(&self) -> char {
        self.gap
    }

    /// Number of aligned columns.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.first.chars().zip(self.second.chars())
    }

    pub fn operations(&self) -> impl Iterator<Item = TracebackOperation> + '_ {
        self.operations.iter().copied()
    }

    /// A row with its gap columns removed.
    pub fn ungapped_first(&self) -> String {
        self.first
            .chars()
            .zip(self.operations())
            .filter(|(_, op)| *op != TracebackOperation::Insertion)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn ungapped_second(&self) -> String {
        self.second
            .chars()
            .zip(self.operations())
            .filter(|(_, op)| *op != TracebackOperation::Deletion)
            .map(|(c, _)| c)
            .collect()
    }

    /// Board cells this alignment passes through, from the terminal cell
    /// towards the origin, one per column. The origin itself is not listed.
    pub fn board_path(&self, seq1_len: usize, seq2_len: usize) -> Vec<Position> {
        let mut cells = Vec::with_capacity(self.len());
        let (mut i, mut j) = (seq1_len, seq2_len);
        for op in self.operations.iter().rev() {
            cells.push(Position::new(i + 1, j + 1));
            match op {
                TracebackOperation::Match | TracebackOperation::Mismatch => {
                    i = i.saturating_sub(1);
                    j = j.saturating_sub(1);
                }
                TracebackOperation::Deletion => i = i.saturating_sub(1),
                TracebackOperation::Insertion => j = j.saturating_sub(1),
            }
        }
        cells
    }
}

impl fmt::Display for AlignedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.first)?;
        write!(f, "{}", self.second)
    }
}
