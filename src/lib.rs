//! Needleman-Wunsch global alignment with exhaustive enumeration of every
//! tie-optimal alignment.
//!
//! ```
//! use nw_aligner::{NeedlemanWunsch, ScoreParams, Sequence};
//!
//! let engine = NeedlemanWunsch::build(
//!     Sequence::new("AB"),
//!     Sequence::new("AB"),
//!     ScoreParams::new(2, -1, -1),
//! );
//! let optimal = engine.optimal_alignments();
//! assert_eq!(optimal.score(), 4);
//! assert_eq!(optimal.alignments()[0].first(), "AB");
//! ```

use std::ops::Index;

use log::{debug, warn};
use thiserror::Error;

pub mod alignment_mode;
pub mod config;
pub mod matrix;
pub mod scoring;
pub mod traceback;

pub use crate::alignment_mode::TracebackMode;
pub use crate::config::AlignerConfig;
pub use crate::matrix::{
    BoardCell, CellContributors, Contribution, Direction, DirectionSet, Position, ScoringMatrix,
};
pub use crate::scoring::{score_alignment, select_optimal, AlignmentStats, OptimalAlignments};
pub use crate::traceback::{AlignedPair, Path, Step, TracebackOperation};

// Weights of the engine shown before the user enters any parameters
pub const DEFAULT_MATCH: i32 = 1;
pub const DEFAULT_MISMATCH: i32 = -1;
pub const DEFAULT_GAP: i32 = -2;

pub const DEFAULT_GAP_SYMBOL: char = '-';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignerError {
    #[error("Invalid {name} parameter: {value:?} is not an integer")]
    InvalidParameter { name: &'static str, value: String },
    #[error("Sequence too large: {0}")]
    SequenceTooLarge(usize),
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} board")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, AlignerError>;

/// Linear-gap scoring weights.
///
/// The matrix uses the weights as given. Use [`ScoreParams::normalized`] to
/// turn user-entered values into a reward and two penalties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParams {
    pub match_score: i32,
    pub mismatch: i32,
    pub gap: i32,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch: DEFAULT_MISMATCH,
            gap: DEFAULT_GAP,
        }
    }
}

impl ScoreParams {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
        }
    }

    /// Applies the sign policy: the match weight is always a reward, the
    /// mismatch and gap weights are always penalties, whatever sign was
    /// entered.
    pub fn normalized(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score: match_score.saturating_abs(),
            mismatch: -mismatch.saturating_abs(),
            gap: -gap.saturating_abs(),
        }
    }

    /// Score for aligning two symbols against each other.
    pub fn substitution(&self, a: char, b: char) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence {
    data: Vec<char>,
}

impl Sequence {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.chars().collect(),
        }
    }

    /// Builds a sequence folded to upper case, the only alphabet
    /// normalization the engine applies.
    pub fn uppercase(data: &str) -> Self {
        Self::new(&data.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.data.get(index).copied()
    }
}

impl Index<usize> for Sequence {
    type Output = char;

    fn index(&self, index: usize) -> &char {
        &self.data[index]
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.data.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

fn parse_weight(name: &'static str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| AlignerError::InvalidParameter {
            name,
            value: value.to_string(),
        })
}

/// An alignment engine for one `(seq1, seq2, weights)` tuple.
///
/// The scoring matrix and its direction map are built once in the
/// constructor and never change. Any parameter change means building a new
/// engine; a failed build leaves an existing engine untouched.
#[derive(Debug, Clone)]
pub struct NeedlemanWunsch {
    seq1: Sequence,
    seq2: Sequence,
    params: ScoreParams,
    config: AlignerConfig,
    matrix: ScoringMatrix,
}

impl NeedlemanWunsch {
    /// Builds an engine with the default configuration.
    pub fn build(seq1: Sequence, seq2: Sequence, params: ScoreParams) -> Self {
        Self::assemble(seq1, seq2, params, AlignerConfig::default())
    }

    /// Builds an engine, rejecting sequences longer than the configured bound.
    pub fn with_config(
        seq1: Sequence,
        seq2: Sequence,
        params: ScoreParams,
        config: AlignerConfig,
    ) -> Result<Self> {
        if let Some(limit) = config.max_sequence_len() {
            let longest = std::cmp::max(seq1.len(), seq2.len());
            if longest > limit {
                return Err(AlignerError::SequenceTooLarge(longest));
            }
        }
        Ok(Self::assemble(seq1, seq2, params, config))
    }

    /// Builds an engine from raw text fields.
    ///
    /// Weights are parsed as integers and sign-normalized, sequences are
    /// folded to upper case.
    pub fn from_text(
        seq1: &str,
        seq2: &str,
        match_score: &str,
        mismatch: &str,
        gap: &str,
        config: AlignerConfig,
    ) -> Result<Self> {
        let params = ScoreParams::normalized(
            parse_weight("match", match_score)?,
            parse_weight("mismatch", mismatch)?,
            parse_weight("gap", gap)?,
        );
        Self::with_config(
            Sequence::uppercase(seq1),
            Sequence::uppercase(seq2),
            params,
            config,
        )
    }

    fn assemble(
        seq1: Sequence,
        seq2: Sequence,
        params: ScoreParams,
        config: AlignerConfig,
    ) -> Self {
        let matrix = ScoringMatrix::build(&seq1, &seq2, &params);
        debug!(
            "Built {}x{} scoring board, terminal score {}",
            matrix.rows(),
            matrix.cols(),
            matrix.score(matrix.terminal())
        );
        Self {
            seq1,
            seq2,
            params,
            config,
            matrix,
        }
    }

    pub fn seq1(&self) -> &Sequence {
        &self.seq1
    }

    pub fn seq2(&self) -> &Sequence {
        &self.seq2
    }

    pub fn params(&self) -> &ScoreParams {
        &self.params
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    pub fn matrix(&self) -> &ScoringMatrix {
        &self.matrix
    }

    /// `(rows, cols)` of the board, header row and column included.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.matrix.rows(), self.matrix.cols())
    }

    pub fn terminal_score(&self) -> i64 {
        self.matrix.score(self.matrix.terminal())
    }

    fn checked(&self, row: usize, col: usize) -> Result<Position> {
        let pos = Position::new(row, col);
        if !self.matrix.contains(pos) {
            let (rows, cols) = self.dimensions();
            return Err(AlignerError::CellOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        Ok(pos)
    }

    /// Score held by a board cell. Header cells hold symbols and report 0.
    pub fn cell_score(&self, row: usize, col: usize) -> Result<i64> {
        let pos = self.checked(row, col)?;
        Ok(self.matrix.score(pos))
    }

    pub fn board_cell(&self, row: usize, col: usize) -> Result<BoardCell> {
        let pos = self.checked(row, col)?;
        Ok(self.matrix.board_cell(pos, &self.seq1, &self.seq2))
    }

    /// The candidate predecessor scores a cell was derived from.
    pub fn cell_contributors(&self, row: usize, col: usize) -> Result<CellContributors> {
        let pos = self.checked(row, col)?;
        Ok(self
            .matrix
            .contributors(pos, &self.seq1, &self.seq2, &self.params))
    }

    pub fn directions(&self, row: usize, col: usize) -> Result<DirectionSet> {
        let pos = self.checked(row, col)?;
        Ok(self.matrix.directions(pos))
    }

    /// Traceback paths from the terminal cell to the origin, according to
    /// the configured [`TracebackMode`].
    pub fn traceback_paths(&self) -> Vec<Path> {
        let terminal = self.matrix.terminal();
        match self.config.traceback_mode() {
            TracebackMode::Exhaustive => {
                let paths = traceback::enumerate_paths(&self.matrix, terminal);
                if paths.len() > self.config.path_warning_threshold() {
                    warn!(
                        "Exhaustive traceback emitted {} paths for {}x{} sequences",
                        paths.len(),
                        self.seq1.len(),
                        self.seq2.len()
                    );
                }
                paths
            }
            TracebackMode::Representative => traceback::first_path(&self.matrix, terminal)
                .into_iter()
                .collect(),
        }
    }

    /// Every alignment reconstructed from [`Self::traceback_paths`].
    pub fn candidate_alignments(&self) -> Vec<AlignedPair> {
        let gap = self.config.gap_symbol();
        self.traceback_paths()
            .iter()
            .map(|path| traceback::reconstruct(path, &self.seq1, &self.seq2, gap))
            .collect()
    }

    /// The alignments sharing the maximum score. Recomputed on every call.
    pub fn optimal_alignments(&self) -> OptimalAlignments {
        select_optimal(
            self.candidate_alignments(),
            &self.params,
            self.terminal_score(),
        )
    }
}
