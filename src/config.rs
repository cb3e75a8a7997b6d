use crate::alignment_mode::TracebackMode;
use crate::DEFAULT_GAP_SYMBOL;

// Exhaustive tracebacks beyond this many paths are logged as a warning
pub const DEFAULT_PATH_WARNING_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignerConfig {
    traceback_mode: TracebackMode,
    gap_symbol: char,
    max_sequence_len: Option<usize>,
    path_warning_threshold: usize,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            traceback_mode: TracebackMode::Exhaustive,
            gap_symbol: DEFAULT_GAP_SYMBOL,
            max_sequence_len: None,
            path_warning_threshold: DEFAULT_PATH_WARNING_THRESHOLD,
        }
    }
}

impl AlignerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_traceback_mode(mut self, mode: TracebackMode) -> Self {
        self.traceback_mode = mode;
        self
    }

    pub fn with_gap_symbol(mut self, gap_symbol: char) -> Self {
        self.gap_symbol = gap_symbol;
        self
    }

    /// Rejects sequences longer than `len` at build time.
    pub fn with_max_sequence_len(mut self, len: usize) -> Self {
        self.max_sequence_len = Some(len);
        self
    }

    pub fn with_path_warning_threshold(mut self, threshold: usize) -> Self {
        self.path_warning_threshold = threshold;
        self
    }

    pub fn traceback_mode(&self) -> TracebackMode {
        self.traceback_mode
    }

    pub fn gap_symbol(&self) -> char {
        self.gap_symbol
    }

    pub fn max_sequence_len(&self) -> Option<usize> {
        self.max_sequence_len
    }

    pub fn path_warning_threshold(&self) -> usize {
        self.path_warning_threshold
    }
}
