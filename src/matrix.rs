use crate::{ScoreParams, Sequence};

/// A traceback move, named after where the predecessor cell lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Predecessor at `(row - 1, col - 1)`: a symbol from each sequence.
    Diagonal,
    /// Predecessor at `(row - 1, col)`: a symbol from `seq1` against a gap.
    Up,
    /// Predecessor at `(row, col - 1)`: a gap against a symbol from `seq2`.
    Left,
}

impl Direction {
    // Iteration order of a DirectionSet
    pub const ALL: [Direction; 3] = [Direction::Diagonal, Direction::Up, Direction::Left];

    fn bit(self) -> u8 {
        match self {
            Direction::Diagonal => 0b001,
            Direction::Up => 0b010,
            Direction::Left => 0b100,
        }
    }

    /// The cell this move comes from. `pos` must not lie on the edge the
    /// move would cross.
    pub fn predecessor(self, pos: Position) -> Position {
        match self {
            Direction::Diagonal => Position::new(pos.row - 1, pos.col - 1),
            Direction::Up => Position::new(pos.row - 1, pos.col),
            Direction::Left => Position::new(pos.row, pos.col - 1),
        }
    }
}

/// Every direction that attains a cell's score. Ties are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    pub fn single(direction: Direction) -> Self {
        Self(direction.bit())
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// First direction in Diagonal, Up, Left order.
    pub fn first(&self) -> Option<Direction> {
        self.iter().next()
    }

    /// Removes and returns the first direction.
    pub fn pop_first(&mut self) -> Option<Direction> {
        let direction = self.first()?;
        self.0 &= !direction.bit();
        Some(direction)
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> {
        let set = *self;
        Direction::ALL.into_iter().filter(move |d| set.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::EMPTY;
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

/// Board coordinate. Row 0 and column 0 are the symbol headers, `(1, 1)`
/// is the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 1, col: 1 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }
}

/// What a single board cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCell {
    Empty,
    Symbol(char),
    Score(i64),
}

/// One candidate derivation of a cell: predecessor score plus move weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub predecessor: i64,
    pub weight: i32,
}

impl Contribution {
    pub fn score(&self) -> i64 {
        self.predecessor + i64::from(self.weight)
    }
}

/// The three candidates a cell's score is the maximum of. A candidate is
/// absent when its predecessor is off the scoring area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellContributors {
    pub score: i64,
    pub diagonal: Option<Contribution>,
    pub up: Option<Contribution>,
    pub left: Option<Contribution>,
}

/// The augmented Needleman-Wunsch grid.
///
/// `rows = len(seq1) + 2`, `cols = len(seq2) + 2`. Scores live at rows and
/// columns `>= 1`; row 1 and column 1 hold the cumulative gap borders and
/// `(r, c)` for `r, c >= 2` holds the best score of `seq1[..r-2]` against
/// `seq2[..c-2]`. The header row and column belong to the sequences and
/// score 0 here.
///
/// Scores are `i64`, so summing `len(seq1) + len(seq2)` of the `i32`
/// weights cannot overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringMatrix {
    scores: Vec<i64>,
    directions: Vec<DirectionSet>,
    rows: usize,
    cols: usize,
}

impl ScoringMatrix {
    pub fn build(seq1: &Sequence, seq2: &Sequence, params: &ScoreParams) -> Self {
        let rows = seq1.len() + 2;
        let cols = seq2.len() + 2;
        let mut matrix = Self {
            scores: vec![0; rows * cols],
            directions: vec![DirectionSet::EMPTY; rows * cols],
            rows,
            cols,
        };

        let gap = i64::from(params.gap);

        // Borders: a prefix aligned against nothing is all gaps.
        for col in 2..cols {
            let score = (col - 1) as i64 * gap;
            matrix.set(1, col, score, DirectionSet::single(Direction::Left));
        }
        for row in 2..rows {
            let score = (row - 1) as i64 * gap;
            matrix.set(row, 1, score, DirectionSet::single(Direction::Up));
        }

        for row in 2..rows {
            for col in 2..cols {
                let candidates = [
                    (
                        Direction::Diagonal,
                        matrix.get(row - 1, col - 1)
                            + i64::from(params.substitution(seq1[row - 2], seq2[col - 2])),
                    ),
                    (Direction::Up, matrix.get(row - 1, col) + gap),
                    (Direction::Left, matrix.get(row, col - 1) + gap),
                ];
                let best = candidates
                    .iter()
                    .map(|(_, score)| *score)
                    .max()
                    .unwrap_or_default();
                let tied = candidates
                    .iter()
                    .filter(|(_, score)| *score == best)
                    .map(|(direction, _)| *direction)
                    .collect();
                matrix.set(row, col, best, tied);
            }
        }

        matrix
    }

    fn set(&mut self, row: usize, col: usize, score: i64, directions: DirectionSet) {
        let idx = row * self.cols + col;
        self.scores[idx] = score;
        self.directions[idx] = directions;
    }

    fn get(&self, row: usize, col: usize) -> i64 {
        self.scores[row * self.cols + col]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The bottom-right cell, where every traceback starts.
    pub fn terminal(&self) -> Position {
        Position::new(self.rows - 1, self.cols - 1)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Score at `pos`. Panics if `pos` is off the board.
    pub fn score(&self, pos: Position) -> i64 {
        self.get(pos.row, pos.col)
    }

    /// Moves recorded at `pos`. Border cells carry their single forced move
    /// towards the origin; the origin and the headers carry none.
    pub fn directions(&self, pos: Position) -> DirectionSet {
        self.directions[pos.row * self.cols + pos.col]
    }

    pub fn board_cell(&self, pos: Position, seq1: &Sequence, seq2: &Sequence) -> BoardCell {
        match (pos.row, pos.col) {
            (0, col) if col >= 2 => BoardCell::Symbol(seq2[col - 2]),
            (row, 0) if row >= 2 => BoardCell::Symbol(seq1[row - 2]),
            (0, _) | (_, 0) => BoardCell::Empty,
            _ => BoardCell::Score(self.score(pos)),
        }
    }

    pub fn contributors(
        &self,
        pos: Position,
        seq1: &Sequence,
        seq2: &Sequence,
        params: &ScoreParams,
    ) -> CellContributors {
        let Position { row, col } = pos;
        if row == 0 || col == 0 {
            return CellContributors::default();
        }

        let diagonal = (row > 1 && col > 1).then(|| Contribution {
            predecessor: self.get(row - 1, col - 1),
            weight: params.substitution(seq1[row - 2], seq2[col - 2]),
        });
        let up = (row > 1).then(|| Contribution {
            predecessor: self.get(row - 1, col),
            weight: params.gap,
        });
        let left = (col > 1).then(|| Contribution {
            predecessor: self.get(row, col - 1),
            weight: params.gap,
        });

        CellContributors {
            score: self.get(row, col),
            diagonal,
            up,
            left,
        }
    }
}
