use clap::Parser;

use nw_aligner::{AlignerConfig, BoardCell, NeedlemanWunsch, TracebackMode};

#[derive(Parser, Debug)]
#[command(name = "nw_aligner")]
#[command(about = "Needleman-Wunsch global alignment listing every optimal alignment", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// First sequence (board rows)
    seq1: String,

    /// Second sequence (board columns)
    seq2: String,

    /// Match reward
    #[arg(value_name = "MATCH")]
    match_score: String,

    /// Mismatch penalty
    mismatch: String,

    /// Gap penalty
    gap: String,

    /// Traceback mode: exhaustive (all) or representative (one)
    #[arg(short, long, default_value = "exhaustive")]
    mode: TracebackMode,

    /// Gap marker in aligned output
    #[arg(long, default_value_t = nw_aligner::DEFAULT_GAP_SYMBOL)]
    gap_symbol: char,

    /// Do not print the scoring board
    #[arg(long)]
    no_board: bool,
}

impl Cli {
    fn config(&self) -> AlignerConfig {
        AlignerConfig::new()
            .with_traceback_mode(self.mode)
            .with_gap_symbol(self.gap_symbol)
    }
}

fn render_board(engine: &NeedlemanWunsch) -> String {
    let (rows, cols) = engine.dimensions();
    let mut out = String::new();
    for row in 0..rows {
        let line: Vec<String> = (0..cols)
            .map(|col| match engine.board_cell(row, col) {
                Ok(BoardCell::Symbol(c)) => format!("{c:>4}"),
                Ok(BoardCell::Score(score)) => format!("{score:>4}"),
                Ok(BoardCell::Empty) | Err(_) => format!("{:>4}", ""),
            })
            .collect();
        out.push_str(line.join("").trim_end());
        out.push('\n');
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let engine = NeedlemanWunsch::from_text(
        &cli.seq1,
        &cli.seq2,
        &cli.match_score,
        &cli.mismatch,
        &cli.gap,
        cli.config(),
    )?;

    if !cli.no_board {
        print!("{}", render_board(&engine));
        println!();
    }

    let optimal = engine.optimal_alignments();
    println!(
        "Optimal alignment(s) with score: {} ({} found)",
        optimal.score(),
        optimal.len()
    );
    for pair in optimal.alignments() {
        println!();
        println!("{pair}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli() {
        let cli =
            Cli::try_parse_from(["nw_aligner", "--mode", "one", "GAT", "GT", "1", "-1", "-2"])
                .unwrap();
        assert_eq!(
            (cli.seq1.as_str(), cli.seq2.as_str()),
            ("GAT", "GT")
        );
        assert_eq!(
            (cli.match_score.as_str(), cli.mismatch.as_str(), cli.gap.as_str()),
            ("1", "-1", "-2")
        );
        assert!(!cli.no_board);
        assert_eq!(cli.config().traceback_mode(), TracebackMode::Representative);
        assert_eq!(cli.config().gap_symbol(), '-');
    }

    #[test]
    fn test_parse_cli_defaults_and_flags() {
        let cli = Cli::try_parse_from([
            "nw_aligner",
            "--gap-symbol",
            ".",
            "--no-board",
            "A",
            "B",
            "1",
            "1",
            "1",
        ])
        .unwrap();
        assert!(cli.no_board);
        assert_eq!(cli.config().traceback_mode(), TracebackMode::Exhaustive);
        assert_eq!(cli.config().gap_symbol(), '.');
    }

    #[test]
    fn test_parse_cli_errors() {
        assert!(Cli::try_parse_from(["nw_aligner", "GAT", "GT", "1"]).is_err());
        assert!(
            Cli::try_parse_from(["nw_aligner", "--gap-symbol", "ab", "A", "B", "1", "1", "1"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from(["nw_aligner", "--mode", "local", "A", "B", "1", "1", "1"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["nw_aligner", "--bogus", "A", "B", "1", "1", "1"]).is_err());
    }

    #[test]
    fn test_render_board() {
        let engine = NeedlemanWunsch::from_text("A", "A", "1", "1", "1", AlignerConfig::new()).unwrap();
        let board = render_board(&engine);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "           A");
        assert_eq!(lines[1], "       0  -1");
        assert_eq!(lines[2], "   A  -1   1");
    }
}
