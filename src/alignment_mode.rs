/// How many optimal alignments a traceback produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracebackMode {
    /// Every tie-optimal alignment.
    #[default]
    Exhaustive,
    /// One optimal alignment, taking the first move of each tie set in
    /// Diagonal, Up, Left order.
    Representative,
}

// Parsed by the `--mode` command-line flag
impl std::str::FromStr for TracebackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exhaustive" | "all" => Ok(TracebackMode::Exhaustive),
            "representative" | "one" => Ok(TracebackMode::Representative),
            other => Err(format!("unknown traceback mode: {other}")),
        }
    }
}
