use thiserror::Error;

/// Raised while validating a grammar definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
  #[error("start symbol `{0}` is not a non-terminal")]
  UnknownStart(String),

  #[error("reserved symbol `{0}` cannot be a non-terminal")]
  ReservedNonterm(String),

  #[error("end marker `{marker}` used in a production of `{nonterm}`")]
  ReservedInProduction {
    nonterm: String,
    marker: String,
  },
}

/// The first failure of a parse. Positions are token indices; the end marker
/// sits at the index equal to the number of input tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  #[error("unexpected symbol `{found}` at {position}, expected `{expected}`")]
  UnexpectedSymbol {
    found: String,
    expected: String,
    position: usize,
  },

  #[error("no rule for `{nonterm}` with lookahead `{lookahead}` at {position}")]
  NoRule {
    nonterm: String,
    lookahead: String,
    position: usize,
  },

  #[error("input not fully parsed: `{next}` left at {position}")]
  IncompleteParse {
    next: String,
    position: usize,
  },
}
