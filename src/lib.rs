pub mod grammar;
pub mod parser;
pub mod error;
mod bnf;

pub use parser::Parser;
pub use grammar::{grammar, Grammar, Markers};
pub use error::{GrammarError, ParseError};

pub fn build(grammar: Grammar) -> Result<Parser, GrammarError> {
  Parser::new(grammar)
}
