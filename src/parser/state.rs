use log::trace;
use crate::bnf::*;
use crate::error::ParseError;
use super::table::ParseTable;

/// One input token: its id if the grammar knows it as a terminal.
pub(super) struct Token<'a> {
  pub(super) id: Option<TermId>,
  pub(super) name: &'a str,
}

/// Stack machine of a single parse. Created per call and dropped with it.
pub(super) struct ParserState<'a> {
  bnf: &'a Bnf,
  table: &'a ParseTable,
  /// top is the last element
  stack: Vec<Symbol>,
  /// ends with the end marker
  input: Vec<Token<'a>>,
  cursor: usize,
}

impl<'a> ParserState<'a> {
  pub(super) fn new(
    bnf: &'a Bnf,
    table: &'a ParseTable,
    mut input: Vec<Token<'a>>,
  ) -> Self {
    input.push(Token {
      id: Some(END),
      name: bnf.term_name(END),
    });

    ParserState {
      bnf,
      table,
      stack: vec![Symbol::Nonterm(bnf.start)],
      input,
      cursor: 0,
    }
  }

  pub(super) fn run(mut self) -> Result<(), ParseError> {
    while let Some(top) = self.stack.pop() {
      let current = &self.input[self.cursor];
      trace!("{:?} <- {} at {}", top, current.name, self.cursor);

      match top {
        Symbol::Term(expected) => {
          if current.id != Some(expected) {
            return Err(ParseError::UnexpectedSymbol {
              found: current.name.to_owned(),
              expected: self.bnf.term_name(expected).to_owned(),
              position: self.cursor,
            });
          }
          self.cursor += 1;
        }
        Symbol::Nonterm(nt) => {
          let prod_ix = current.id
            .and_then(|term| self.table.get(nt, term))
            .ok_or_else(|| ParseError::NoRule {
              nonterm: self.bnf.nonterm_name(nt).to_owned(),
              lookahead: current.name.to_owned(),
              position: self.cursor,
            })?;
          let prod = &self.bnf.nonterm(nt).prods[prod_ix as usize];
          self.stack.extend(prod.symbols.iter().rev());
        }
      }
    }

    let end = self.input.len() - 1;
    if self.cursor != end {
      return Err(ParseError::IncompleteParse {
        next: self.input[self.cursor].name.to_owned(),
        position: self.cursor,
      });
    }
    Ok(())
  }
}
