use std::collections::BTreeSet;
use std::fmt::Write;
use crate::bnf::*;
use crate::error::{GrammarError, ParseError};
use crate::grammar::Grammar;
use self::sets::{FirstSets, FollowSets};
use self::state::{ParserState, Token};
use self::table::ParseTable;

mod state;
mod token_set;
mod sets;
mod table;

/// An LL(1) parser for one grammar. FIRST and FOLLOW sets and the parse
/// table are computed once by `new`; `parse` only reads them, so a single
/// `Parser` can serve any number of parses, also from several threads.
pub struct Parser {
  bnf: Bnf,
  first: FirstSets,
  follow: FollowSets,
  table: ParseTable,
}

impl Parser {
  pub fn new(grammar: Grammar) -> Result<Self, GrammarError> {
    grammar.validate()?;

    let bnf = Bnf::from(&grammar);
    let first = sets::gen_first(&bnf);
    let follow = sets::gen_follow(&bnf, &first);
    let table = ParseTable::build(&bnf, &first, &follow);

    Ok(Parser {
      bnf,
      first,
      follow,
      table,
    })
  }

  /// Parses a sequence of terminal tokens. The end marker is appended
  /// implicitly and must not be part of `tokens`.
  pub fn parse<I, S>(&self, tokens: I) -> Result<(), ParseError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let tokens = tokens.into_iter().collect::<Vec<_>>();
    let input = tokens.iter()
      .map(|t| {
        let name: &str = t.as_ref();
        Token {
          id: self.bnf.term_id(name),
          name,
        }
      })
      .collect();

    ParserState::new(&self.bnf, &self.table, input).run()
  }

  /// FIRST(`symbol`), with the ε marker for nullable non-terminals. Any
  /// name that is not a non-terminal is a terminal and is its own FIRST
  /// set.
  pub fn first<'a>(&'a self, symbol: &'a str) -> BTreeSet<&'a str> {
    let nt = match self.bnf.nonterm_id(symbol) {
      Some(nt) => nt,
      None => return std::iter::once(symbol).collect(),
    };

    let mut set = self.first.first[nt.0 as usize].iter()
      .map(|t| self.bnf.term_name(t))
      .collect::<BTreeSet<_>>();
    if self.first.is_nullable(Symbol::Nonterm(nt)) {
      set.insert(self.bnf.markers.epsilon.as_str());
    }
    set
  }

  /// FOLLOW(`nonterm`), or `None` if it is not a non-terminal.
  pub fn follow(&self, nonterm: &str) -> Option<BTreeSet<&str>> {
    let nt = self.bnf.nonterm_id(nonterm)?;
    Some(self.follow.follow[nt.0 as usize].iter()
      .map(|t| self.bnf.term_name(t))
      .collect())
  }

  /// The production chosen for `nonterm` on `lookahead`, as its symbol
  /// names. The ε-production is an empty list.
  pub fn table_entry(
    &self,
    nonterm: &str,
    lookahead: &str,
  ) -> Option<Vec<&str>> {
    let nt = self.bnf.nonterm_id(nonterm)?;
    let term = self.bnf.term_id(lookahead)?;
    let prod_ix = self.table.get(nt, term)?;
    let prod = &self.bnf.nonterm(nt).prods[prod_ix as usize];
    Some(prod.symbols.iter().map(|&sym| self.bnf.symbol_name(sym)).collect())
  }

  /// The table as text, one `A, t => rhs` line per entry. Rows follow the
  /// grammar's order, entries within a row the order in which terminals
  /// first appear in the grammar (the end marker first).
  pub fn table_string(&self) -> String {
    let mut out = String::new();
    for nt in self.bnf.nonterm_ids() {
      let prods = &self.bnf.nonterm(nt).prods;
      for (term, prod_ix) in self.table.row(nt) {
        let _ = writeln!(out, "{}, {} => {}",
          self.bnf.nonterm_name(nt),
          self.bnf.term_name(term),
          self.bnf.rhs_string(&prods[prod_ix as usize]));
      }
    }
    out
  }
}
