use indexmap::IndexMap;
use log::debug;
use crate::bnf::*;
use super::sets::{FirstSets, FollowSets};
use super::token_set::TokenSet;

/// LL(1) table: one sparse row per non-terminal, lookahead -> production
/// index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseTable {
  rows: Vec<IndexMap<TermId, u32>>,
}

impl ParseTable {
  /// Later productions overwrite earlier entries for the same lookahead;
  /// conflicts are not reported.
  pub(crate) fn build(
    bnf: &Bnf,
    first: &FirstSets,
    follow: &FollowSets,
  ) -> Self {
    let mut buf = TokenSet::new(bnf.num_terms());
    let mut rows = vec![IndexMap::new(); bnf.nonterms.len()];

    for nt in bnf.nonterm_ids() {
      let row = &mut rows[nt.0 as usize];
      for (prod_ix, prod) in bnf.nonterm(nt).prods.iter().enumerate() {
        buf.clear();
        let nullable = first.first_of_symbols(
          &mut buf, &prod.symbols, Some(&follow.follow[nt.0 as usize]));
        if nullable && !prod.symbols.is_empty() {
          debug!("{} -> {} derives ε", bnf.nonterm_name(nt),
            bnf.rhs_string(prod));
        }
        for term in buf.iter() {
          row.insert(term, prod_ix as u32);
        }
      }
    }

    let table = ParseTable {
      rows,
    };
    debug!("parse table built with {} entries", table.len());
    table
  }

  pub(crate) fn get(&self, nonterm: NontermId, term: TermId) -> Option<u32> {
    self.rows[nonterm.0 as usize].get(&term).copied()
  }

  pub(crate) fn len(&self) -> usize {
    self.rows.iter().map(IndexMap::len).sum()
  }

  /// Entries of one row, in terminal order.
  pub(crate) fn row(&self, nonterm: NontermId) -> Vec<(TermId, u32)> {
    let mut entries = self.rows[nonterm.0 as usize].iter()
      .map(|(&term, &prod_ix)| (term, prod_ix))
      .collect::<Vec<_>>();
    entries.sort_unstable();
    entries
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::grammar;
  use crate::parser::sets::{gen_first, gen_follow};
  use pretty_assertions::assert_eq;

  fn table_for(bnf: &Bnf) -> ParseTable {
    let first = gen_first(bnf);
    let follow = gen_follow(bnf, &first);
    ParseTable::build(bnf, &first, &follow)
  }

  #[test]
  fn last_write_wins() {
    let bnf = Bnf::from(&grammar("S", &[
      ("S", &[&["a", "b"], &["a", "c"], &["d"]]),
    ]));
    let table = table_for(&bnf);
    let a = bnf.term_id("a").unwrap();
    let d = bnf.term_id("d").unwrap();

    assert_eq!(table.get(bnf.start, a), Some(1));
    assert_eq!(table.get(bnf.start, d), Some(2));
    assert_eq!(table.get(bnf.start, END), None);
    assert_eq!(table.len(), 2);
  }

  #[test]
  fn epsilon_production_uses_follow() {
    let bnf = Bnf::from(&grammar("S", &[
      ("S", &[&["A", "x"]]),
      ("A", &[&["a"], &["ε"]]),
    ]));
    let table = table_for(&bnf);
    let a_nt = bnf.nonterm_id("A").unwrap();
    let x = bnf.term_id("x").unwrap();
    let a = bnf.term_id("a").unwrap();

    assert_eq!(table.row(a_nt), vec![(x, 1), (a, 0)]);
  }

  #[test]
  fn nullable_lead_symbol() {
    let bnf = Bnf::from(&grammar("S", &[
      ("S", &[&["B", "c"]]),
      ("B", &[&["b"], &["ε"]]),
    ]));
    let table = table_for(&bnf);
    let c = bnf.term_id("c").unwrap();
    let b = bnf.term_id("b").unwrap();

    assert_eq!(table.row(bnf.start), vec![(c, 0), (b, 0)]);
  }

  #[test]
  fn rebuild_is_identical() {
    let g = grammar("E", &[
      ("E", &[&["T", "E'"]]),
      ("E'", &[&["+", "T", "E'"], &["ε"]]),
      ("T", &[&["id"], &["(", "E", ")"]]),
    ]);
    let a = Bnf::from(&g);
    let b = Bnf::from(&g);

    assert_eq!(table_for(&a), table_for(&b));
  }
}
