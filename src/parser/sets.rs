use log::debug;
use crate::bnf::*;
use super::token_set::TokenSet;

/// FIRST sets of all non-terminals. ε membership is kept apart from the
/// terminal bits as the `nullable` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FirstSets {
  pub(crate) first: Vec<TokenSet>,
  pub(crate) nullable: Vec<bool>,
}

/// FOLLOW sets of all non-terminals. The end marker is `END`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FollowSets {
  pub(crate) follow: Vec<TokenSet>,
}

impl FirstSets {
  pub(crate) fn is_nullable(&self, sym: Symbol) -> bool {
    match sym {
      Symbol::Term(_) => false,
      Symbol::Nonterm(id) => self.nullable[id.0 as usize],
    }
  }

  /// Adds FIRST(`symbols`) \ {ε} to `result`, followed by `lookaheads` if
  /// the whole sequence is nullable. Returns whether the sequence is
  /// nullable.
  pub(crate) fn first_of_symbols(
    &self,
    result: &mut TokenSet,
    symbols: &[Symbol],
    lookaheads: Option<&TokenSet>,
  ) -> bool {
    for &sym in symbols {
      match sym {
        Symbol::Term(id) => {
          result.insert(id);
          return false;
        }
        Symbol::Nonterm(id) => {
          result.union_with(&self.first[id.0 as usize]);
          if !self.nullable[id.0 as usize] {
            return false;
          }
        }
      }
    }

    if let Some(lookaheads) = lookaheads {
      result.union_with(lookaheads);
    }
    true
  }
}

/// Iterates to a fixed point, so left recursion and visit order cannot
/// leave a set incomplete.
pub(crate) fn gen_first(
  bnf: &Bnf,
) -> FirstSets {
  let mut buf = TokenSet::new(bnf.num_terms());
  let mut sets = FirstSets {
    first: vec![buf.clone(); bnf.nonterms.len()],
    nullable: vec![false; bnf.nonterms.len()],
  };

  let mut passes = 0;
  loop {
    passes += 1;
    let mut changed = false;
    for nt in bnf.nonterm_ids() {
      let ix = nt.0 as usize;
      for prod in &bnf.nonterm(nt).prods {
        buf.clear();
        let nullable = sets.first_of_symbols(&mut buf, &prod.symbols, None);
        changed |= sets.first[ix].union_with(&buf);
        if nullable && !sets.nullable[ix] {
          sets.nullable[ix] = true;
          changed = true;
        }
      }
    }
    if !changed {
      break;
    }
  }

  debug!("FIRST sets stable after {} passes", passes);
  sets
}

pub(crate) fn gen_follow(
  bnf: &Bnf,
  first: &FirstSets,
) -> FollowSets {
  let mut buf = TokenSet::new(bnf.num_terms());
  let mut follow = vec![buf.clone(); bnf.nonterms.len()];
  follow[bnf.start.0 as usize].insert(END);

  let mut passes = 0;
  loop {
    passes += 1;
    let mut changed = false;
    for nt in bnf.nonterm_ids() {
      for prod in &bnf.nonterm(nt).prods {
        for (i, &sym) in prod.symbols.iter().enumerate().rev() {
          let target = match sym {
            Symbol::Nonterm(id) => id.0 as usize,
            Symbol::Term(_) => continue,
          };

          let lhs_follow = follow[nt.0 as usize].clone();
          buf.clear();
          first.first_of_symbols(
            &mut buf, &prod.symbols[i + 1..], Some(&lhs_follow));
          changed |= follow[target].union_with(&buf);
        }
      }
    }
    if !changed {
      break;
    }
  }

  debug!("FOLLOW sets stable after {} passes", passes);
  FollowSets {
    follow,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::grammar;
  use pretty_assertions::assert_eq;

  fn names(bnf: &Bnf, set: &TokenSet) -> Vec<String> {
    set.iter().map(|t| bnf.term_name(t).to_owned()).collect()
  }

  fn simple() -> Bnf {
    Bnf::from(&grammar("Z", &[
      ("Z", &[&["d"], &["X", "Y", "Z"]]),
      ("Y", &[&["ε"], &["c"]]),
      ("X", &[&["Y"], &["a"]]),
    ]))
  }

  #[test]
  fn simple_nullable() {
    let first = gen_first(&simple());
    assert_eq!(first.nullable, vec![false, true, true]);
  }

  #[test]
  fn simple_first() {
    let bnf = simple();
    let first = gen_first(&bnf);

    assert_eq!(names(&bnf, &first.first[0]), vec!["d", "c", "a"]);
    assert_eq!(names(&bnf, &first.first[1]), vec!["c"]);
    assert_eq!(names(&bnf, &first.first[2]), vec!["c", "a"]);
  }

  #[test]
  fn simple_follow() {
    let bnf = simple();
    let first = gen_first(&bnf);
    let follow = gen_follow(&bnf, &first);

    assert_eq!(names(&bnf, &follow.follow[0]), vec!["$"]);
    assert_eq!(names(&bnf, &follow.follow[1]), vec!["d", "c", "a"]);
    assert_eq!(names(&bnf, &follow.follow[2]), vec!["d", "c", "a"]);
  }

  #[test]
  fn left_recursion() {
    // A is reached through B before its own productions are scanned
    let bnf = Bnf::from(&grammar("S", &[
      ("S", &[&["B"]]),
      ("B", &[&["A", "x"]]),
      ("A", &[&["B", "y"], &["A", "z"], &["w"], &["ε"]]),
    ]));
    let first = gen_first(&bnf);

    assert_eq!(names(&bnf, &first.first[0]), vec!["x", "z", "w"]);
    assert_eq!(names(&bnf, &first.first[2]), vec!["x", "z", "w"]);
    assert_eq!(first.nullable, vec![false, false, true]);
  }

  #[test]
  fn nullable_suffix_reaches_lhs_follow() {
    let bnf = Bnf::from(&grammar("S", &[
      ("S", &[&["A", "B", "C"], &["d"]]),
      ("A", &[&["a"]]),
      ("B", &[&["b"], &["ε"]]),
      ("C", &[&["c"], &["ε"]]),
    ]));
    let first = gen_first(&bnf);
    let follow = gen_follow(&bnf, &first);

    assert_eq!(names(&bnf, &follow.follow[1]), vec!["$", "b", "c"]);
    assert_eq!(names(&bnf, &follow.follow[2]), vec!["$", "c"]);
    assert_eq!(names(&bnf, &follow.follow[3]), vec!["$"]);
  }
}
