use indexmap::IndexSet;
use crate::grammar::*;

/// Grammar with every symbol tagged as terminal or non-terminal.
pub(crate) struct Bnf {
  /// terminal names, indexed by `TermId`; id 0 is the end marker
  pub(crate) terms: IndexSet<String>,
  pub(crate) nonterms: Vec<Nonterm>,
  pub(crate) start: NontermId,
  pub(crate) markers: Markers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Symbol {
  Term(TermId),
  Nonterm(NontermId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TermId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NontermId(pub(crate) u32);

pub(crate) const END: TermId = TermId(0);

#[derive(Debug, Clone, Default)]
pub(crate) struct Nonterm {
  pub(crate) name: String,
  pub(crate) prods: Vec<Production>,
}

/// An empty symbol list is the ε-production.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Production {
  pub(crate) symbols: Vec<Symbol>,
}

impl From<&Grammar> for Bnf {
  fn from(grammar: &Grammar) -> Bnf {
    let markers = grammar.markers.clone();

    let mut terms = IndexSet::new();
    terms.insert(markers.end.clone());

    let nonterm_id = |name: &str| {
      grammar.rules.get_index_of(name).map(|i| NontermId(i as u32))
    };

    let nonterms = grammar.rules.iter()
      .map(|(name, prods)| Nonterm {
        name: name.clone(),
        prods: prods.iter()
          .map(|prod| Production {
            symbols: prod.iter()
              .filter(|&sym| *sym != markers.epsilon)
              .map(|sym| match nonterm_id(sym) {
                Some(id) => Symbol::Nonterm(id),
                None => {
                  let (i, _) = terms.insert_full(sym.clone());
                  Symbol::Term(TermId(i as u32))
                }
              })
              .collect(),
          })
          .collect(),
      })
      .collect();

    let start = nonterm_id(&grammar.start).unwrap_or(NontermId(0));

    Bnf {
      terms,
      nonterms,
      start,
      markers,
    }
  }
}

impl Bnf {
  pub(crate) fn num_terms(&self) -> usize {
    self.terms.len()
  }

  pub(crate) fn term_id(&self, name: &str) -> Option<TermId> {
    self.terms.get_index_of(name).map(|i| TermId(i as u32))
  }

  pub(crate) fn nonterm_id(&self, name: &str) -> Option<NontermId> {
    self.nonterms.iter()
      .position(|nt| nt.name == name)
      .map(|i| NontermId(i as u32))
  }

  pub(crate) fn term_name(&self, id: TermId) -> &str {
    &self.terms[id.0 as usize]
  }

  pub(crate) fn nonterm_name(&self, id: NontermId) -> &str {
    &self.nonterms[id.0 as usize].name
  }

  pub(crate) fn nonterm(&self, id: NontermId) -> &Nonterm {
    &self.nonterms[id.0 as usize]
  }

  pub(crate) fn nonterm_ids(&self) -> impl Iterator<Item = NontermId> {
    (0..self.nonterms.len() as u32).map(NontermId)
  }

  pub(crate) fn symbol_name(&self, sym: Symbol) -> &str {
    match sym {
      Symbol::Term(id) => self.term_name(id),
      Symbol::Nonterm(id) => self.nonterm_name(id),
    }
  }

  /// Right-hand side as text, the ε marker for the empty production.
  pub(crate) fn rhs_string(&self, prod: &Production) -> String {
    if prod.symbols.is_empty() {
      return self.markers.epsilon.clone();
    }
    prod.symbols.iter()
      .map(|&sym| self.symbol_name(sym))
      .collect::<Vec<_>>()
      .join(" ")
  }
}
