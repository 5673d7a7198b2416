use indexmap::IndexMap;
use crate::error::GrammarError;

/// A grammar definition by symbol names. Every rule key is a non-terminal,
/// every other name in a production is a terminal.
#[derive(Debug, Clone)]
pub struct Grammar {
  pub(crate) start: String,
  pub(crate) rules: IndexMap<String, Vec<Vec<String>>>,
  pub(crate) markers: Markers,
}

/// Names of the reserved symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
  /// Marks the empty production.
  pub epsilon: String,
  /// Appended to every input.
  pub end: String,
}

impl Default for Markers {
  fn default() -> Self {
    Markers {
      epsilon: "ε".to_owned(),
      end: "$".to_owned(),
    }
  }
}

impl Grammar {
  pub fn new(
    start: impl Into<String>,
    rules: IndexMap<String, Vec<Vec<String>>>,
  ) -> Self {
    Grammar {
      start: start.into(),
      rules,
      markers: Markers::default(),
    }
  }

  pub fn with_markers(mut self, markers: Markers) -> Self {
    self.markers = markers;
    self
  }

  pub fn start(&self) -> &str {
    &self.start
  }

  pub fn markers(&self) -> &Markers {
    &self.markers
  }

  /// Non-terminals with their productions, in definition order.
  pub fn rules(&self) -> impl Iterator<Item = (&str, &[Vec<String>])> {
    self.rules.iter().map(|(name, prods)| (name.as_str(), prods.as_slice()))
  }

  pub fn is_nonterm(&self, name: &str) -> bool {
    self.rules.contains_key(name)
  }

  pub(crate) fn validate(&self) -> Result<(), GrammarError> {
    for name in [&self.markers.epsilon, &self.markers.end] {
      if self.rules.contains_key(name.as_str()) {
        return Err(GrammarError::ReservedNonterm(name.clone()));
      }
    }

    if !self.rules.contains_key(&self.start) {
      return Err(GrammarError::UnknownStart(self.start.clone()));
    }

    for (name, prods) in &self.rules {
      if prods.iter().flatten().any(|sym| *sym == self.markers.end) {
        return Err(GrammarError::ReservedInProduction {
          nonterm: name.clone(),
          marker: self.markers.end.clone(),
        });
      }
    }

    Ok(())
  }
}

/// Builds a grammar from string slices. A key given more than once gets the
/// productions of all its entries, in order.
pub fn grammar(
  start: &str,
  rules: &[(&str, &[&[&str]])],
) -> Grammar {
  let mut map: IndexMap<String, Vec<Vec<String>>> = IndexMap::new();
  for &(name, prods) in rules {
    map.entry(name.to_owned())
      .or_default()
      .extend(prods.iter()
        .map(|prod| prod.iter().map(|&s| s.to_owned()).collect()));
  }
  Grammar::new(start, map)
}
