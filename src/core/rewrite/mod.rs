//! Rewrite engine: ordered regex substitutions over a document's text.
//!
//! A `RuleSet` is applied rule by rule against the evolving content, so a
//! later rule sees (and may match) what an earlier rule produced. The
//! result reports how many substitutions each rule made and whether the
//! document changed at all.

mod engine;
mod rules;

pub use engine::{rewrite, Rewrite};
pub use rules::{builtin_rules, Rule, RuleSet, RuleSpec};
