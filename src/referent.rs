//! Referents - typed descriptors for referring expressions
//!
//! Every anaphor and every potential antecedent in a tree is a [`Referent`].
//! The anaphor class decides which binding condition applies:
//! - `Reflexive`: Condition A (locally bound)
//! - `Pronoun`: Condition B (locally free), plus quantifier and donkey binding
//! - `RExpression`: Condition C (free everywhere)
//! - `Quantifier`: binds pronouns under c-command without intervention

use crate::features::Features;
use crate::tree::NodeId;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Anaphor class of a referent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnaphorType {
    /// himself, herself, themselves
    Reflexive,
    /// he, she, it, they
    Pronoun,
    /// Names and definite descriptions
    #[serde(rename = "r_expr")]
    RExpression,
    /// every farmer, a donkey, no student
    Quantifier,
}

impl AnaphorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnaphorType::Reflexive => "reflexive",
            AnaphorType::Pronoun => "pronoun",
            AnaphorType::RExpression => "r_expr",
            AnaphorType::Quantifier => "quantifier",
        }
    }

    pub fn all() -> &'static [AnaphorType] {
        &[
            AnaphorType::Reflexive,
            AnaphorType::Pronoun,
            AnaphorType::RExpression,
            AnaphorType::Quantifier,
        ]
    }

    /// Whether referents of this class can serve as antecedents
    pub fn is_binder(&self) -> bool {
        matches!(self, AnaphorType::RExpression | AnaphorType::Quantifier)
    }
}

impl FromStr for AnaphorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reflexive" | "refl" | "anaphor" => Ok(AnaphorType::Reflexive),
            "pronoun" | "pron" => Ok(AnaphorType::Pronoun),
            "r_expr" | "r-expr" | "rexpr" | "r_expression" | "name" => {
                Ok(AnaphorType::RExpression)
            }
            "quantifier" | "quant" | "qp" => Ok(AnaphorType::Quantifier),
            _ => Err(Error::InvalidFeature(format!("Unknown anaphor type: {}", s))),
        }
    }
}

impl std::fmt::Display for AnaphorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Quantificational force of a quantifier referent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantifierType {
    /// every, all, each
    Universal,
    /// some, a
    Existential,
    /// no, none
    Negative,
}

impl QuantifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuantifierType::Universal => "universal",
            QuantifierType::Existential => "existential",
            QuantifierType::Negative => "negative",
        }
    }

    pub fn all() -> &'static [QuantifierType] {
        &[
            QuantifierType::Universal,
            QuantifierType::Existential,
            QuantifierType::Negative,
        ]
    }
}

impl FromStr for QuantifierType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "universal" | "every" | "all" | "each" => Ok(QuantifierType::Universal),
            "existential" | "some" | "a" => Ok(QuantifierType::Existential),
            "negative" | "no" | "none" => Ok(QuantifierType::Negative),
            _ => Err(Error::InvalidFeature(format!("Unknown quantifier type: {}", s))),
        }
    }
}

impl std::fmt::Display for QuantifierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A referring expression attached to the node that introduces it.
///
/// The name is the discourse key and is expected to be unique per tree.
/// `base_position` and `trace_of` are only filled in by movement recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referent {
    pub name: String,
    pub features: Features,
    pub anaphor_type: AnaphorType,
    /// Node that directly introduces this referent
    pub node: NodeId,
    pub quantifier: Option<QuantifierType>,
    /// Head noun of the restricting clause (e.g. "farmer")
    pub restrictor: Option<String>,
    /// Surface position this referent moved to
    pub trace_of: Option<NodeId>,
    /// Pre-movement merge position
    pub base_position: Option<NodeId>,
}

impl Referent {
    pub fn new(
        name: impl Into<String>,
        features: Features,
        anaphor_type: AnaphorType,
        node: NodeId,
    ) -> Self {
        Self {
            name: name.into(),
            features,
            anaphor_type,
            node,
            quantifier: None,
            restrictor: None,
            trace_of: None,
            base_position: None,
        }
    }

    /// Set the quantifier subclass and optional restrictor head
    pub fn with_quantifier(mut self, kind: QuantifierType, restrictor: Option<&str>) -> Self {
        self.quantifier = Some(kind);
        self.restrictor = restrictor.map(str::to_string);
        self
    }

    pub fn is_binder(&self) -> bool {
        self.anaphor_type.is_binder()
    }

    pub fn is_existential(&self) -> bool {
        self.anaphor_type == AnaphorType::Quantifier
            && self.quantifier == Some(QuantifierType::Existential)
    }

    pub fn has_moved(&self) -> bool {
        self.base_position.is_some()
    }

    /// Short description for display
    pub fn short_description(&self) -> String {
        match self.quantifier {
            Some(q) => format!("{} {} ({}, {})", self.anaphor_type, self.name, q, self.features),
            None => format!("{} {} ({})", self.anaphor_type, self.name, self.features),
        }
    }
}

/// Remove duplicate candidates by name, keeping the first occurrence.
pub fn dedup_candidates(candidates: Vec<Referent>) -> Vec<Referent> {
    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|r| seen.insert(r.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anaphor_type_roundtrip() {
        for kind in AnaphorType::all() {
            let parsed: AnaphorType = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
        for kind in QuantifierType::all() {
            let parsed: QuantifierType = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_anaphor_type_serde_names() {
        let json = serde_json::to_string(&AnaphorType::RExpression).unwrap();
        assert_eq!(json, "\"r_expr\"");
        let parsed: AnaphorType = serde_json::from_str("\"reflexive\"").unwrap();
        assert_eq!(parsed, AnaphorType::Reflexive);
    }

    #[test]
    fn test_binder_classes() {
        assert!(AnaphorType::RExpression.is_binder());
        assert!(AnaphorType::Quantifier.is_binder());
        assert!(!AnaphorType::Pronoun.is_binder());
        assert!(!AnaphorType::Reflexive.is_binder());
    }

    #[test]
    fn test_quantifier_builder() {
        let donkey = Referent::new(
            "a donkey",
            Features::third_singular(),
            AnaphorType::Quantifier,
            NodeId(3),
        )
        .with_quantifier(QuantifierType::Existential, Some("donkey"));

        assert!(donkey.is_existential());
        assert_eq!(donkey.restrictor.as_deref(), Some("donkey"));
        assert!(!donkey.has_moved());
    }

    #[test]
    fn test_dedup_candidates_keeps_first() {
        let a = Referent::new("a", Features::third_singular(), AnaphorType::RExpression, NodeId(1));
        let b = Referent::new("b", Features::third_singular(), AnaphorType::RExpression, NodeId(2));
        let deduped = dedup_candidates(vec![a.clone(), b.clone(), a.clone()]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name, "a");
        assert_eq!(deduped[1].name, "b");
    }
}
