//! VP ellipsis - elided predicates and their antecedents
//!
//! An ellipsis site ("Bill did too") borrows the content of the nearest
//! preceding VP. Under a strict reading the borrowed content is copied as is;
//! under a sloppy reading possessive pronouns covary with the new subject.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tree::{NodeId, Tree};
use crate::{Error, Result};

/// Possessive pronoun forms that sloppy identity rewrites
pub const POSSESSIVE_FORMS: &[&str] = &["his", "her", "their", "its"];

/// Possessive used when a subject is not in the table
pub const DEFAULT_POSSESSIVE: &str = "their";

/// How the elided predicate's pronouns are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EllipsisReading {
    /// Keep the antecedent's referents
    #[default]
    Strict,
    /// Rebind possessives to the new subject
    Sloppy,
}

impl EllipsisReading {
    pub fn as_str(&self) -> &'static str {
        match self {
            EllipsisReading::Strict => "strict",
            EllipsisReading::Sloppy => "sloppy",
        }
    }
}

impl FromStr for EllipsisReading {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(EllipsisReading::Strict),
            "sloppy" => Ok(EllipsisReading::Sloppy),
            _ => Err(Error::InvalidFeature(format!("Unknown ellipsis reading: {}", s))),
        }
    }
}

impl std::fmt::Display for EllipsisReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content of a VP usable as ellipsis antecedent material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpContent {
    pub verb: String,
    /// Argument role -> surface form (e.g. "object" -> "his wallet")
    pub arguments: BTreeMap<String, String>,
    pub subject: Option<String>,
    /// Node the content was recorded at
    pub node: NodeId,
}

/// Lifecycle of an ellipsis site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EllipsisState {
    Unresolved,
    Resolved(EllipsisReading),
}

/// Metadata for an elided predicate site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpEllipsis {
    pub id: u32,
    pub node: NodeId,
    /// Auxiliary licensing the ellipsis ("did", "will", ...)
    pub auxiliary: String,
    pub antecedent: Option<NodeId>,
    pub resolved: Option<VpContent>,
    pub reading: EllipsisReading,
}

impl VpEllipsis {
    pub fn new(id: u32, node: NodeId, auxiliary: impl Into<String>) -> Self {
        Self {
            id,
            node,
            auxiliary: auxiliary.into(),
            antecedent: None,
            resolved: None,
            reading: EllipsisReading::Strict,
        }
    }

    pub fn state(&self) -> EllipsisState {
        match self.resolved {
            Some(_) => EllipsisState::Resolved(self.reading),
            None => EllipsisState::Unresolved,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Subject -> possessive pronoun lookup used by sloppy identity.
///
/// This is a narrow heuristic: unknown subjects get the default form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossessiveTable {
    #[serde(default = "default_possessive")]
    pub default: String,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

fn default_possessive() -> String {
    DEFAULT_POSSESSIVE.to_string()
}

impl Default for PossessiveTable {
    fn default() -> Self {
        let entries = [
            ("John", "his"),
            ("Mary", "her"),
            ("Bill", "his"),
            ("he", "his"),
            ("she", "her"),
            ("they", "their"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            default: default_possessive(),
            entries,
        }
    }
}

impl PossessiveTable {
    pub fn possessive_for(&self, subject: &str) -> &str {
        self.entries
            .get(subject)
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    /// Rewrite `content` for a sloppy reading with `new_subject`.
    ///
    /// Only an argument whose whole value is a possessive form is replaced by
    /// the subject's possessive; every other value is copied unchanged. The
    /// subject field becomes `new_subject`.
    pub fn apply_sloppy_identity(&self, content: &VpContent, new_subject: &str) -> VpContent {
        let possessive = self.possessive_for(new_subject);
        let mut modified = content.clone();

        for value in modified.arguments.values_mut() {
            if POSSESSIVE_FORMS.contains(&value.as_str()) {
                *value = possessive.to_string();
            }
        }

        modified.subject = Some(new_subject.to_string());
        modified
    }
}

impl Tree {
    /// Nearest VP with content that precedes `ellipsis_node`.
    ///
    /// Candidates are VP nodes carrying content that are not themselves
    /// ellipsis sites; precedence is approximated by node id.
    pub fn find_antecedent_vp(&self, ellipsis_node: NodeId) -> Option<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| id < ellipsis_node)
            .filter(|&id| {
                self.node(id).is_some_and(|n| {
                    n.label == "VP" && n.vp_content.is_some() && !n.is_ellipsis_site()
                })
            })
            .max()
    }
}
