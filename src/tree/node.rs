//! Tree node data

use crate::ellipsis::{VpContent, VpEllipsis};
use crate::movement::Trace;
use crate::referent::Referent;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node.
///
/// Ids are arena indices, assigned in construction order and stable for the
/// lifetime of the tree. Lower ids were built earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root is always the first node built
    pub fn root() -> Self {
        Self(0)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One constituent in the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Constituent category (TP, VP, CP, RelCP, ...)
    pub label: String,
    /// Surface words attached directly to this constituent
    pub text: Option<String>,
    /// Referents introduced directly at this node, in insertion order
    pub(crate) referents: Vec<Referent>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    /// Antecedent material when this node is a VP
    pub vp_content: Option<VpContent>,
    /// Present iff this node is an ellipsis site
    pub ellipsis: Option<VpEllipsis>,
    pub(crate) traces: Vec<Trace>,
}

impl Node {
    pub(crate) fn new(id: NodeId, label: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            id,
            label: label.into(),
            text: None,
            referents: Vec::new(),
            children: Vec::new(),
            parent,
            vp_content: None,
            ellipsis: None,
            traces: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn referents(&self) -> &[Referent] {
        &self.referents
    }

    /// Look up a referent introduced at this node
    pub fn referent(&self, name: &str) -> Option<&Referent> {
        self.referents.iter().find(|r| r.name == name)
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_ellipsis_site(&self) -> bool {
        self.ellipsis.is_some()
    }

    pub fn has_label(&self, labels: &[impl AsRef<str>]) -> bool {
        labels.iter().any(|l| l.as_ref() == self.label)
    }

    /// Insert a referent, replacing any existing one with the same name
    pub(crate) fn insert_referent(&mut self, referent: Referent) {
        match self.referents.iter_mut().find(|r| r.name == referent.name) {
            Some(existing) => *existing = referent,
            None => self.referents.push(referent),
        }
    }
}
