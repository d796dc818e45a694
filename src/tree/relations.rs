//! Structural relations over the tree
//!
//! All queries are pure functions of tree shape. Unknown ids never panic:
//! predicates answer `false`, set-valued queries answer empty.

use super::arena::Tree;
use super::node::NodeId;

/// Labels that close off a binding domain (governing category)
pub const LOCAL_DOMAIN_LABELS: &[&str] = &["TP", "CP"];

/// Labels that open a quantifier restrictor (relative clauses)
pub const RESTRICTOR_LABELS: &[&str] = &["CP", "RelCP"];

/// Labels that end the search for an enclosing restrictor
pub const RESTRICTOR_BARRIER_LABELS: &[&str] = &["TP", "IP"];

impl Tree {
    /// `a` dominates `b` iff `b` is `a` or a descendant of `a`.
    pub fn dominates(&self, a: NodeId, b: NodeId) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        if a == b {
            return true;
        }
        let mut current = self.parent(b);
        while let Some(p) = current {
            if p == a {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// `a` c-commands `b` iff `a`'s parent dominates `b` and `a` does not.
    ///
    /// The root has no parent and c-commands nothing.
    pub fn c_commands(&self, a: NodeId, b: NodeId) -> bool {
        match self.parent(a) {
            Some(parent) => self.dominates(parent, b) && !self.dominates(a, b),
            None => false,
        }
    }

    /// Every node c-commanded by `a`: its siblings and everything below them.
    pub fn c_command_domain(&self, a: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(a) else {
            return Vec::new();
        };
        self.children(parent)
            .iter()
            .filter(|&&sibling| sibling != a)
            .flat_map(|&sibling| self.subtree(sibling))
            .collect()
    }

    /// Nearest TP/CP at or above `a`, or `a` itself when there is none.
    pub fn local_domain(&self, a: NodeId) -> Option<NodeId> {
        self.local_domain_in(a, LOCAL_DOMAIN_LABELS)
    }

    /// [`Tree::local_domain`] with an explicit set of domain labels
    pub fn local_domain_in(&self, a: NodeId, labels: &[impl AsRef<str>]) -> Option<NodeId> {
        let node = self.node(a)?;
        if node.has_label(labels) {
            return Some(a);
        }
        let found = self
            .ancestors(a)
            .into_iter()
            .find(|&id| self.node(id).is_some_and(|n| n.has_label(labels)));
        Some(found.unwrap_or(a))
    }

    /// Whether `a` sits inside a restrictor clause.
    ///
    /// Walks upward from the parent: a CP/RelCP reached before any TP/IP
    /// means yes.
    pub fn is_in_restrictor(&self, a: NodeId) -> bool {
        self.is_in_restrictor_in(a, RESTRICTOR_LABELS, RESTRICTOR_BARRIER_LABELS)
    }

    /// [`Tree::is_in_restrictor`] with explicit restrictor and barrier labels
    pub fn is_in_restrictor_in(
        &self,
        a: NodeId,
        restrictors: &[impl AsRef<str>],
        barriers: &[impl AsRef<str>],
    ) -> bool {
        for id in self.ancestors(a) {
            let Some(node) = self.node(id) else {
                return false;
            };
            if node.has_label(restrictors) {
                return true;
            }
            if node.has_label(barriers) {
                return false;
            }
        }
        false
    }
}
