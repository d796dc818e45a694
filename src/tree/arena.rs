//! Node arena and tree construction
//!
//! The tree tracks:
//! - Node hierarchy (parent/child relationships)
//! - Referents introduced at each node
//! - VP content, ellipsis sites and traces anchored at nodes

use std::collections::{BTreeMap, HashMap};

use super::node::{Node, NodeId};
use crate::ellipsis::{VpContent, VpEllipsis};
use crate::movement::Trace;
use crate::referent::Referent;
use crate::{Error, Result};

/// Arena-backed constituent tree.
///
/// Construction goes through [`Tree::new`] and [`Tree::add_child`], which keep
/// the parent/child links consistent and make cycles impossible.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    next_ellipsis_id: u32,
}

impl Tree {
    /// Create a tree with a single root node
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(NodeId::root(), root_label, None)],
            next_ellipsis_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::root()
    }

    /// Append a new child under `parent`
    pub fn add_child(&mut self, parent: NodeId, label: impl Into<String>) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, label, Some(parent)));
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(Error::NodeNotFound(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.label.as_str())
    }

    /// Set the surface words of a node
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.require_mut(id)?.text = Some(text.into());
        Ok(())
    }

    /// Proper ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            chain.push(p);
            current = self.parent(p);
        }
        chain
    }

    /// All nodes in document (pre-)order
    pub fn preorder(&self) -> Vec<NodeId> {
        self.subtree(self.root())
    }

    /// A node and everything below it, in pre-order
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Find a node by identity within the subtree rooted at `within`
    pub fn find_in_subtree(&self, within: NodeId, target: NodeId) -> Option<NodeId> {
        self.subtree(within).into_iter().find(|&id| id == target)
    }

    /// Attach a referent to the node that introduces it.
    ///
    /// The referent's owning node is overwritten with `node`.
    pub fn add_referent(&mut self, node: NodeId, mut referent: Referent) -> Result<()> {
        referent.node = node;
        self.require_mut(node)?.insert_referent(referent);
        Ok(())
    }

    /// Every referent in the tree, in document order.
    ///
    /// Names are discourse keys: if two nodes introduce the same name the
    /// later one wins but keeps the position of the first.
    pub fn all_referents(&self) -> Vec<&Referent> {
        let mut out: Vec<&Referent> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for id in self.preorder() {
            for referent in self.nodes[id.index()].referents.iter() {
                match index.get(referent.name.as_str()) {
                    Some(&slot) => out[slot] = referent,
                    None => {
                        index.insert(referent.name.as_str(), out.len());
                        out.push(referent);
                    }
                }
            }
        }
        out
    }

    /// Look up a referent anywhere in the tree by name
    pub fn referent(&self, name: &str) -> Option<&Referent> {
        self.all_referents().into_iter().find(|r| r.name == name)
    }

    pub(crate) fn referent_mut(&mut self, name: &str) -> Option<&mut Referent> {
        let owner = self
            .preorder()
            .into_iter()
            .rev()
            .find(|id| self.nodes[id.index()].referent(name).is_some())?;
        self.nodes[owner.index()]
            .referents
            .iter_mut()
            .find(|r| r.name == name)
    }

    /// Store VP content (antecedent material for ellipsis) on a node
    pub fn set_vp_content(
        &mut self,
        node: NodeId,
        verb: impl Into<String>,
        arguments: BTreeMap<String, String>,
        subject: Option<&str>,
    ) -> Result<()> {
        let content = VpContent {
            verb: verb.into(),
            arguments,
            subject: subject.map(str::to_string),
            node,
        };
        self.require_mut(node)?.vp_content = Some(content);
        Ok(())
    }

    /// Flag a node as an ellipsis site licensed by `auxiliary`.
    ///
    /// Returns the ellipsis id assigned to the site.
    pub fn mark_ellipsis(&mut self, node: NodeId, auxiliary: impl Into<String>) -> Result<u32> {
        let id = self.next_ellipsis_id;
        self.require_mut(node)?.ellipsis = Some(VpEllipsis::new(id, node, auxiliary));
        self.next_ellipsis_id += 1;
        Ok(id)
    }

    pub fn add_trace(&mut self, node: NodeId, trace: Trace) -> Result<()> {
        self.require_mut(node)?.traces.push(trace);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Features;
    use crate::referent::AnaphorType;

    fn name(s: &str, node: NodeId) -> Referent {
        Referent::new(s, Features::third_singular(), AnaphorType::RExpression, node)
    }

    #[test]
    fn test_tree_hierarchy() {
        let mut tree = Tree::new("TP");
        let np = tree.add_child(tree.root(), "NP").unwrap();
        let vp = tree.add_child(tree.root(), "VP").unwrap();
        let obj = tree.add_child(vp, "NP").unwrap();

        assert_eq!(tree.parent(obj), Some(vp));
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.children(tree.root()), &[np, vp]);
        assert_eq!(tree.ancestors(obj), vec![vp, tree.root()]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut tree = Tree::new("ROOT");
        let a = tree.add_child(tree.root(), "TP").unwrap();
        let b = tree.add_child(a, "NP").unwrap();
        let c = tree.add_child(tree.root(), "TP").unwrap();
        assert!(tree.root() < a && a < b && b < c);
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let mut tree = Tree::new("TP");
        let result = tree.add_child(NodeId(42), "NP");
        assert!(matches!(result, Err(Error::NodeNotFound(NodeId(42)))));
    }

    #[test]
    fn test_preorder() {
        let mut tree = Tree::new("TP");
        let np = tree.add_child(tree.root(), "NP").unwrap();
        let vp = tree.add_child(tree.root(), "VP").unwrap();
        let det = tree.add_child(np, "D").unwrap();
        let obj = tree.add_child(vp, "NP").unwrap();

        assert_eq!(tree.preorder(), vec![tree.root(), np, det, vp, obj]);
        assert_eq!(tree.find_in_subtree(vp, det), None);
        assert_eq!(tree.find_in_subtree(np, det), Some(det));
    }

    #[test]
    fn test_stale_ids_yield_nothing() {
        let tree = Tree::new("TP");
        let stale = NodeId(7);
        assert!(tree.node(stale).is_none());
        assert!(tree.children(stale).is_empty());
        assert!(tree.ancestors(stale).is_empty());
        assert!(tree.subtree(stale).is_empty());
    }

    #[test]
    fn test_referents_attach_to_node() {
        let mut tree = Tree::new("TP");
        let np = tree.add_child(tree.root(), "NP").unwrap();
        tree.add_referent(np, name("John", NodeId(99))).unwrap();

        let john = tree.referent("John").unwrap();
        assert_eq!(john.node, np);
        assert_eq!(tree.node(np).unwrap().referents().len(), 1);
        assert!(tree.referent("Mary").is_none());
    }

    #[test]
    fn test_all_referents_later_duplicate_wins() {
        let mut tree = Tree::new("TP");
        let a = tree.add_child(tree.root(), "NP").unwrap();
        let b = tree.add_child(tree.root(), "NP").unwrap();
        tree.add_referent(a, name("x", a)).unwrap();
        tree.add_referent(a, name("y", a)).unwrap();
        tree.add_referent(b, name("x", b)).unwrap();

        let all = tree.all_referents();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "x");
        assert_eq!(all[0].node, b);
        assert_eq!(all[1].name, "y");
    }

    #[test]
    fn test_ellipsis_ids_are_sequential() {
        let mut tree = Tree::new("ROOT");
        let vp1 = tree.add_child(tree.root(), "VP").unwrap();
        let vp2 = tree.add_child(tree.root(), "VP").unwrap();
        assert_eq!(tree.mark_ellipsis(vp1, "did").unwrap(), 1);
        assert_eq!(tree.mark_ellipsis(vp2, "will").unwrap(), 2);
        assert!(tree.node(vp2).unwrap().is_ellipsis_site());
    }
}
