//! Movement and reconstruction
//!
//! Recording a movement leaves a [`Trace`] at the base (pre-movement)
//! position and stamps the moved referent with its base and surface nodes.
//! Reconstruction then evaluates binding at the base position instead of the
//! surface one.

use serde::{Deserialize, Serialize};

use crate::referent::Referent;
use crate::tree::{NodeId, Tree};
use crate::{Error, Result};

/// Evidence that an element was displaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Index of the trace among the traces at its node
    pub id: u32,
    /// The moved referent as it was after the movement was recorded
    pub moved: Referent,
    /// Pre-movement position
    pub base: NodeId,
    /// Post-movement position
    pub surface: NodeId,
}

impl Tree {
    /// Record that `referent` moved from `from` to `to`.
    ///
    /// The trace is stored at `from`; the referent stored in the tree gets
    /// `base_position = from` and `trace_of = to`.
    pub fn record_movement(&mut self, referent: &str, from: NodeId, to: NodeId) -> Result<Trace> {
        for id in [from, to] {
            if !self.contains(id) {
                return Err(Error::NodeNotFound(id));
            }
        }

        let moved = self
            .referent_mut(referent)
            .ok_or_else(|| Error::ReferentNotFound(referent.to_string()))?;
        moved.base_position = Some(from);
        moved.trace_of = Some(to);
        let moved = moved.clone();

        let trace = Trace {
            id: self.node(from).map(|n| n.traces().len() as u32).unwrap_or_default(),
            moved,
            base: from,
            surface: to,
        };
        self.add_trace(from, trace.clone())?;

        tracing::debug!(
            "Recorded movement of '{}' from {} to {} (trace {})",
            referent,
            from,
            to,
            trace.id
        );
        Ok(trace)
    }

    /// Find the base position at which `referent` should be reconstructed.
    ///
    /// Traces anchored at `node` itself are consulted first; their base must
    /// lie inside `node`'s subtree. Otherwise the trace list at the referent's
    /// recorded base position is used. `None` when the referent never moved
    /// or no matching trace exists.
    pub fn reconstruction_site(&self, node: NodeId, referent: &Referent) -> Option<NodeId> {
        let base_position = referent.base_position?;

        let local = self.node(node)?;
        if let Some(trace) = local.traces().iter().find(|t| t.moved.name == referent.name) {
            return self.find_in_subtree(node, trace.base);
        }

        self.node(base_position)?
            .traces()
            .iter()
            .find(|t| t.moved.name == referent.name)
            .map(|t| t.base)
            .filter(|&base| self.contains(base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Features, Gender};
    use crate::referent::AnaphorType;

    /// [CP [NP#which] [TP [NP#john] [VP [NP#base]]]]
    fn wh_tree() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new("CP");
        let which = tree.add_child(tree.root(), "NP").unwrap();
        let tp = tree.add_child(tree.root(), "TP").unwrap();
        tree.add_child(tp, "NP").unwrap();
        let vp = tree.add_child(tp, "VP").unwrap();
        let base = tree.add_child(vp, "NP").unwrap();

        let himself = Referent::new(
            "himself",
            Features::third_singular().with_gender(Gender::Masculine),
            AnaphorType::Reflexive,
            which,
        );
        tree.add_referent(which, himself).unwrap();
        (tree, which, base)
    }

    #[test]
    fn test_record_movement_stamps_referent() {
        let (mut tree, which, base) = wh_tree();
        let trace = tree.record_movement("himself", base, which).unwrap();

        assert_eq!(trace.id, 0);
        assert_eq!(trace.base, base);
        assert_eq!(trace.surface, which);
        assert_eq!(trace.moved.base_position, Some(base));

        let himself = tree.referent("himself").unwrap();
        assert_eq!(himself.base_position, Some(base));
        assert_eq!(himself.trace_of, Some(which));
        assert_eq!(tree.node(base).unwrap().traces().len(), 1);
    }

    #[test]
    fn test_trace_ids_count_per_node() {
        let (mut tree, which, base) = wh_tree();
        tree.record_movement("himself", base, which).unwrap();
        let second = tree.record_movement("himself", base, which).unwrap();
        assert_eq!(second.id, 1);
        // Traces accumulate and are never dropped by later movements
        assert_eq!(tree.node(base).unwrap().traces().len(), 2);
        assert_eq!(tree.reconstruction_site(which, tree.referent("himself").unwrap()), Some(base));
    }

    #[test]
    fn test_record_movement_unknown_inputs() {
        let (mut tree, which, base) = wh_tree();
        assert!(matches!(
            tree.record_movement("nobody", base, which),
            Err(Error::ReferentNotFound(_))
        ));
        assert!(matches!(
            tree.record_movement("himself", NodeId(50), which),
            Err(Error::NodeNotFound(NodeId(50)))
        ));
    }

    #[test]
    fn test_reconstruction_site() {
        let (mut tree, which, base) = wh_tree();
        let before = tree.referent("himself").unwrap().clone();
        assert_eq!(tree.reconstruction_site(which, &before), None);

        tree.record_movement("himself", base, which).unwrap();
        let after = tree.referent("himself").unwrap().clone();
        assert_eq!(tree.reconstruction_site(which, &after), Some(base));
    }

    #[test]
    fn test_reconstruction_from_trace_at_node() {
        let mut tree = Tree::new("TP");
        let vp = tree.add_child(tree.root(), "VP").unwrap();
        let gap = tree.add_child(vp, "NP").unwrap();
        let elsewhere = tree.add_child(tree.root(), "NP").unwrap();

        let mut moved = Referent::new("what", Features::third_singular(), AnaphorType::RExpression, elsewhere);
        moved.base_position = Some(gap);
        let trace = Trace { id: 0, moved: moved.clone(), base: gap, surface: elsewhere };
        tree.add_trace(vp, trace.clone()).unwrap();

        assert_eq!(tree.reconstruction_site(vp, &moved), Some(gap));

        // A trace whose base lies outside the node's subtree is not followed
        tree.add_trace(elsewhere, trace).unwrap();
        assert_eq!(tree.reconstruction_site(elsewhere, &moved), None);
    }
}
