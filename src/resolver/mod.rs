//! Anaphora Resolver - binding-theoretic candidate search
//!
//! Resolution dispatches on the anaphor class:
//! 1. Reflexive: locally bound (Condition A), reconstructing if needed
//! 2. Pronoun: donkey binders, unblocked quantifiers, non-local
//!    r-expressions and discourse referents
//! 3. R-expression: never bound (Condition C)
//!
//! VP ellipsis is resolved separately against the nearest preceding VP.
//!
//! A [`Resolver`] owns its tree and the discourse state of one session.

mod binding;

use serde::{Deserialize, Serialize};

use crate::config::BonsaiConfig;
use crate::ellipsis::{EllipsisReading, VpContent};
use crate::movement::Trace;
use crate::referent::{AnaphorType, Referent};
use crate::tree::{NodeId, Tree};
use crate::Result;

/// Record of a donkey binding: an existential in a restrictor licensing a
/// pronoun it does not c-command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscourseCondition {
    pub existential: Referent,
    pub pronoun: Referent,
}

/// Resolver for one resolution session.
#[derive(Debug, Clone)]
pub struct Resolver {
    tree: Tree,
    config: BonsaiConfig,
    discourse_referents: Vec<Referent>,
    discourse_conditions: Vec<DiscourseCondition>,
}

impl Resolver {
    /// Create a resolver with the default configuration
    pub fn new(tree: Tree) -> Self {
        Self::with_config(tree, BonsaiConfig::default())
    }

    pub fn with_config(tree: Tree, config: BonsaiConfig) -> Self {
        Self {
            tree,
            config,
            discourse_referents: Vec::new(),
            discourse_conditions: Vec::new(),
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn config(&self) -> &BonsaiConfig {
        &self.config
    }

    pub fn discourse_referents(&self) -> &[Referent] {
        &self.discourse_referents
    }

    pub fn discourse_conditions(&self) -> &[DiscourseCondition] {
        &self.discourse_conditions
    }

    /// Make a referent available cross-sententially
    pub fn add_discourse_referent(&mut self, referent: Referent) {
        tracing::debug!("Adding discourse referent '{}'", referent.name);
        self.discourse_referents.push(referent);
    }

    /// Record movement of a referent from `from` to `to`
    pub fn add_movement(&mut self, referent: &str, from: NodeId, to: NodeId) -> Result<Trace> {
        self.tree.record_movement(referent, from, to)
    }

    /// Candidate antecedents for `anaphor` located at `node`.
    ///
    /// The list is unordered and may contain duplicates. An unknown node
    /// yields no candidates.
    pub fn resolve(
        &mut self,
        anaphor: &Referent,
        node: NodeId,
        allow_reconstruction: bool,
    ) -> Vec<Referent> {
        if !self.tree.contains(node) {
            tracing::debug!("Anaphor node {} is not in the tree", node);
            return Vec::new();
        }
        let anaphor = self.current_state(anaphor);

        let candidates = match anaphor.anaphor_type {
            AnaphorType::Reflexive => self.resolve_reflexive(&anaphor, node, allow_reconstruction),
            AnaphorType::Pronoun => self.resolve_pronoun(&anaphor, node, allow_reconstruction),
            // Condition C: an r-expression is free everywhere
            AnaphorType::RExpression => Vec::new(),
            AnaphorType::Quantifier => Vec::new(),
        };

        tracing::debug!(
            "Resolved {} '{}' at {}: {} candidate(s)",
            anaphor.anaphor_type,
            anaphor.name,
            node,
            candidates.len()
        );
        candidates
    }

    /// Resolve a referent stored in the tree at its own node
    pub fn resolve_by_name(&mut self, name: &str, allow_reconstruction: bool) -> Vec<Referent> {
        let Some(anaphor) = self.tree.referent(name).cloned() else {
            tracing::debug!("No referent named '{}'", name);
            return Vec::new();
        };
        let node = anaphor.node;
        self.resolve(&anaphor, node, allow_reconstruction)
    }

    /// Overlay the movement metadata recorded in the tree onto a caller's copy
    fn current_state(&self, anaphor: &Referent) -> Referent {
        let mut current = anaphor.clone();
        if current.base_position.is_none() {
            if let Some(stored) = self.tree.referent(&anaphor.name) {
                current.base_position = stored.base_position;
                current.trace_of = stored.trace_of;
            }
        }
        current
    }

    /// Resolve the ellipsis site at `node` against the nearest preceding VP.
    ///
    /// A sloppy reading only rewrites content when `new_subject` is given;
    /// otherwise the strict copy is stored and recorded as strict. Re-running
    /// overwrites an earlier resolution.
    pub fn resolve_vp_ellipsis(
        &mut self,
        node: NodeId,
        reading: EllipsisReading,
        new_subject: Option<&str>,
    ) -> Option<VpContent> {
        if !self.tree.node(node)?.is_ellipsis_site() {
            tracing::debug!("Node {} is not an ellipsis site", node);
            return None;
        }

        let Some(antecedent) = self.find_antecedent_vp(node) else {
            tracing::debug!("No antecedent VP precedes ellipsis site {}", node);
            return None;
        };
        let content = self.tree.node(antecedent)?.vp_content.clone()?;

        let (resolved, applied) = match (reading, new_subject) {
            (EllipsisReading::Sloppy, Some(subject)) => (
                self.config.ellipsis.apply_sloppy_identity(&content, subject),
                EllipsisReading::Sloppy,
            ),
            (EllipsisReading::Sloppy, None) => {
                tracing::debug!("Sloppy reading without a new subject at {}, copying strictly", node);
                (content, EllipsisReading::Strict)
            }
            (EllipsisReading::Strict, _) => (content, EllipsisReading::Strict),
        };

        let site = self.tree.node_mut(node)?.ellipsis.as_mut()?;
        site.antecedent = Some(antecedent);
        site.resolved = Some(resolved.clone());
        site.reading = applied;

        tracing::info!(
            "Resolved ellipsis site {} against {} ({} reading)",
            node,
            antecedent,
            applied
        );
        Some(resolved)
    }

    /// Nearest preceding VP carrying content for the ellipsis at `node`
    pub fn find_antecedent_vp(&self, node: NodeId) -> Option<NodeId> {
        self.tree.find_antecedent_vp(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Features, Gender};
    use std::collections::BTreeMap;

    /// "John lost his wallet. Bill did too."
    fn wallet_resolver() -> (Resolver, NodeId, NodeId) {
        let mut tree = Tree::new("ROOT");
        let tp1 = tree.add_child(tree.root(), "TP").unwrap();
        tree.add_child(tp1, "NP").unwrap();
        let vp1 = tree.add_child(tp1, "VP").unwrap();
        let tp2 = tree.add_child(tree.root(), "TP").unwrap();
        tree.add_child(tp2, "NP").unwrap();
        let vp2 = tree.add_child(tp2, "VP").unwrap();

        let arguments = BTreeMap::from([
            ("object".to_string(), "his wallet".to_string()),
            ("possessor".to_string(), "his".to_string()),
        ]);
        tree.set_vp_content(vp1, "lost", arguments, Some("John")).unwrap();
        tree.mark_ellipsis(vp2, "did").unwrap();

        (Resolver::new(tree), vp1, vp2)
    }

    #[test]
    fn test_strict_reading_keeps_antecedent() {
        let (mut resolver, vp1, vp2) = wallet_resolver();
        let strict = resolver
            .resolve_vp_ellipsis(vp2, EllipsisReading::Strict, None)
            .unwrap();

        assert_eq!(strict.subject.as_deref(), Some("John"));
        assert_eq!(strict.arguments["object"], "his wallet");
        assert_eq!(strict.verb, "lost");

        let site = resolver.tree().node(vp2).unwrap().ellipsis.clone().unwrap();
        assert_eq!(site.antecedent, Some(vp1));
        assert_eq!(site.reading, EllipsisReading::Strict);
        assert_eq!(site.resolved, Some(strict));
    }

    #[test]
    fn test_sloppy_reading_rebinds_to_new_subject() {
        let (mut resolver, vp1, vp2) = wallet_resolver();
        let sloppy = resolver
            .resolve_vp_ellipsis(vp2, EllipsisReading::Sloppy, Some("Bill"))
            .unwrap();

        assert_eq!(sloppy.subject.as_deref(), Some("Bill"));
        assert_eq!(sloppy.arguments["object"], "his wallet");
        assert_eq!(sloppy.arguments["possessor"], "his");

        let site = resolver.tree().node(vp2).unwrap().ellipsis.clone().unwrap();
        assert_eq!(site.reading, EllipsisReading::Sloppy);

        // The antecedent itself is untouched
        let antecedent = resolver.tree().node(vp1).unwrap().vp_content.clone().unwrap();
        assert_eq!(antecedent.subject.as_deref(), Some("John"));
    }

    #[test]
    fn test_sloppy_reading_with_other_gender() {
        let (mut resolver, _, vp2) = wallet_resolver();
        let sloppy = resolver
            .resolve_vp_ellipsis(vp2, EllipsisReading::Sloppy, Some("Mary"))
            .unwrap();
        assert_eq!(sloppy.arguments["possessor"], "her");
        // Only whole-value possessives covary
        assert_eq!(sloppy.arguments["object"], "his wallet");
    }

    #[test]
    fn test_sloppy_without_subject_is_recorded_strict() {
        let (mut resolver, _, vp2) = wallet_resolver();
        let content = resolver
            .resolve_vp_ellipsis(vp2, EllipsisReading::Sloppy, None)
            .unwrap();
        assert_eq!(content.subject.as_deref(), Some("John"));

        let site = resolver.tree().node(vp2).unwrap().ellipsis.clone().unwrap();
        assert_eq!(site.reading, EllipsisReading::Strict);
    }

    #[test]
    fn test_re_resolution_overwrites() {
        let (mut resolver, _, vp2) = wallet_resolver();
        resolver.resolve_vp_ellipsis(vp2, EllipsisReading::Sloppy, Some("Mary"));
        resolver.resolve_vp_ellipsis(vp2, EllipsisReading::Strict, None);

        let site = resolver.tree().node(vp2).unwrap().ellipsis.clone().unwrap();
        assert_eq!(site.reading, EllipsisReading::Strict);
        assert_eq!(site.resolved.unwrap().subject.as_deref(), Some("John"));
    }

    #[test]
    fn test_ellipsis_failures() {
        let (mut resolver, vp1, _) = wallet_resolver();
        // Not an ellipsis site
        assert!(resolver.resolve_vp_ellipsis(vp1, EllipsisReading::Strict, None).is_none());
        // Unknown node
        assert!(resolver.resolve_vp_ellipsis(NodeId(40), EllipsisReading::Strict, None).is_none());

        // Ellipsis with nothing before it
        let mut tree = Tree::new("TP");
        let vp = tree.add_child(tree.root(), "VP").unwrap();
        tree.mark_ellipsis(vp, "did").unwrap();
        let mut resolver = Resolver::new(tree);
        assert!(resolver.resolve_vp_ellipsis(vp, EllipsisReading::Strict, None).is_none());
        let site = resolver.tree().node(vp).unwrap().ellipsis.clone().unwrap();
        assert!(!site.is_resolved());
    }

    #[test]
    fn test_configured_possessive_table() {
        let (resolver, _, vp2) = wallet_resolver();
        let mut config = BonsaiConfig::default();
        config.ellipsis.entries.insert("Ann".to_string(), "her".to_string());
        let mut resolver = Resolver::with_config(resolver.tree().clone(), config);

        let content = resolver
            .resolve_vp_ellipsis(vp2, EllipsisReading::Sloppy, Some("Ann"))
            .unwrap();
        assert_eq!(content.arguments["possessor"], "her");
    }

    #[test]
    fn test_resolve_unknown_node_is_empty() {
        let mut resolver = Resolver::new(Tree::new("TP"));
        let he = Referent::new(
            "he",
            Features::third_singular().with_gender(Gender::Masculine),
            AnaphorType::Pronoun,
            NodeId(9),
        );
        resolver.add_discourse_referent(Referent::new(
            "John",
            Features::third_singular(),
            AnaphorType::RExpression,
            NodeId::root(),
        ));
        assert!(resolver.resolve(&he, NodeId(9), true).is_empty());
        assert!(resolver.resolve_by_name("nobody", true).is_empty());
    }
}
