//! Binding conditions A and B, quantifier binding and donkey anaphora

use super::{DiscourseCondition, Resolver};
use crate::referent::{AnaphorType, Referent};
use crate::tree::NodeId;

impl Resolver {
    fn local_domain(&self, node: NodeId) -> Option<NodeId> {
        self.tree
            .local_domain_in(node, &self.config.binding.local_domain_labels[..])
    }

    fn is_in_restrictor(&self, node: NodeId) -> bool {
        let binding = &self.config.binding;
        self.tree.is_in_restrictor_in(
            node,
            &binding.restrictor_labels[..],
            &binding.restrictor_barrier_labels[..],
        )
    }

    /// Condition A: surface position first, base position when that fails.
    pub(super) fn resolve_reflexive(
        &self,
        anaphor: &Referent,
        node: NodeId,
        allow_reconstruction: bool,
    ) -> Vec<Referent> {
        let mut candidates = self.find_reflexive_antecedents(anaphor, node);

        if candidates.is_empty() && allow_reconstruction {
            if let Some(site) = self.tree.reconstruction_site(node, anaphor) {
                tracing::debug!("Reconstructing '{}' at {}", anaphor.name, site);
                candidates.extend(self.find_reflexive_antecedents(anaphor, site));
            }
        }

        candidates
    }

    /// Binders for a reflexive at `node` inside its local domain.
    ///
    /// Walks up from the parent while the local domain still dominates the
    /// current node, collecting agreeing r-expressions and quantifiers from
    /// each c-command domain. Every qualifying level contributes.
    pub fn find_reflexive_antecedents(&self, anaphor: &Referent, node: NodeId) -> Vec<Referent> {
        let Some(local) = self.local_domain(node) else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        let mut current = self.tree.parent(node);
        while let Some(level) = current {
            if !self.tree.dominates(local, level) {
                break;
            }
            for other in self.tree.c_command_domain(level) {
                if self.tree.dominates(other, node) {
                    continue;
                }
                let Some(owner) = self.tree.node(other) else {
                    continue;
                };
                for referent in owner.referents() {
                    if referent.is_binder()
                        && referent.features.matches(&anaphor.features)
                        && self.tree.c_commands(referent.node, node)
                    {
                        tracing::trace!("'{}' binds '{}' at {}", referent.name, anaphor.name, node);
                        candidates.push(referent.clone());
                    }
                }
            }
            current = self.tree.parent(level);
        }

        candidates
    }

    /// Condition B plus quantifier, donkey and discourse binding.
    pub(super) fn resolve_pronoun(
        &mut self,
        anaphor: &Referent,
        node: NodeId,
        allow_reconstruction: bool,
    ) -> Vec<Referent> {
        let local = self.local_domain(node);
        let is_local = |tree: &crate::tree::Tree, n: NodeId| {
            local.is_some_and(|l| tree.dominates(l, n))
        };

        let mut candidates = self.resolve_donkey_anaphora(anaphor);

        for referent in self.tree.all_referents() {
            if !referent.is_binder() || !referent.features.matches(&anaphor.features) {
                continue;
            }
            if !self.tree.contains(referent.node) {
                continue;
            }

            match referent.anaphor_type {
                AnaphorType::Quantifier => {
                    if self.can_bind_quantifier(referent.node, node) {
                        candidates.push(referent.clone());
                    }
                }
                AnaphorType::RExpression => {
                    if self.tree.c_commands(referent.node, node) {
                        if is_local(&self.tree, referent.node) {
                            tracing::trace!("'{}' is too local to bind '{}'", referent.name, anaphor.name);
                            continue;
                        }
                        candidates.push(referent.clone());
                    } else if allow_reconstruction {
                        let Some(base) = self.tree.reconstruction_site(referent.node, referent) else {
                            continue;
                        };
                        if self.tree.c_commands(base, node) && !is_local(&self.tree, base) {
                            tracing::debug!("'{}' binds '{}' from its base {}", referent.name, anaphor.name, base);
                            candidates.push(referent.clone());
                        }
                    }
                }
                AnaphorType::Reflexive | AnaphorType::Pronoun => {}
            }
        }

        candidates.extend(
            self.discourse_referents
                .iter()
                .filter(|r| r.features.matches(&anaphor.features))
                .cloned(),
        );

        candidates
    }

    /// Existentials inside a restrictor bind agreeing pronouns without
    /// c-command. Each such binding is logged as a discourse condition.
    fn resolve_donkey_anaphora(&mut self, anaphor: &Referent) -> Vec<Referent> {
        let binders: Vec<Referent> = self
            .tree
            .all_referents()
            .into_iter()
            .filter(|r| r.is_existential())
            .filter(|r| self.tree.contains(r.node) && self.is_in_restrictor(r.node))
            .filter(|r| r.features.matches(&anaphor.features))
            .cloned()
            .collect();

        for existential in &binders {
            tracing::debug!("Donkey binding: '{}' binds '{}'", existential.name, anaphor.name);
            self.discourse_conditions.push(DiscourseCondition {
                existential: existential.clone(),
                pronoun: anaphor.clone(),
            });
        }

        binders
    }

    /// A quantifier at `quantifier` can bind a pronoun at `pronoun` iff it
    /// c-commands it and no other quantifier sits on the pronoun's ancestor
    /// path before the binder is reached.
    pub fn can_bind_quantifier(&self, quantifier: NodeId, pronoun: NodeId) -> bool {
        if !self.tree.c_commands(quantifier, pronoun) {
            return false;
        }

        let mut current = self.tree.parent(pronoun);
        while let Some(level) = current {
            if level == quantifier {
                break;
            }
            let intervener = self.tree.node(level).and_then(|n| {
                n.referents()
                    .iter()
                    .find(|r| r.anaphor_type == AnaphorType::Quantifier && r.node != quantifier)
            });
            if let Some(intervener) = intervener {
                tracing::trace!("Quantifier '{}' intervenes at {}", intervener.name, level);
                return false;
            }
            current = self.tree.parent(level);
        }

        true
    }
}
