//! Scenario files - a tree plus everything attached to it
//!
//! A scenario names nodes through the `#alias` suffixes of its bracketed
//! tree and attaches referents, movements, VP content and ellipsis sites to
//! those aliases. Files are JSON or TOML, chosen by extension.
//!
//! ```toml
//! tree = "[TP [NP#john John] [VP#vp [NP#obj himself]]]"
//!
//! [[referents]]
//! name = "John"
//! node = "john"
//! type = "r_expr"
//! gender = "masc"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::BonsaiConfig;
use crate::features::Features;
use crate::referent::{AnaphorType, Referent};
use crate::resolver::Resolver;
use crate::tree::{parse_bracketed, NodeId};
use crate::{Error, Result};

fn default_person() -> u8 {
    3
}

fn default_number() -> String {
    "sg".to_string()
}

fn default_auxiliary() -> String {
    "did".to_string()
}

/// A referent as written in a scenario file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferentEntry {
    pub name: String,
    /// Node alias; discourse referents may omit it and sit at the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(rename = "type")]
    pub anaphor_type: String,
    #[serde(default = "default_person")]
    pub person: u8,
    #[serde(default = "default_number")]
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animacy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEntry {
    pub referent: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpEntry {
    pub node: String,
    pub verb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EllipsisEntry {
    pub node: String,
    #[serde(default = "default_auxiliary")]
    pub auxiliary: String,
}

/// Declarative description of one resolution session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Labelled bracket notation, see [`crate::tree::bracket`]
    pub tree: String,
    #[serde(default)]
    pub referents: Vec<ReferentEntry>,
    #[serde(default)]
    pub movements: Vec<MovementEntry>,
    #[serde(default)]
    pub discourse: Vec<ReferentEntry>,
    #[serde(default)]
    pub vp: Vec<VpEntry>,
    #[serde(default)]
    pub ellipsis: Vec<EllipsisEntry>,
}

/// A built scenario: the resolver and the alias table of its tree
#[derive(Debug, Clone)]
pub struct Session {
    pub resolver: Resolver,
    pub aliases: BTreeMap<String, NodeId>,
}

impl Session {
    /// Look up a node alias
    pub fn node(&self, alias: &str) -> Result<NodeId> {
        lookup(&self.aliases, alias)
    }

    /// Alias of `id`, if it has one
    pub fn alias_of(&self, id: NodeId) -> Option<&str> {
        self.aliases
            .iter()
            .find(|&(_, &node)| node == id)
            .map(|(alias, _)| alias.as_str())
    }
}

fn lookup(aliases: &BTreeMap<String, NodeId>, alias: &str) -> Result<NodeId> {
    aliases
        .get(alias)
        .copied()
        .ok_or_else(|| Error::Scenario(format!("Unknown node alias '{}'", alias)))
}

impl ReferentEntry {
    fn features(&self) -> Result<Features> {
        let mut features = Features::new(self.person, self.number.parse()?);
        if let Some(gender) = &self.gender {
            features = features.with_gender(gender.parse()?);
        }
        if let Some(animacy) = &self.animacy {
            features = features.with_animacy(animacy.parse()?);
        }
        Ok(features)
    }

    fn to_referent(&self, node: NodeId) -> Result<Referent> {
        let anaphor_type: AnaphorType = self.anaphor_type.parse()?;
        let mut referent = Referent::new(&self.name, self.features()?, anaphor_type, node);
        if let Some(kind) = &self.quantifier {
            referent = referent.with_quantifier(kind.parse()?, self.restrictor.as_deref());
        }
        Ok(referent)
    }
}

impl Scenario {
    /// Load a scenario, reading TOML for `.toml` files and JSON otherwise
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let scenario = if is_toml {
            toml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        tracing::debug!("Loaded scenario from {}", path.display());
        Ok(scenario)
    }

    /// Build the tree and register everything the scenario declares.
    ///
    /// Referents, VP content and ellipsis sites are attached before
    /// movements are recorded, so a movement may name any referent.
    pub fn build(&self, config: BonsaiConfig) -> Result<Session> {
        let parsed = parse_bracketed(&self.tree)?;
        let aliases = parsed.aliases;
        let mut tree = parsed.tree;

        for entry in &self.referents {
            let alias = entry.node.as_deref().ok_or_else(|| {
                Error::Scenario(format!("Referent '{}' has no node", entry.name))
            })?;
            let node = lookup(&aliases, alias)?;
            tree.add_referent(node, entry.to_referent(node)?)?;
        }

        for entry in &self.vp {
            let node = lookup(&aliases, &entry.node)?;
            tree.set_vp_content(node, &entry.verb, entry.arguments.clone(), entry.subject.as_deref())?;
        }

        for entry in &self.ellipsis {
            let node = lookup(&aliases, &entry.node)?;
            tree.mark_ellipsis(node, &entry.auxiliary)?;
        }

        let mut resolver = Resolver::with_config(tree, config);

        for entry in &self.movements {
            let from = lookup(&aliases, &entry.from)?;
            let to = lookup(&aliases, &entry.to)?;
            resolver.add_movement(&entry.referent, from, to)?;
        }

        for entry in &self.discourse {
            let node = match entry.node.as_deref() {
                Some(alias) => lookup(&aliases, alias)?,
                None => resolver.tree().root(),
            };
            resolver.add_discourse_referent(entry.to_referent(node)?);
        }

        tracing::info!(
            "Built scenario: {} nodes, {} referents, {} movements",
            resolver.tree().len(),
            self.referents.len(),
            self.movements.len()
        );
        Ok(Session { resolver, aliases })
    }
}
