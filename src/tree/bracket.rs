//! Labelled bracket notation
//!
//! Format: `[LABEL#alias word word [CHILD ...] ...]`
//!
//! Examples:
//! - `[TP [NP#john John] [VP#vp lost [NP his wallet]]]`
//! - `[CP [NP#which] [TP [NP#john] [VP [NP#base]]]]`
//!
//! The `#alias` suffix is optional and names a node so that referents,
//! movements and VP content can be attached to it afterwards. Bare words
//! become the node's surface text.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::arena::Tree;
use super::node::NodeId;
use crate::{Error, Result};

static TOKEN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN.get_or_init(|| Regex::new(r"\[|\]|[^\s\[\]]+").expect("static token pattern"))
}

/// A parsed tree plus the aliases declared in the input
#[derive(Debug, Clone)]
pub struct ParsedTree {
    pub tree: Tree,
    pub aliases: BTreeMap<String, NodeId>,
}

impl ParsedTree {
    /// Resolve an alias to its node
    pub fn alias(&self, name: &str) -> Option<NodeId> {
        self.aliases.get(name).copied()
    }
}

fn split_label(token: &str) -> Result<(&str, Option<&str>)> {
    let (label, alias) = match token.split_once('#') {
        Some((label, alias)) => (label, Some(alias)),
        None => (token, None),
    };
    if label.is_empty() {
        return Err(Error::Parse(format!("Missing label in '{}'", token)));
    }
    if alias == Some("") {
        return Err(Error::Parse(format!("Empty alias in '{}'", token)));
    }
    Ok((label, alias))
}

/// Parse labelled bracket notation into a tree.
pub fn parse_bracketed(input: &str) -> Result<ParsedTree> {
    let tokens: Vec<&str> = token_pattern()
        .find_iter(input)
        .map(|m| m.as_str())
        .collect();
    let mut iter = tokens.into_iter();

    if iter.next() != Some("[") {
        return Err(Error::Parse("Tree must start with '['".to_string()));
    }
    let root_token = iter
        .next()
        .filter(|t| *t != "[" && *t != "]")
        .ok_or_else(|| Error::Parse("Root node has no label".to_string()))?;
    let (root_label, root_alias) = split_label(root_token)?;

    let mut tree = Tree::new(root_label);
    let mut aliases = BTreeMap::new();
    let mut words: BTreeMap<NodeId, Vec<&str>> = BTreeMap::new();
    if let Some(alias) = root_alias {
        aliases.insert(alias.to_string(), tree.root());
    }

    let mut stack = vec![tree.root()];
    while let Some(token) = iter.next() {
        let Some(&top) = stack.last() else {
            return Err(Error::Parse(format!("Unexpected '{}' after the root closed", token)));
        };
        match token {
            "[" => {
                let label_token = iter
                    .next()
                    .filter(|t| *t != "[" && *t != "]")
                    .ok_or_else(|| Error::Parse("Node has no label".to_string()))?;
                let (label, alias) = split_label(label_token)?;
                let id = tree.add_child(top, label)?;
                if let Some(alias) = alias {
                    if aliases.insert(alias.to_string(), id).is_some() {
                        return Err(Error::Parse(format!("Duplicate alias '{}'", alias)));
                    }
                }
                stack.push(id);
            }
            "]" => {
                stack.pop();
            }
            word => words.entry(top).or_default().push(word),
        }
    }

    if !stack.is_empty() {
        return Err(Error::Parse(format!("{} unclosed bracket(s)", stack.len())));
    }

    for (id, parts) in words {
        tree.set_text(id, parts.join(" "))?;
    }

    Ok(ParsedTree { tree, aliases })
}

impl Tree {
    /// Render the tree in labelled bracket notation
    pub fn to_bracketed(&self) -> String {
        let mut out = String::new();
        self.write_bracketed(self.root(), &mut out);
        out
    }

    fn write_bracketed(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        out.push('[');
        out.push_str(&node.label);
        if let Some(text) = &node.text {
            out.push(' ');
            out.push_str(text);
        }
        for &child in node.children() {
            out.push(' ');
            self.write_bracketed(child, out);
        }
        out.push(']');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_tree() {
        let parsed = parse_bracketed("[TP [NP#john John] [VP#vp lost [NP his wallet]]]").unwrap();
        let tree = &parsed.tree;

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.label(tree.root()), Some("TP"));

        let john = parsed.alias("john").unwrap();
        let vp = parsed.alias("vp").unwrap();
        assert_eq!(tree.node(john).unwrap().text.as_deref(), Some("John"));
        assert_eq!(tree.node(vp).unwrap().text.as_deref(), Some("lost"));
        assert_eq!(tree.parent(vp), Some(tree.root()));
        assert_eq!(tree.children(vp).len(), 1);
    }

    #[test]
    fn test_ids_follow_document_order() {
        let parsed = parse_bracketed("[ROOT [TP#a [VP#b]] [TP#c [VP#d]]]").unwrap();
        let ids: Vec<NodeId> = ["a", "b", "c", "d"]
            .iter()
            .map(|a| parsed.alias(a).unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_roundtrip_shape() {
        let input = "[TP [NP John] [VP saw [NP Mary]]]";
        let parsed = parse_bracketed(input).unwrap();
        assert_eq!(parsed.tree.to_bracketed(), input);
    }

    #[test]
    fn test_root_alias() {
        let parsed = parse_bracketed("[CP#top [TP]]").unwrap();
        assert_eq!(parsed.alias("top"), Some(parsed.tree.root()));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(parse_bracketed("TP"), Err(Error::Parse(_))));
        assert!(matches!(parse_bracketed("[TP [NP]"), Err(Error::Parse(_))));
        assert!(matches!(parse_bracketed("[TP] [VP]"), Err(Error::Parse(_))));
        assert!(matches!(parse_bracketed("[TP [[NP]]]"), Err(Error::Parse(_))));
        assert!(matches!(parse_bracketed("[#x]"), Err(Error::Parse(_))));
        assert!(matches!(parse_bracketed("[TP [NP#a] [NP#a]]"), Err(Error::Parse(_))));
    }
}
