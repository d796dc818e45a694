use tabled::{settings::Style, Table, Tabled};

use crate::referent::Referent;
use crate::tree::Tree;

#[derive(Tabled)]
pub struct CandidateRow {
    #[tabled(rename = "Antecedent")]
    pub name: String,
    #[tabled(rename = "Class")]
    pub class: String,
    #[tabled(rename = "Node")]
    pub node: String,
    #[tabled(rename = "Features")]
    pub features: String,
}

impl From<&Referent> for CandidateRow {
    fn from(referent: &Referent) -> Self {
        Self {
            name: referent.name.clone(),
            class: match referent.quantifier {
                Some(q) => format!("{} ({})", referent.anaphor_type, q),
                None => referent.anaphor_type.to_string(),
            },
            node: referent.node.to_string(),
            features: referent.features.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct RelationRow {
    #[tabled(rename = "Relation")]
    pub relation: String,
    #[tabled(rename = "Holds")]
    pub holds: String,
}

#[derive(Tabled)]
pub struct NodeRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Parent")]
    pub parent: String,
    #[tabled(rename = "Referents")]
    pub referents: String,
}

fn render<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn candidate_table(candidates: &[Referent]) -> String {
    let rows: Vec<CandidateRow> = candidates.iter().map(CandidateRow::from).collect();
    render(&rows)
}

pub fn relation_table(relations: &[(&str, bool)]) -> String {
    let rows: Vec<RelationRow> = relations
        .iter()
        .map(|(relation, holds)| RelationRow {
            relation: relation.to_string(),
            holds: if *holds { "yes" } else { "no" }.to_string(),
        })
        .collect();
    render(&rows)
}

pub fn node_table(tree: &Tree) -> String {
    let rows: Vec<NodeRow> = tree
        .preorder()
        .into_iter()
        .filter_map(|id| tree.node(id).map(|node| (id, node)))
        .map(|(id, node)| NodeRow {
            id: id.to_string(),
            label: node.label.clone(),
            parent: node.parent().map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            referents: node
                .referents()
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();
    render(&rows)
}
