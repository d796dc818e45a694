pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    candidate, dim, error, header, info, muted, no_candidates, section, status, success, tree_line,
    warn,
};
pub use table::{candidate_table, node_table, relation_table, CandidateRow, NodeRow, RelationRow};
pub use theme::{theme, Theme};
