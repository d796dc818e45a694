//! # Bonsai - Binding-Theoretic Anaphora Resolution
//!
//! Finds candidate antecedents for reflexives, pronouns and elided VPs over
//! constituency trees.
//!
//! Bonsai provides:
//! - An arena-backed constituency tree with dominance and c-command queries
//! - Binding Conditions A, B and C, including quantifier binding and
//!   donkey anaphora
//! - Movement traces and reconstruction
//! - Strict and sloppy VP-ellipsis resolution
//! - Scenario files describing a tree and its referents for the CLI

pub mod features;
pub mod referent;
pub mod tree;
pub mod movement;
pub mod ellipsis;
pub mod resolver;
pub mod config;
pub mod scenario;
pub mod ui;

// Re-exports for convenient access
pub use config::BonsaiConfig;
pub use ellipsis::{EllipsisReading, PossessiveTable, VpContent, VpEllipsis};
pub use features::{Animacy, Features, Gender, Number};
pub use movement::Trace;
pub use referent::{AnaphorType, QuantifierType, Referent};
pub use resolver::{DiscourseCondition, Resolver};
pub use scenario::{Scenario, Session};
pub use tree::{NodeId, Tree};

/// Result type alias for Bonsai operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bonsai operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Referent not found: {0}")]
    ReferentNotFound(String),

    #[error("Invalid feature: {0}")]
    InvalidFeature(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
