use std::path::Path;

use crate::{emit_success, OutputMode};
use bonsai::config::{default_config_path, load_config, write_config};
use bonsai::ui::{self, Icons};
use bonsai::{BonsaiConfig, EllipsisReading, Scenario, Session};

fn open_session(config_path: Option<&Path>, scenario: &Path) -> anyhow::Result<Session> {
    let config = load_config(config_path)?.unwrap_or_default();
    let session = Scenario::load(scenario)?.build(config)?;
    Ok(session)
}

pub fn run_resolve(
    output_mode: OutputMode,
    config_path: Option<&Path>,
    scenario: &Path,
    referent: &str,
    allow_reconstruction: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(config_path, scenario)?;
    let Some(anaphor) = session.resolver.tree().referent(referent).cloned() else {
        anyhow::bail!("No referent named '{}' in {}", referent, scenario.display());
    };

    let candidates = session
        .resolver
        .resolve(&anaphor, anaphor.node, allow_reconstruction);
    let candidates = bonsai::referent::dedup_candidates(candidates);

    if output_mode.is_human() {
        ui::header(&format!("Resolving {}", anaphor.short_description()));
        ui::status(
            Icons::GEAR,
            "Reconstruction",
            if allow_reconstruction { "on" } else { "off" },
        );
        ui::section("Candidates");
        if candidates.is_empty() {
            ui::no_candidates(&anaphor.name);
        } else {
            for candidate in &candidates {
                ui::candidate(candidate, session.alias_of(candidate.node));
            }
            println!("{}", ui::candidate_table(&candidates));
        }

        let conditions = session.resolver.discourse_conditions();
        if !conditions.is_empty() {
            ui::section("Discourse conditions");
            for condition in conditions {
                println!(
                    "  {} {} {} {}",
                    Icons::LINK,
                    condition.existential.name,
                    Icons::ARROW,
                    condition.pronoun.name
                );
            }
        }
    } else {
        let data = serde_json::json!({
            "anaphor": anaphor,
            "reconstruction": allow_reconstruction,
            "candidates": candidates,
            "discourse_conditions": session.resolver.discourse_conditions(),
        });
        emit_success(output_mode, "resolve", data)?;
    }
    Ok(())
}

pub fn run_ellipsis(
    output_mode: OutputMode,
    config_path: Option<&Path>,
    scenario: &Path,
    node: &str,
    reading: &str,
    subject: Option<&str>,
) -> anyhow::Result<()> {
    let mut session = open_session(config_path, scenario)?;
    let site = session.node(node)?;
    let reading: EllipsisReading = reading.parse()?;

    let resolved = session.resolver.resolve_vp_ellipsis(site, reading, subject);
    let record = session
        .resolver
        .tree()
        .node(site)
        .and_then(|n| n.ellipsis.clone());

    if output_mode.is_human() {
        ui::header(&format!("Ellipsis at {} ({})", node, site));
        match (&resolved, &record) {
            (Some(content), Some(record)) => {
                let antecedent = record
                    .antecedent
                    .map(|id| session.alias_of(id).map(str::to_string).unwrap_or_else(|| id.to_string()))
                    .unwrap_or_else(|| "-".to_string());
                ui::info("Antecedent", &antecedent);
                ui::info("Reading", record.reading.as_str());
                ui::info("Verb", &content.verb);
                ui::info("Subject", content.subject.as_deref().unwrap_or("-"));
                for (role, value) in &content.arguments {
                    ui::info(role, value);
                }
                if record.reading != reading {
                    ui::warn("No new subject given, sloppy reading copied strictly");
                }
            }
            _ => ui::warn("Could not resolve ellipsis (not a site, or no preceding VP)"),
        }
    } else {
        let data = serde_json::json!({
            "node": site,
            "resolved": resolved,
            "site": record,
        });
        emit_success(output_mode, "ellipsis", data)?;
    }
    Ok(())
}

pub fn run_relations(
    output_mode: OutputMode,
    config_path: Option<&Path>,
    scenario: &Path,
    from: &str,
    to: &str,
) -> anyhow::Result<()> {
    let session = open_session(config_path, scenario)?;
    let a = session.node(from)?;
    let b = session.node(to)?;
    let tree = session.resolver.tree();
    let labels = &session.resolver.config().binding.local_domain_labels[..];

    let dominates = tree.dominates(a, b);
    let c_commands = tree.c_commands(a, b);
    let reverse = tree.c_commands(b, a);
    let domain_a = tree.local_domain_in(a, labels);
    let domain_b = tree.local_domain_in(b, labels);
    let same_domain = domain_a.is_some() && domain_a == domain_b;

    if output_mode.is_human() {
        ui::header(&format!("{} ({}) and {} ({})", from, a, to, b));
        let relations = [
            ("dominates", dominates),
            ("c-commands", c_commands),
            ("is c-commanded by", reverse),
            ("shares local domain", same_domain),
        ];
        println!("{}", ui::relation_table(&relations));
        let domain = |d: Option<bonsai::NodeId>| d.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        ui::info(&format!("Local domain of {}", from), &domain(domain_a));
        ui::info(&format!("Local domain of {}", to), &domain(domain_b));
    } else {
        let data = serde_json::json!({
            "from": a,
            "to": b,
            "dominates": dominates,
            "c_commands": c_commands,
            "c_commanded_by": reverse,
            "local_domain": { "from": domain_a, "to": domain_b },
        });
        emit_success(output_mode, "relations", data)?;
    }
    Ok(())
}

pub fn run_show(
    output_mode: OutputMode,
    config_path: Option<&Path>,
    scenario: &Path,
) -> anyhow::Result<()> {
    let session = open_session(config_path, scenario)?;
    let tree = session.resolver.tree();

    if output_mode.is_human() {
        ui::header(&format!("Scenario {}", scenario.display()));
        ui::section("Tree");
        ui::tree_line(tree, tree.root(), 1);
        ui::section("Nodes");
        println!("{}", ui::node_table(tree));
        let discourse = session.resolver.discourse_referents();
        if !discourse.is_empty() {
            ui::section("Discourse referents");
            for referent in discourse {
                println!("  {} {}", Icons::PERSON, referent.short_description());
            }
        }
    } else {
        let data = serde_json::json!({
            "tree": tree.to_bracketed(),
            "aliases": session.aliases,
            "referents": tree.all_referents(),
            "discourse": session.resolver.discourse_referents(),
        });
        emit_success(output_mode, "show", data)?;
    }
    Ok(())
}

pub fn run_init(
    output_mode: OutputMode,
    config_path: Option<&Path>,
    force: bool,
) -> anyhow::Result<()> {
    let path = config_path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    write_config(&path, &BonsaiConfig::default(), force)?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", path.display()));
    } else {
        emit_success(output_mode, "init", serde_json::json!({ "path": path }))?;
    }
    Ok(())
}
