use crate::referent::Referent;
use crate::tree::{NodeId, Tree};
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::TREE, text.style(theme().header.clone()));
}

pub fn status(icon: &str, label: &str, value: &str) {
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

/// One candidate antecedent, with its node
pub fn candidate(referent: &Referent, alias: Option<&str>) {
    let position = match alias {
        Some(alias) => format!("{} {}", referent.node, alias),
        None => referent.node.to_string(),
    };
    println!(
        "  {} {} {}",
        Icons::LINK,
        referent.name.style(theme().binder.clone()),
        muted(&format!("[{}] {}", position, referent.anaphor_type))
    );
}

pub fn no_candidates(anaphor: &str) {
    println!("  {} no antecedent for '{}'", Icons::GAP, anaphor);
}

/// Print the subtree at `id` as an indented outline
pub fn tree_line(tree: &Tree, id: NodeId, depth: usize) {
    let Some(node) = tree.node(id) else {
        return;
    };

    let mut line = format!(
        "{}{} {}",
        "  ".repeat(depth),
        node.label.style(theme().label.clone()),
        muted(&id.to_string())
    );
    if let Some(text) = &node.text {
        line.push(' ');
        line.push_str(text);
    }
    for referent in node.referents() {
        let icon = if referent.quantifier.is_some() { Icons::QUANT } else { Icons::PERSON };
        line.push_str(&format!(" {} {}", icon, referent.name.style(theme().binder.clone())));
        if referent.has_moved() {
            let base = referent.base_position.map(|b| b.to_string()).unwrap_or_default();
            line.push_str(&format!(" {}", dim(&format!("{} from {}", Icons::MOVE, base))));
        }
    }
    if !node.traces().is_empty() {
        line.push_str(&format!(" {}", dim(&format!("{} t×{}", Icons::MOVE, node.traces().len()))));
    }
    if let Some(site) = &node.ellipsis {
        line.push_str(&format!(" {}", dim(&format!("<{} e{}>", site.auxiliary, site.id))));
    }
    println!("{}", line);

    for &child in node.children() {
        tree_line(tree, child, depth + 1);
    }
}
