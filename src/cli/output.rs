//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::{Category, CategoryNode, CategoryStatus, Forest};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

fn status_label(status: CategoryStatus) -> String {
    match status {
        CategoryStatus::Active => status.to_string().green().to_string(),
        CategoryStatus::Inactive => status.to_string().yellow().to_string(),
    }
}

fn node_label(node: &CategoryNode) -> String {
    let mut label = format!("{} {}", node.name, format!("[{}]", node.id).dimmed());
    if node.status == CategoryStatus::Inactive {
        label.push_str(&format!(" ({})", status_label(node.status)));
    }
    label
}

fn node_tree(node: &CategoryNode) -> Tree<String> {
    Tree::new(node_label(node)).with_leaves(node.subcategories.iter().map(node_tree))
}

/// Render the forest as one box-drawn tree per root.
pub fn render_forest(forest: &Forest) -> String {
    if forest.is_empty() {
        return "(no categories)".to_string();
    }
    forest
        .roots
        .iter()
        .map(|root| node_tree(root).to_string())
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Print a single record as aligned key/value lines.
pub fn category(category: &Category) {
    header(&category.name);
    detail(&format!("id:     {}", category.id));
    detail(&format!(
        "parent: {}",
        category
            .parent
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    detail(&format!("status: {}", status_label(category.status)));
}
