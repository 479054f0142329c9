use super::open_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::VisibleNode;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Page file (JSON)
    pub page: String,

    /// Expand every container
    #[arg(short, long)]
    pub all: bool,

    /// Print the nested tree view as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn tree(args: TreeArgs, cwd: &str) -> Result<()> {
    let mut session = open_session(cwd, &args.page)?;
    if args.all {
        session.expand_all()?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.root_nodes()?)?);
        return Ok(());
    }

    let nodes = session.visible_nodes()?;
    if nodes.is_empty() {
        println!("{}", "⚠️  Page has no components".yellow());
        return Ok(());
    }

    for node in &nodes {
        println!("{}", render_row(node));
    }

    let total = session.tree()?.len();
    println!();
    println!("{} of {} components shown", nodes.len(), total);
    Ok(())
}

fn render_row(node: &VisibleNode) -> String {
    let marker = match (node.has_children(), node.is_expanded) {
        (false, _) => "•",
        (true, true) => "▾",
        (true, false) => "▸",
    };

    let mut row = format!(
        "{}{} {}",
        "  ".repeat(node.depth),
        marker,
        node.component.component_type.bright_white().bold()
    );

    if let Some(name) = &node.component.name {
        row.push_str(&format!(" {}", name));
    }
    row.push_str(&format!(" {}", format!("#{}", node.id()).dimmed()));

    if node.has_children() && !node.is_expanded {
        row.push_str(&format!(" ({} children)", node.child_count));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn test_render_row_indents_by_depth() {
        colored::control::set_override(false);
        let (_dir, cwd) = fixtures::workspace();
        let mut session = open_session(&cwd, "home.json").unwrap();
        session.expand_all().unwrap();

        let rows: Vec<String> = session.visible_nodes().unwrap().iter().map(render_row).collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "▾ card #hero");
        assert_eq!(rows[1], "  • heading #title");
    }

    #[test]
    fn test_collapsed_rows_show_child_count() {
        colored::control::set_override(false);
        let (_dir, cwd) = fixtures::workspace();
        let session = open_session(&cwd, "home.json").unwrap();

        let rows: Vec<String> = session.visible_nodes().unwrap().iter().map(render_row).collect();
        assert_eq!(rows, vec!["▸ card #hero (2 children)", "• text #footer"]);
    }

    #[test]
    fn test_tree_command_runs() {
        let (_dir, cwd) = fixtures::workspace();
        tree(
            TreeArgs {
                page: "home.json".to_string(),
                all: true,
                json: true,
            },
            &cwd,
        )
        .unwrap();
    }
}
