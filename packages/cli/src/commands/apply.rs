use super::{open_session, resolve, write_page};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{EditorSession, Mutation};
use std::fs;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Page file (JSON)
    pub page: String,

    /// JSON array of mutations
    pub mutations: String,

    /// Output file (defaults to overwriting the page)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Print the resulting page instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let mut session = open_session(cwd, &args.page)?;

    let mutations_path = resolve(cwd, &args.mutations);
    let content = fs::read_to_string(&mutations_path)
        .with_context(|| format!("Cannot read {}", mutations_path.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mutations in {}", mutations_path.display()))?;

    eprintln!(
        "{}",
        format!("🔨 Applying {} mutations...", mutations.len())
            .bright_blue()
            .bold()
    );

    run_mutations(&mut session, mutations)?;

    if args.stdout {
        write_page(&session, None)?;
    } else {
        let out = resolve(cwd, args.out.as_deref().unwrap_or(&args.page));
        write_page(&session, Some(&out))?;
        eprintln!("  {} Wrote {}", "✓".green(), out.display());
    }

    Ok(())
}

/// Apply every mutation in order, stopping at the first rejected one
fn run_mutations(session: &mut EditorSession, mutations: Vec<Mutation>) -> Result<()> {
    for (n, mutation) in mutations.into_iter().enumerate() {
        let label = mutation.label();

        let result = session
            .apply(mutation)
            .with_context(|| format!("Mutation #{} ({}) rejected", n + 1, label))?;

        let detail = match (&result.inserted_id, result.removed_ids.len()) {
            (Some(id), _) => format!("→ {}", id),
            (None, 0) => String::new(),
            (None, removed) => format!("({} removed)", removed),
        };

        eprintln!("  {} {} {}", "✓".green(), label, detail.dimmed());
    }
    Ok(())
}
