use super::{open_session, resolve, write_page};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct PrecompileArgs {
    /// Page file (JSON)
    pub page: String,

    /// Output file (prints to stdout when omitted)
    #[arg(short, long)]
    pub out: Option<String>,
}

pub fn precompile(args: PrecompileArgs, cwd: &str) -> Result<()> {
    let mut session = open_session(cwd, &args.page)?;

    let changed = session.precompile_styles()?;
    if !changed {
        eprintln!("{}", "Class names already up to date".dimmed());
    }

    match &args.out {
        Some(out) => {
            let out = resolve(cwd, out);
            write_page(&session, Some(&out))?;
            eprintln!("  {} Wrote {}", "✓".green(), out.display());
        }
        None => write_page(&session, None)?,
    }
    Ok(())
}
