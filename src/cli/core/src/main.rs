/* src/cli/core/src/main.rs */

mod args;
mod check;
mod config;
mod input;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use args::ScriptArgs;
use check::{KeyReport, check_locals};
use config::resolve_config;

#[derive(Parser)]
#[command(name = "scriptify", about = "Expose locals JSON to client-side JavaScript as a safe <script> tag")]
struct Cli {
  /// Increase log verbosity (-v debug, -vv trace)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Render the script tag to stdout or a file
  Render {
    #[command(flatten)]
    script: ScriptArgs,
    /// Output file (default: stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
  /// Report which keys would be exposed or dropped, without rendering
  Check {
    #[command(flatten)]
    script: ScriptArgs,
  },
}

fn init_tracing(verbose: u8) {
  let level = match verbose {
    0 => Level::WARN,
    1 => Level::DEBUG,
    _ => Level::TRACE,
  };
  tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

/// Load data + config and merge flags into final options.
fn prepare(script: &ScriptArgs) -> Result<(scriptify::Locals, scriptify::ScriptifyOptions)> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let (config_path, config) = resolve_config(script.config.as_deref(), &cwd)?;
  if let Some(ref path) = config_path {
    ui::arrow(&format!("using {}", path.display()));
  }
  let options = script.merge_into(&config.script);
  options.validate()?;
  let locals = input::read_locals(&script.data)?;
  Ok((locals, options))
}

fn run_render(script: &ScriptArgs, out: Option<&Path>) -> Result<()> {
  let (locals, options) = prepare(script)?;
  let html = scriptify::render_script_tag(&locals, &options)?;
  match out {
    Some(path) => {
      std::fs::write(path, &html).with_context(|| format!("failed to write {}", path.display()))?;
      ui::ok(&format!(
        "wrote {} ({})",
        path.display(),
        ui::format_size(html.len() as u64)
      ));
    }
    None => println!("{html}"),
  }
  Ok(())
}

fn run_check(script: &ScriptArgs) -> Result<()> {
  let (locals, options) = prepare(script)?;
  ui::heading(&format!("window.{}", options.namespace));
  let reports = check_locals(&locals, &options);
  let mut missing = 0;
  for report in &reports {
    match report {
      KeyReport::Exposed { key, bytes } => {
        ui::ok(&format!("{key} ({})", ui::format_size(*bytes as u64)));
      }
      KeyReport::Dropped { key, reason } => ui::warn(&format!("{key} dropped: {reason}")),
      KeyReport::Missing { key } => {
        missing += 1;
        ui::fail(&format!("{key} not found in data"));
      }
    }
  }
  if reports.is_empty() {
    ui::detail("no locals to expose");
  }
  if missing > 0 {
    bail!("{missing} requested key(s) missing from data");
  }
  Ok(())
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match cli.command {
    Command::Render { script, out } => run_render(&script, out.as_deref())?,
    Command::Check { script } => run_check(&script)?,
  }
  Ok(())
}
