/* src/cli/core/src/args.rs */

use std::path::PathBuf;

use clap::Args;
use scriptify::ScriptifyOptions;

use crate::config::ScriptSection;

/// Options shared by `render` and `check`. Flags override `scriptify.toml`.
#[derive(Debug, Clone, Default, Args)]
pub struct ScriptArgs {
  /// Locals JSON file (`-` reads stdin)
  #[arg(short, long)]
  pub data: PathBuf,
  /// Comma-separated keys to expose (default: all)
  #[arg(short, long, value_delimiter = ',')]
  pub keys: Option<Vec<String>>,
  /// Property of `window` that receives the locals
  #[arg(short, long)]
  pub namespace: Option<String>,
  /// Leave values HTML-escaped on the client
  #[arg(long)]
  pub dont_unescape_on_client: bool,
  /// Escape every non-ASCII character in string literals
  #[arg(long)]
  pub ascii_only: bool,
  /// Nesting depth after which values are truncated
  #[arg(long)]
  pub max_depth: Option<usize>,
  /// Path to scriptify.toml (auto-detected if omitted)
  #[arg(short, long)]
  pub config: Option<PathBuf>,
}

impl ScriptArgs {
  pub fn merge_into(&self, section: &ScriptSection) -> ScriptifyOptions {
    let mut opts = section.to_options();
    if let Some(ref keys) = self.keys {
      opts.keys = Some(keys.clone());
    }
    if let Some(ref ns) = self.namespace {
      opts.namespace = ns.clone();
    }
    if let Some(depth) = self.max_depth {
      opts.max_depth = depth;
    }
    // Boolean flags can only switch behaviour on.
    opts.dont_unescape_on_client |= self.dont_unescape_on_client;
    opts.ascii_only |= self.ascii_only;
    opts
  }
}
