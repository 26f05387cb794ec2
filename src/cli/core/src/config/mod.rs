/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::resolve_config;
#[cfg(test)]
use loader::{find_scriptify_config, load_scriptify_config};
pub use types::{ScriptSection, ScriptifyConfig};
