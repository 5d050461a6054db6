use std::path::PathBuf;

use restyle::config::{self, ConfigOverrides, LoadedConfig};

pub type CmdResult<T> = restyle::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod apply;
pub mod rules;

/// Expand `~` in a user-supplied path.
pub(crate) fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).to_string())
}

/// Resolve the effective configuration for a root and optional `--config` path.
pub(crate) fn load_config(
    root: &str,
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
) -> restyle::Result<(PathBuf, LoadedConfig)> {
    let root = expand_path(root);
    let explicit = config_path.map(expand_path);
    let mut loaded = config::load(&root, explicit.as_deref())?;
    loaded.config = loaded.config.apply_overrides(overrides);
    Ok((root, loaded))
}

pub(crate) fn run_text(
    command: crate::Commands,
    global: &GlobalArgs,
) -> restyle::Result<(String, i32)> {
    match command {
        crate::Commands::Apply(args) => apply::run_text(args, global),
        _ => Err(restyle::Error::validation_invalid_argument(
            "format",
            "Command does not support text output",
            None,
            None,
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (restyle::Result<serde_json::Value>, i32) {
    crate::tty::status("restyle is working...");

    match command {
        crate::Commands::Apply(args) => dispatch!(args, global, apply),
        crate::Commands::Rules(args) => dispatch!(args, global, rules),
    }
}
