use clap::Args;
use serde::Serialize;

use restyle::config::ConfigOverrides;

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct RulesArgs {
    /// Directory whose restyle.json should be used (default: current directory)
    #[arg(default_value = ".")]
    pub root: String,

    /// Rules/config file (default: <ROOT>/restyle.json, else built-in rules)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RulesOutput {
    #[serde(rename = "rules")]
    List {
        #[serde(skip_serializing_if = "Option::is_none")]
        config: Option<String>,
        builtin: bool,
        rules: Vec<RuleEntry>,
    },
}

#[derive(Serialize)]
pub struct RuleEntry {
    /// 1-indexed application order.
    pub order: usize,
    pub pattern: String,
    pub replacement: String,
}

pub fn run(args: RulesArgs, _global: &GlobalArgs) -> CmdResult<RulesOutput> {
    let (_, loaded) = crate::commands::load_config(
        &args.root,
        args.config.as_deref(),
        &ConfigOverrides::default(),
    )?;

    // Compile to surface invalid patterns here rather than at apply time.
    let compiled = loaded.config.compile_rules()?;

    let rules = compiled
        .specs()
        .into_iter()
        .enumerate()
        .map(|(i, spec)| RuleEntry {
            order: i + 1,
            pattern: spec.pattern,
            replacement: spec.replacement,
        })
        .collect();

    Ok((
        RulesOutput::List {
            builtin: loaded.source.is_none(),
            config: loaded.source.map(|p| p.display().to_string()),
            rules,
        },
        0,
    ))
}
