use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::summary::print_rule_table;

#[derive(Args)]
pub struct RulesArgs {
    /// Config file (TOML) whose rules to show instead of the built-in table
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &RulesArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let table = config.rule_table()?;
    print_rule_table(&table);
    Ok(())
}
