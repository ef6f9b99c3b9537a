use std::path::Path;

use chrono::NaiveDate;
use clap::Args;
use dayoff_core::calendar_link;

use super::load_config;

#[derive(Args)]
pub struct LinkArgs {
    /// Date of the day off (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
    /// Open the link in the default browser
    #[arg(long)]
    open: bool,
}

pub fn run(args: LinkArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let url = calendar_link(args.date, &config.calendar)?;
    println!("{url}");
    if args.open {
        open::that(url.as_str())?;
    }
    Ok(())
}
