use chrono::Month;
use clap::Args;
use dayoff_core::{days_in_month, HolidayOracle};

use super::{current_year, parse_month};

#[derive(Args)]
pub struct DaysArgs {
    /// Month number or name (e.g. 2, feb, February)
    #[arg(long, value_parser = parse_month)]
    month: Month,
    /// Year (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: DaysArgs) -> Result<(), Box<dyn std::error::Error>> {
    let year = args.year.unwrap_or_else(current_year);
    let oracle = HolidayOracle::new();
    let set = days_in_month(year, args.month, &oracle);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    println!("{} {year}: {} candidate days", args.month.name(), set.len());
    for (i, day) in set.iter().enumerate() {
        match oracle.holiday_name(day.date()) {
            Some(name) => println!("{i:>2}  {}  (holiday: {name})", day.long_format()),
            None => println!("{i:>2}  {}", day.long_format()),
        }
    }
    Ok(())
}
