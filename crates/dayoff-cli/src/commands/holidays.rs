use clap::Args;
use dayoff_core::HolidayOracle;

use super::current_year;

#[derive(Args)]
pub struct HolidaysArgs {
    /// Year (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: HolidaysArgs) -> Result<(), Box<dyn std::error::Error>> {
    let year = args.year.unwrap_or_else(current_year);
    let table = HolidayOracle::new().holidays_for_year(year);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    for holiday in &table {
        println!("{}  {}", holiday.date.format("%a %Y-%m-%d"), holiday.name);
    }
    Ok(())
}
