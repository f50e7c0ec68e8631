use clap::Subcommand;
use gapshield_core::{generate_daily_gap_schedule, Config};

use super::{parse_date, require_child_id};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show a child's privacy gaps for one day
    Show {
        /// Child identifier
        #[arg(long)]
        child: String,
        /// Day as YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        date: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleAction::Show { child, date, json } => {
            let child = require_child_id(&child)?;
            let date = parse_date(date.as_deref())?;
            let config = Config::load()?.privacy_gap_config()?;
            let schedule = generate_daily_gap_schedule(child, date, &config);

            if json {
                println!("{}", serde_json::to_string_pretty(&schedule)?);
                return Ok(());
            }

            if !config.enabled() {
                println!("note: privacy gaps are disabled; this schedule is not applied");
            }
            println!("{} {}: {} gap(s)", schedule.child_id(), schedule.date(), schedule.gaps().len());
            for gap in schedule.gaps() {
                let secs = gap.duration_ms() / 1000;
                println!(
                    "  {} - {}  ({}m {:02}s)",
                    gap.start_time().format("%H:%M:%S"),
                    gap.end_time().format("%H:%M:%S"),
                    secs / 60,
                    secs % 60,
                );
            }
        }
    }
    Ok(())
}
