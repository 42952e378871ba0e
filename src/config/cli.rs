use crate::core::DateWindow;
use crate::utils::error::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "helpdesk-analytics")]
#[command(about = "Ticket priority and satisfaction analytics for a support desk")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding tickets.csv and surveys.csv (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Classify a question into high, medium or low
    Classify { text: String },
    /// Average response time per priority tier
    ResponseTimes(WindowArgs),
    /// Answered count and average response time per responder
    Staff(WindowArgs),
    /// Ticket count per priority tier, pending included
    Distribution(WindowArgs),
    /// Pending tickets, highest tier and newest first
    Pending,
    /// Answered tickets, most recently answered first
    Answered(WindowArgs),
    /// Daily satisfaction averages, one entry per day
    Trend {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// Compare satisfaction between two periods
    Compare {
        #[arg(long)]
        period1_start: NaiveDate,
        #[arg(long)]
        period1_end: NaiveDate,
        #[arg(long)]
        period2_start: NaiveDate,
        #[arg(long)]
        period2_end: NaiveDate,
    },
    /// Response times, staff and distribution in one document
    Report(WindowArgs),
}

/// Optional creation-date window, whole UTC days.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct WindowArgs {
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
}

impl WindowArgs {
    pub fn window(&self) -> Result<Option<DateWindow>> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => DateWindow::days(from, to).map(Some),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_subcommand() {
        let cli = CliConfig::try_parse_from([
            "helpdesk-analytics",
            "--data-dir",
            "./data",
            "staff",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
        ])
        .unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some("./data"));
        match cli.command {
            Command::Staff(args) => {
                let window = args.window().unwrap().unwrap();
                assert_eq!(window.start.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
                assert_eq!(window.end.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_window_is_optional_but_paired() {
        let cli = CliConfig::try_parse_from(["helpdesk-analytics", "distribution"]).unwrap();
        match cli.command {
            Command::Distribution(args) => assert!(args.window().unwrap().is_none()),
            other => panic!("unexpected command {:?}", other),
        }
        assert!(CliConfig::try_parse_from(["helpdesk-analytics", "report", "--from", "2024-01-01"]).is_err());
    }

    #[test]
    fn test_reversed_window_rejected() {
        let args = WindowArgs {
            from: NaiveDate::from_ymd_opt(2024, 2, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        assert!(args.window().is_err());
    }

    #[test]
    fn test_parse_answered_log() {
        let cli = CliConfig::try_parse_from([
            "helpdesk-analytics",
            "answered",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-07",
        ])
        .unwrap();
        match cli.command {
            Command::Answered(args) => assert!(args.window().unwrap().is_some()),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
