use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Profile player-injury datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive a dataset layout from a CSV header row and write it as YAML
    Probe(ProbeArgs),
    /// Preview the first few cleaned rows in a formatted table
    Preview(PreviewArgs),
    /// List the selectable filter options for each dimension
    Options(OptionsArgs),
    /// Report injury count and mean player age for the selection
    Summary(ReportArgs),
    /// Rank injury types by frequency
    Injuries(InjuriesArgs),
    /// Compare average player ratings before and after injury
    Ratings(ReportArgs),
    /// Relate player age to post-injury rating with a fitted trend line
    Trend(ReportArgs),
    /// Tally win/draw/lose outcomes for matches missed during absence
    Results(ReportArgs),
    /// Count injuries per season
    Seasons(ReportArgs),
    /// Print every dashboard section in one pass
    Report(DashboardArgs),
}

/// Input, layout, and filter flags shared by the reporting commands.
#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Input CSV file ('-' reads stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Layout file describing the dataset's columns (derived from the
    /// header row if omitted)
    #[arg(short = 'l', long = "layout")]
    pub layout: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Restrict to this team (repeatable; all teams if omitted)
    #[arg(long = "team", action = clap::ArgAction::Append)]
    pub teams: Vec<String>,
    /// Restrict to this position (repeatable; all positions if omitted)
    #[arg(long = "position", action = clap::ArgAction::Append)]
    pub positions: Vec<String>,
    /// Restrict to this season (repeatable; all seasons if omitted)
    #[arg(long = "season", action = clap::ArgAction::Append)]
    pub seasons: Vec<String>,
    /// Restrict to this injury type (repeatable; use "(missing)" to select
    /// rows with no recorded value)
    #[arg(long = "injury", action = clap::ArgAction::Append)]
    pub injuries: Vec<String>,
    /// Emit JSON instead of a formatted table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub select: SelectArgs,
}

#[derive(Debug, Args)]
pub struct InjuriesArgs {
    #[command(flatten)]
    pub select: SelectArgs,
    /// Maximum injury types to display (0 = all)
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub select: SelectArgs,
    /// Maximum injury types in the frequency section (0 = all)
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub select: SelectArgs,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Input CSV file to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination layout file path
    #[arg(short = 'o', long = "layout")]
    pub layout: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct OptionsArgs {
    /// Input CSV file to inspect
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Layout file describing the dataset's columns
    #[arg(short = 'l', long = "layout")]
    pub layout: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Emit JSON instead of a formatted table
    #[arg(long)]
    pub json: bool,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_named_and_literal_forms() {
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
