use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_threshold_amount(value: &str) -> Result<f64, String> {
    let parsed = value
        .parse::<f64>()
        .map_err(|_| "threshold must be a number".to_string())?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err("threshold must be a positive number".to_string());
    }
    Ok(parsed)
}

pub fn parse_burst_count(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|_| "count must be a whole number".to_string())?;
    if parsed == 0 {
        return Err("count must be at least 1".to_string());
    }
    Ok(parsed)
}

/// Extended help shown after `spendguard analyze --help`.
/// Contains workflow guidance, the transaction schema, and field rules.
pub const ANALYZE_AFTER_HELP: &str = "\
How analysis works:
  Spendguard does not talk to your bank. You export transactions into a
  normalized JSON file, then point `spendguard analyze` at it.

  Accepted format:
    JSON — one top-level array of transaction objects

  <path> is a local file path.
  To read stdin explicitly, use `-` as the path.
  Example: cat transactions.json | spendguard analyze -

What to do next:
  1. Export your transactions into the schema below.
  2. Run `spendguard analyze <path>` and review the alerts.
  3. Tune the rules with the threshold flags if the defaults are noisy.

Transaction schema:
  JSON example (one top-level array):
  [
    {
      \"id\": \"txn_12345\",
      \"date\": \"2025-01-15\",
      \"description\": \"Coffee Shop\",
      \"category\": \"Dining\",
      \"type\": \"expense\",
      \"amount\": -4.50
    }
  ]

Field rules (very explicit):
  id (required):
    A stable unique identifier for the transaction. Alert ids are derived
    from it, so keep it the same across exports.

  date (required):
    Date only, exactly `YYYY-MM-DD`. A trailing time component is ignored.
    Every rule groups by calendar day.

  description (required):
    The transaction label or merchant text. Duplicate detection compares
    descriptions case-insensitively with surrounding whitespace removed,
    but alert messages quote your original text.

  type (required):
    `income` or `expense`. This field decides what counts as spending;
    the sign of `amount` does not.

  amount (required):
    A number, not text. Either sign convention works: every rule
    thresholds on the absolute value.

  category (optional):
    Free-text label. The `spendguard fraud` ruleset uses it to spot
    per-category spending spikes.
";

#[derive(Debug, Parser)]
#[command(
    name = "spendguard",
    version,
    about = "suspicious transaction analysis",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Flag duplicate charges, high-value expenses, and bursts of small charges
    #[command(after_long_help = ANALYZE_AFTER_HELP)]
    Analyze {
        /// Path to a transaction JSON file (use `-` for stdin)
        path: Option<String>,
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Absolute expense amount at or above which a single expense is flagged
        #[arg(long, value_name = "AMOUNT", value_parser = parse_threshold_amount)]
        high_amount_threshold: Option<f64>,
        /// Absolute amount below which a charge counts toward a same-day burst
        #[arg(long, value_name = "AMOUNT", value_parser = parse_threshold_amount)]
        small_amount_threshold: Option<f64>,
        /// Minimum number of small charges in one day to raise a burst alert
        #[arg(long, value_name = "COUNT", value_parser = parse_burst_count)]
        many_small_count: Option<usize>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
    /// Run the legacy fraud ruleset and report a weighted 0-100 risk score
    Fraud {
        /// Path to a transaction JSON file (use `-` for stdin)
        path: Option<String>,
        /// Start date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        /// End date filter (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        /// Emit structured JSON object output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_command_paths() {
        let cases: [Vec<&str>; 10] = [
            vec!["spendguard", "analyze", "transactions.json"],
            vec!["spendguard", "analyze", "transactions.json", "--json"],
            vec!["spendguard", "analyze", "-"],
            vec![
                "spendguard",
                "analyze",
                "transactions.json",
                "--from",
                "2025-01-01",
                "--to",
                "2025-01-31",
            ],
            vec![
                "spendguard",
                "analyze",
                "transactions.json",
                "--high-amount-threshold",
                "500",
            ],
            vec![
                "spendguard",
                "analyze",
                "transactions.json",
                "--small-amount-threshold",
                "5",
                "--many-small-count",
                "8",
            ],
            vec!["spendguard", "fraud", "transactions.json"],
            vec!["spendguard", "fraud", "transactions.json", "--json"],
            vec!["spendguard", "fraud", "-", "--from", "2025-01-01"],
            vec!["spendguard", "analyze"],
        ];

        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
        }
    }

    #[test]
    fn analyze_flags_reach_the_parsed_command() {
        let parsed = parse_from([
            "spendguard",
            "analyze",
            "rows.json",
            "--high-amount-threshold",
            "250.50",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Analyze {
                    high_amount_threshold: Some(_),
                    json: true,
                    ..
                }
            ));
        }
    }

    #[test]
    fn invalid_date_is_rejected() {
        let parsed = parse_from(["spendguard", "analyze", "--from", "2025-99-01"]);
        assert!(parsed.is_err());

        let impossible = parse_from(["spendguard", "fraud", "--to", "2025-02-30"]);
        assert!(impossible.is_err());
    }

    #[test]
    fn non_positive_thresholds_are_rejected() {
        let zero = parse_from([
            "spendguard",
            "analyze",
            "rows.json",
            "--high-amount-threshold",
            "0",
        ]);
        assert!(zero.is_err());

        let negative = parse_from([
            "spendguard",
            "analyze",
            "rows.json",
            "--small-amount-threshold",
            "-5",
        ]);
        assert!(negative.is_err());

        let zero_count = parse_from([
            "spendguard",
            "analyze",
            "rows.json",
            "--many-small-count",
            "0",
        ]);
        assert!(zero_count.is_err());
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["spendguard", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["spendguard", "analyze", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
