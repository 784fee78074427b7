//! Number formatting and the prefixed message sink used for user-facing reports.

use std::io::{self, Write};

use crate::config::Config;
use crate::types::{StatValue, StatsResult};

/// Format `number` with `decimals` places.
pub fn format_number(number: f64, decimals: usize) -> String {
    format!("{number:.decimals$}")
}

/// Print `msg` to stdout with the default prefix.
pub fn log(msg: &str) {
    let mut reporter = Reporter::stdout(&Config::default());
    let _ = reporter.log(msg);
}

/// Writes prefixed report lines to a sink (stdout by default).
pub struct Reporter<W: Write> {
    out: W,
    prefix: String,
    decimal_places: usize,
}

impl Reporter<io::Stdout> {
    /// Reporter on standard output using `config`'s prefix and decimal places.
    pub fn stdout(config: &Config) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> Reporter<W> {
    /// Reporter writing to `out`.
    pub fn new(out: W, config: &Config) -> Self {
        Self {
            out,
            prefix: config.log_prefix.clone(),
            decimal_places: config.decimal_places,
        }
    }

    /// Write one prefixed line.
    pub fn log(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{} {msg}", self.prefix)
    }

    /// Write an unprefixed blank line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Write a readable report for `stats`, computed from `file`.
    ///
    /// Known keys get the DataLab layout: averages, a salary range, a city distribution. Any other
    /// entry is listed as `name: value`.
    pub fn print_report(&mut self, file: &str, stats: &StatsResult) -> io::Result<()> {
        self.log(&format!("Analysis of {file}"))?;
        for (name, value) in stats.iter() {
            match (name, value) {
                ("records", StatValue::Count(n)) => self.log(&format!("Total records: {n}"))?,
                ("mean_age", StatValue::Number(v)) => {
                    self.log(&format!("Average age: {}", self.fmt(*v)))?
                }
                ("mean_salary", StatValue::Number(v)) => {
                    self.log(&format!("Average salary: {} SEK", format_number(*v, 0)))?
                }
                ("min_salary", StatValue::Number(lo)) => {
                    if let Some(hi) = stats.number("max_salary") {
                        self.log(&format!(
                            "Salary range: {} - {} SEK",
                            format_number(*lo, 0),
                            format_number(hi, 0)
                        ))?;
                    } else {
                        self.log(&format!("Minimum salary: {} SEK", format_number(*lo, 0)))?;
                    }
                }
                ("max_salary", StatValue::Number(hi)) => {
                    if stats.number("min_salary").is_none() {
                        self.log(&format!("Maximum salary: {} SEK", format_number(*hi, 0)))?;
                    }
                }
                ("group_count_city", StatValue::Groups(groups)) => {
                    self.log("City distribution:")?;
                    self.log_groups(groups)?;
                }
                (name, StatValue::Count(n)) => self.log(&format!("{name}: {n}"))?,
                (name, StatValue::Number(v)) => self.log(&format!("{name}: {}", self.fmt(*v)))?,
                (name, StatValue::Groups(groups)) => {
                    self.log(&format!("{name}:"))?;
                    self.log_groups(groups)?;
                }
            }
        }
        Ok(())
    }

    /// Consume the reporter and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn log_groups(&mut self, groups: &[(String, usize)]) -> io::Result<()> {
        for (key, n) in groups {
            self.log(&format!("  {key}: {n}"))?;
        }
        Ok(())
    }

    fn fmt(&self, v: f64) -> String {
        format_number(v, self.decimal_places)
    }
}
