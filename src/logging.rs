//! Console diagnostics.
//!
//! [`Logger`] prints colored progress lines to the standard output
//! when it is verbose, and nothing otherwise.
use colored::Colorize;

use std::fmt::Display;


const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const WIDTH: usize = 9;


/// Struct `Logger` prints the progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
    verbose: bool,
}


impl Default for Logger {
    fn default() -> Self {
        Self::new(true)
    }
}


impl Logger {
    /// Create a new instance of `Logger`.
    #[inline]
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }


    /// A logger that prints nothing.
    #[inline]
    pub fn silent() -> Self {
        Self::new(false)
    }


    /// Returns `true` if this logger prints.
    #[inline]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }


    /// Prints a `=`-ruled header.
    pub fn section(&self, title: &str) {
        if !self.verbose { return; }
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", title.bold(), "",
        );
        println!("\n{header}");
    }


    /// Prints the closing rule of a section.
    pub fn footer(&self) {
        if !self.verbose { return; }
        println!("{:=^FULL_WIDTH$}", "");
    }


    /// Prints a `+ key    value` line.
    pub fn stat<V: Display>(&self, key: &str, value: V) {
        if !self.verbose { return; }
        let value = value.to_string();
        println!(
            "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            key.bold(),
            value.bold().green(),
        );
    }


    /// Prints an indented `+ key    value` line.
    pub fn sub_stat<V: Display>(&self, key: &str, value: V) {
        if !self.verbose { return; }
        let value = value.to_string();
        println!(
            "    + {:<STAT_WIDTH$}\t{:>width$}",
            key,
            value.bold().yellow(),
            width = STAT_WIDTH - 8,
        );
    }


    /// Prints the pairs returned by some `info()` method.
    pub fn info_lines(&self, info: Option<Vec<(&str, String)>>) {
        if let Some(info) = info {
            info.into_iter()
                .for_each(|(key, value)| self.sub_stat(key, value));
        }
    }


    /// Prints a plain message.
    pub fn message<M: Display>(&self, message: M) {
        if !self.verbose { return; }
        println!("{message}");
    }


    /// Prints a warning about a fallback decision.
    pub fn warn<M: Display>(&self, message: M) {
        if !self.verbose { return; }
        println!("{} {message}", "[WARN]".bold().yellow());
    }


    /// Prints the number of missing cells per column.
    pub fn missing_table(&self, counts: &[(String, usize)]) {
        if !self.verbose { return; }
        if counts.is_empty() {
            println!("{}", "No missing values remain.".bold().green());
            return;
        }
        counts.iter()
            .for_each(|(name, count)| self.sub_stat(name, count));
    }


    /// Prints a cross-validation fold.
    pub fn fold(&self, fold: usize, train_size: usize, test_size: usize) {
        if !self.verbose { return; }
        println!(
            "{}    {}    {}",
            format!("  [{: >3}'th fold]", fold).bold().red(),
            format!("[TRAIN {:>WIDTH$}]", train_size).bold().green(),
            format!("[TEST {:>WIDTH$}]", test_size).bold().yellow(),
        );
    }


    /// Prints a cross-validated score as `mean (std)`.
    pub fn score(&self, name: &str, mean: f64, std: f64) {
        if !self.verbose { return; }
        let score = format!("{mean:.4} ({std:.4})");
        println!(
            "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            name.bold(),
            score.bold().cyan(),
        );
    }
}
