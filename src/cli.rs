//! Command line interface

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail};
use serde::Serialize;

use repotally::analysis::{Period, RepoAnalyzer, RepoReport, analyze_repositories};
use repotally::config::{RepoConfiguration, end_of_day, parse_config_date};
use repotally::model::CommitHash;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repositories to analyze (defaults to the current directory)
    pub repos: Vec<PathBuf>,

    /// TOML configuration file; may be given once per repository
    #[arg(short, long = "config", value_name = "FILE")]
    pub configs: Vec<PathBuf>,

    /// Branch or revision to analyze
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Start of the window (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub since: Option<String>,

    /// End of the window (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub until: Option<String>,

    /// Commit to ignore, full hash or abbreviated prefix
    #[arg(long = "ignore-commit", value_name = "HASH")]
    pub ignore_commits: Vec<String>,

    /// Attribute commits by unconfigured authors to their raw name
    #[arg(long)]
    pub accept_all_authors: bool,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short = 'j', long, env = "REPOTALLY_THREADS")]
    pub threads: Option<usize>,

    /// Bucket width of the contribution summary
    #[arg(long, default_value = "day")]
    pub period: Period,

    /// Only analyze commits, skip line attribution
    #[arg(long)]
    pub commits_only: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    /// Build one configuration per target, with command line overrides applied
    fn configurations(&self) -> Result<Vec<RepoConfiguration>> {
        let mut configs = Vec::new();
        for path in &self.configs {
            let config = RepoConfiguration::load(path)
                .wrap_err_with(|| format!("Failed to load {}", path.display()))?;
            configs.push(config);
        }
        configs.extend(self.repos.iter().map(|repo| RepoConfiguration::new(repo.clone())));
        if configs.is_empty() {
            configs.push(RepoConfiguration::new("."));
        }

        configs
            .into_iter()
            .map(|config| self.apply_overrides(config))
            .collect()
    }

    fn apply_overrides(&self, mut config: RepoConfiguration) -> Result<RepoConfiguration> {
        if let Some(branch) = &self.branch {
            config = config.with_branch(branch);
        }

        let since = match &self.since {
            Some(value) => Some(parse_config_date(value, NaiveTime::MIN)?),
            None => config.since(),
        };
        let until = match &self.until {
            Some(value) => Some(parse_config_date(value, end_of_day())?),
            None => config.until(),
        };
        config = config.with_window(since, until)?;

        if !self.ignore_commits.is_empty() {
            let mut ignore = config.ignore_commits().to_vec();
            for raw in &self.ignore_commits {
                let hash = CommitHash::new(raw);
                if !hash.is_valid() {
                    bail!("Invalid commit hash '{}'", raw);
                }
                ignore.push(hash);
            }
            config = config.with_ignore_commits(ignore);
        }

        if self.accept_all_authors {
            config = config.with_accept_all_authors(true);
        }
        if self.threads.is_some() {
            config = config.with_threads(self.threads);
        }
        Ok(config)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let configs = cli.configurations()?;

    if cli.commits_only {
        let mut all = Vec::with_capacity(configs.len());
        for config in configs {
            let location = config.location().display().to_string();
            let commits = RepoAnalyzer::for_repository(config)
                .analyze_commits()
                .wrap_err_with(|| format!("Failed to analyze {}", location))?;
            all.push(commits);
        }
        return match all.len() {
            1 => print_json(&all[0], cli.pretty),
            _ => print_json(&all, cli.pretty),
        };
    }

    let results = analyze_repositories(configs, cli.period);
    let failed = results.iter().filter(|result| result.is_err()).count();
    let reports: Vec<RepoReport> = results.into_iter().filter_map(|result| result.ok()).collect();

    match reports.len() {
        1 => print_json(&reports[0], cli.pretty)?,
        _ => print_json(&reports, cli.pretty)?,
    }

    if failed > 0 {
        bail!("{} repositories could not be analyzed", failed);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
