//! Repository analysis pipeline
//!
//! Ties the git layer to the analyzers: fetch the log, analyze and aggregate
//! the commits, then attribute every tracked file at the reference point.
//! Work runs on a rayon pool sized by [`RepoConfiguration::threads`].

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;

use super::history::{aggregate_commits, analyze_commits};
use super::line_attribution::analyze_file;
use super::summary::{AuthorLineTotals, ContributionSummary, Period};
use crate::config::RepoConfiguration;
use crate::git::parser::Parser;
use crate::git::{GitError, GitExecutor, HistorySource};
use crate::model::{CommitResult, FileSnapshotResult};

/// A file that could not be attributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}

/// Everything computed for one repository
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoReport {
    pub location: String,
    pub branch: String,
    /// Commit the snapshots were taken at
    pub reference: String,
    pub commits: Vec<CommitResult>,
    pub snapshots: Vec<FileSnapshotResult>,
    pub failures: Vec<FileFailure>,
    pub summary: ContributionSummary,
    pub line_totals: AuthorLineTotals,
}

/// Analyzes one repository through a [`HistorySource`]
pub struct RepoAnalyzer<S: HistorySource> {
    source: S,
    config: RepoConfiguration,
    period: Period,
}

impl RepoAnalyzer<GitExecutor> {
    /// Analyzer backed by the `git` binary at the configured location
    pub fn for_repository(config: RepoConfiguration) -> Self {
        let executor = GitExecutor::with_repo_path(config.location());
        Self::new(executor, config)
    }
}

impl<S: HistorySource> RepoAnalyzer<S> {
    pub fn new(source: S, config: RepoConfiguration) -> Self {
        Self {
            source,
            config,
            period: Period::default(),
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn config(&self) -> &RepoConfiguration {
        &self.config
    }

    fn pool(&self) -> Result<ThreadPool, GitError> {
        // 0 lets rayon pick its default
        Ok(ThreadPoolBuilder::new()
            .num_threads(self.config.threads().unwrap_or(0))
            .build()?)
    }

    /// Analyzed, filtered and time-ordered commits of the configured branch
    pub fn analyze_commits(&self) -> Result<Vec<CommitResult>, GitError> {
        let pool = self.pool()?;
        self.commits_on(&pool)
    }

    fn commits_on(&self, pool: &ThreadPool) -> Result<Vec<CommitResult>, GitError> {
        let log = self.source.commit_log(&self.config)?;
        let records = Parser::parse_commit_log(&log);
        tracing::debug!(records = records.len(), "parsed commit log");

        let results = pool.install(|| analyze_commits(&records, &self.config));
        Ok(aggregate_commits(results, &self.config))
    }

    /// Attribute each of `paths` at `rev`
    ///
    /// Results come back in the order of `paths`; a failure affects only its
    /// own file.
    pub fn analyze_files(
        &self,
        rev: &str,
        paths: &[String],
    ) -> Result<Vec<(String, Result<FileSnapshotResult, GitError>)>, GitError> {
        let pool = self.pool()?;
        Ok(self.files_on(&pool, rev, paths))
    }

    fn files_on(
        &self,
        pool: &ThreadPool,
        rev: &str,
        paths: &[String],
    ) -> Vec<(String, Result<FileSnapshotResult, GitError>)> {
        pool.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    let result = analyze_file(&self.source, &self.config, rev, path);
                    if let Err(err) = &result {
                        tracing::warn!(path = %path, error = %err, "failed to analyze file");
                    }
                    (path.clone(), result)
                })
                .collect()
        })
    }

    /// Run the whole analysis
    pub fn analyze(&self) -> Result<RepoReport, GitError> {
        tracing::info!(
            location = %self.config.location().display(),
            branch = %self.config.branch(),
            "Analyzing repository"
        );
        let pool = self.pool()?;

        let reference = self
            .source
            .resolve_reference(self.config.branch(), self.config.until())?;
        let paths = Parser::parse_file_list(&self.source.tracked_files(&reference)?);

        let commits = self.commits_on(&pool)?;

        let mut snapshots = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();
        for (path, result) in self.files_on(&pool, &reference, &paths) {
            match result {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(err) => failures.push(FileFailure {
                    path,
                    error: err.to_string(),
                }),
            }
        }

        let summary = ContributionSummary::from_commits(&commits, self.period);
        let line_totals = AuthorLineTotals::from_snapshots(&snapshots);

        tracing::info!(
            commits = commits.len(),
            files = snapshots.len(),
            failures = failures.len(),
            "repository analysis complete"
        );

        Ok(RepoReport {
            location: self.config.location().display().to_string(),
            branch: self.config.branch().to_string(),
            reference,
            commits,
            snapshots,
            failures,
            summary,
            line_totals,
        })
    }
}

/// Analyze independent repositories in parallel
///
/// One result per configuration, in input order; a failing repository does
/// not affect the others.
pub fn analyze_repositories(
    configs: Vec<RepoConfiguration>,
    period: Period,
) -> Vec<Result<RepoReport, GitError>> {
    configs
        .into_par_iter()
        .map(|config| {
            let location = config.location().display().to_string();
            let result = RepoAnalyzer::for_repository(config)
                .with_period(period)
                .analyze();
            if let Err(err) = &result {
                tracing::error!(location = %location, error = %err, "repository analysis failed");
            }
            result
        })
        .collect()
}
