//! # Generation
//!
//! Turns a selection (one scenario or `all`) into files on disk.
//!
//! Planning and writing are split: `plan` resolves every name and output
//! path up front, so an invalid selection fails before any file is created
//! or touched. `run` then builds and writes each container in order and
//! stops at the first I/O failure.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::catalog::{Scenario, TargetRelease, ALL_SELECTION};
use crate::config::{GeneratorConfig, DEFAULT_FILE_PREFIX};
use crate::error::{PocError, Result};

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    One(String),
}

impl Selection {
    pub fn parse(arg: &str) -> Self {
        if arg == ALL_SELECTION {
            Selection::All
        } else {
            Selection::One(arg.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// A resolved scenario and where it will be written.
#[derive(Debug, Clone)]
pub struct Job {
    pub scenario: &'static Scenario,
    pub path: PathBuf,
}

/// A file that was written.
#[derive(Debug, Clone)]
pub struct Generated {
    pub name: &'static str,
    pub path: PathBuf,
    pub bytes: usize,
    pub command: String,
}

/// Per-job notifications emitted by [`Generator::run`].
#[derive(Debug)]
pub enum Progress<'a> {
    /// About to build and write this job.
    Started(&'a Job),
    /// The job's file is on disk.
    Finished(&'a Generated),
}

/// Resolves selections against one release and writes the results.
#[derive(Debug, Clone)]
pub struct Generator {
    release: TargetRelease,
    output_dir: PathBuf,
    file_prefix: String,
}

impl Generator {
    pub fn new(release: TargetRelease, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            release,
            output_dir: output_dir.into(),
            file_prefix: String::from(DEFAULT_FILE_PREFIX),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            release: config.target.release,
            output_dir: config.output.directory.clone(),
            file_prefix: config.output.file_prefix.clone(),
        }
    }

    pub fn release(&self) -> TargetRelease {
        self.release
    }

    /// Default location of `scenario` inside `dir`.
    pub fn default_path(&self, dir: &Path, scenario: &Scenario) -> PathBuf {
        dir.join(scenario.file_name(&self.file_prefix))
    }

    /// Resolve `selection` into jobs without touching the filesystem.
    ///
    /// `output` is the destination file for a single scenario, or the
    /// destination directory for `all`. When absent, default names are
    /// placed in the configured output directory.
    ///
    /// # Errors
    /// Returns `PocError::UnknownScenario` for a name the release does not have.
    pub fn plan(&self, selection: &Selection, output: Option<&Path>) -> Result<Vec<Job>> {
        match selection {
            Selection::All => {
                let dir = output.unwrap_or(self.output_dir.as_path());
                Ok(self
                    .release
                    .scenarios()
                    .iter()
                    .map(|scenario| Job {
                        scenario,
                        path: self.default_path(dir, scenario),
                    })
                    .collect())
            }
            Selection::One(name) => {
                let scenario = self.release.find(name)?;
                let path = match output {
                    Some(path) => path.to_path_buf(),
                    None => self.default_path(&self.output_dir, scenario),
                };
                Ok(vec![Job { scenario, path }])
            }
        }
    }

    /// Create the shared output directory of an `all` run.
    ///
    /// A single explicit destination is left alone: a missing parent there
    /// surfaces as a write error.
    fn prepare(&self, jobs: &[Job], all: bool) -> Result<()> {
        if !all {
            return Ok(());
        }
        if let Some(dir) = jobs.first().and_then(|job| job.path.parent()) {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|source| PocError::Write {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    /// Build and write every job, in order, reporting each step to `report`.
    ///
    /// # Errors
    /// The first write failure is returned as-is; files already written stay.
    pub fn run<F>(&self, jobs: &[Job], all: bool, mut report: F) -> Result<Vec<Generated>>
    where
        F: FnMut(Progress<'_>),
    {
        self.prepare(jobs, all)?;
        let mut generated = Vec::with_capacity(jobs.len());
        for job in jobs {
            report(Progress::Started(job));
            let file = self.execute(job)?;
            report(Progress::Finished(&file));
            generated.push(file);
        }
        Ok(generated)
    }

    /// Build one container and write it to the job's path.
    fn execute(&self, job: &Job) -> Result<Generated> {
        let scenario = job.scenario;
        debug!(
            release = %self.release,
            scenario = scenario.name,
            format = scenario.format.name(),
            "building container"
        );

        let container = scenario.container()?;
        let bytes = container.write_to_path(&job.path)?;
        let command = scenario.command_hint(&job.path);

        info!(scenario = scenario.name, path = %job.path.display(), bytes, "generated");
        Ok(Generated {
            name: scenario.name,
            path: job.path.clone(),
            bytes,
            command,
        })
    }

    /// `plan` followed by `run`.
    pub fn generate_with<F>(
        &self,
        selection: &Selection,
        output: Option<&Path>,
        report: F,
    ) -> Result<Vec<Generated>>
    where
        F: FnMut(Progress<'_>),
    {
        let jobs = self.plan(selection, output)?;
        self.run(&jobs, selection.is_all(), report)
    }

    /// `generate_with` without progress reporting.
    pub fn generate(&self, selection: &Selection, output: Option<&Path>) -> Result<Vec<Generated>> {
        self.generate_with(selection, output, |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("loop"), Selection::One("loop".into()));
        assert_eq!(Selection::parse("ALL"), Selection::One("ALL".into()));
    }

    #[test]
    fn test_plan_single_default_path() {
        let generator = Generator::new(TargetRelease::V2_4_0, "out");
        let jobs = generator.plan(&Selection::One("scal".into()), None).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].path, Path::new("out").join("poc-scal.png"));
    }

    #[test]
    fn test_plan_single_explicit_path() {
        let generator = Generator::new(TargetRelease::V3_0_1, ".");
        let jobs = generator
            .plan(&Selection::One("loop".into()), Some(Path::new("x/custom.bin")))
            .unwrap();
        assert_eq!(jobs[0].path, Path::new("x/custom.bin"));
    }

    #[test]
    fn test_plan_all_uses_output_as_directory() {
        let generator = Generator::new(TargetRelease::V3_0_0, ".");
        let jobs = generator.plan(&Selection::All, Some(Path::new("d"))).unwrap();
        let paths: Vec<_> = jobs.iter().map(|j| j.path.clone()).collect();
        assert_eq!(
            paths,
            vec![Path::new("d").join("poc-pplt.mng"), Path::new("d").join("poc-loop.mng")]
        );
    }

    #[test]
    fn test_plan_unknown_name() {
        let generator = Generator::new(TargetRelease::V3_0_1, ".");
        let err = generator.plan(&Selection::One("disc".into()), None).unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("valid choices: all, loop"));
    }

    #[test]
    fn test_run_reports_each_job_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(TargetRelease::V3_0_0, dir.path());
        let mut events = Vec::new();
        let generated = generator
            .generate_with(&Selection::All, None, |progress| match progress {
                Progress::Started(job) => events.push(format!("start {}", job.scenario.name)),
                Progress::Finished(file) => events.push(format!("done {}", file.name)),
            })
            .unwrap();

        assert_eq!(generated.len(), 2);
        assert_eq!(events, vec!["start pplt", "done pplt", "start loop", "done loop"]);
    }

    #[test]
    fn test_run_stops_reporting_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("x.mng");
        let generator = Generator::new(TargetRelease::V3_0_1, dir.path());
        let jobs = generator
            .plan(&Selection::One("loop".into()), Some(target.as_path()))
            .unwrap();

        let mut finished = 0;
        let err = generator
            .run(&jobs, false, |progress| {
                if let Progress::Finished(_) = progress {
                    finished += 1;
                }
            })
            .unwrap_err();
        assert!(matches!(err, PocError::Write { .. }));
        assert_eq!(finished, 0);
    }

    #[test]
    fn test_from_config_prefix() {
        let mut config = GeneratorConfig::default();
        config.output.file_prefix = "case".into();
        config.target.release = TargetRelease::V2_4_0;
        let generator = Generator::from_config(&config);
        let jobs = generator.plan(&Selection::One("drop".into()), None).unwrap();
        assert_eq!(jobs[0].path, Path::new(".").join("case-drop.mng"));
    }
}
