//! # Scenario Catalog
//!
//! Read-only tables mapping a scenario name to a container family and chunk
//! list, grouped by the pngcheck release the files were written against.
//!
//! Payload literals here are facts about the external target (buffer sizes,
//! counts that overrun them) and are kept byte for byte.

mod scenarios;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::{Chunk, Container, ContainerFormat};
use crate::error::{PocError, Result};

/// Selection keyword that expands to every scenario of a release.
pub const ALL_SELECTION: &str = "all";

/// pngcheck release a scenario set targets.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetRelease {
    /// Unchecked `sz` in MNG handlers, sCAL null dereference
    V2_4_0,
    /// PPLT inverted index range, LOOP iteration count
    V3_0_0,
    /// LOOP iteration count
    #[default]
    V3_0_1,
}

impl TargetRelease {
    pub const ALL: [TargetRelease; 3] = [
        TargetRelease::V2_4_0,
        TargetRelease::V3_0_0,
        TargetRelease::V3_0_1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetRelease::V2_4_0 => "2.4.0",
            TargetRelease::V3_0_0 => "3.0.0",
            TargetRelease::V3_0_1 => "3.0.1",
        }
    }

    pub fn scenarios(self) -> &'static [Scenario] {
        match self {
            TargetRelease::V2_4_0 => scenarios::RELEASE_2_4_0,
            TargetRelease::V3_0_0 => scenarios::RELEASE_3_0_0,
            TargetRelease::V3_0_1 => scenarios::RELEASE_3_0_1,
        }
    }

    /// Valid selections for this release: `all` followed by every name.
    pub fn choices(self) -> Vec<&'static str> {
        std::iter::once(ALL_SELECTION)
            .chain(self.scenarios().iter().map(|s| s.name))
            .collect()
    }

    /// Look up a scenario by name.
    ///
    /// # Errors
    /// Returns `PocError::UnknownScenario` listing the valid choices.
    pub fn find(self, name: &str) -> Result<&'static Scenario> {
        self.scenarios()
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| PocError::UnknownScenario {
                name: name.to_string(),
                release: self.as_str().to_string(),
                choices: self.choices(),
            })
    }
}

impl fmt::Display for TargetRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetRelease {
    type Err = PocError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let version = trimmed.strip_prefix('v').unwrap_or(trimmed);
        TargetRelease::ALL
            .into_iter()
            .find(|r| r.as_str() == version)
            .ok_or_else(|| PocError::UnknownRelease(s.to_string()))
    }
}

/// One PoC: a named container reaching a specific defect.
pub struct Scenario {
    /// Selection key, e.g. `disc`
    pub name: &'static str,
    /// Chunk carrying the malicious payload, e.g. `DISC`
    pub chunk: &'static str,
    /// What goes wrong in the target
    pub summary: &'static str,
    pub format: ContainerFormat,
    /// pngcheck flags needed to reach the defective code path
    pub trigger: &'static [&'static str],
    build: fn() -> Result<Vec<Chunk>>,
}

impl Scenario {
    /// Assemble the chunk list. Built fresh on every call.
    pub fn chunks(&self) -> Result<Vec<Chunk>> {
        (self.build)()
    }

    pub fn container(&self) -> Result<Container> {
        Ok(Container::new(self.format).with_chunks(self.chunks()?))
    }

    /// `<prefix>-<name>.<ext>`
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{prefix}-{}.{}", self.name, self.format.extension())
    }

    /// Default file name with the standard `poc` prefix.
    pub fn default_file_name(&self) -> String {
        self.file_name(crate::config::DEFAULT_FILE_PREFIX)
    }

    /// Command line that reproduces the defect against `file`.
    pub fn command_hint(&self, file: &Path) -> String {
        let mut cmd = String::from("pngcheck");
        for flag in self.trigger {
            cmd.push(' ');
            cmd.push_str(flag);
        }
        cmd.push(' ');
        cmd.push_str(&file.display().to_string());
        cmd
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("chunk", &self.chunk)
            .field("format", &self.format)
            .field("trigger", &self.trigger)
            .finish()
    }
}
