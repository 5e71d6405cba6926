//! Minimatch-style file filtering.

use artifact_core::ArtifactStoreError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Include/exclude glob filter over artifact-relative paths.
///
/// Patterns starting with `!` exclude; all others include. With no include
/// patterns every file not excluded matches. `*` does not cross `/`; `**`
/// does.
#[derive(Debug)]
pub struct PatternFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl PatternFilter {
    /// Compile a filter from a pattern list.
    pub fn new(patterns: &[String]) -> Result<Self, ArtifactStoreError> {
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
            match pattern.strip_prefix('!') {
                Some(negated) => exclude.push(negated.trim_start()),
                None => include.push(pattern),
            }
        }

        Ok(Self {
            include: build_globset(&include)?,
            exclude: build_globset(&exclude)?,
        })
    }

    /// Check a `/`-separated path relative to the artifact root.
    pub fn is_match(&self, relative_path: &str) -> bool {
        if self
            .exclude
            .as_ref()
            .is_some_and(|exclude| exclude.is_match(relative_path))
        {
            return false;
        }

        self.include
            .as_ref()
            .is_none_or(|include| include.is_match(relative_path))
    }
}

fn build_globset(patterns: &[&str]) -> Result<Option<GlobSet>, ArtifactStoreError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| ArtifactStoreError::InvalidPattern {
                pattern: (*pattern).to_string(),
                message: e.to_string(),
            })?;
        builder.add(glob);
    }

    builder
        .build()
        .map(Some)
        .map_err(|e| ArtifactStoreError::InvalidPattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })
}
