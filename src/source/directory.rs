use crate::source::{Attachment, AttachmentSource};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Attachment patterns used when the configuration names none.
pub const DEFAULT_PATTERNS: &[&str] = &["*.pdf", "*.txt"];

/// Attachments saved to a drop directory.
///
/// Files at the top level have no known sender. Files inside a
/// sub-directory belong to the sender named by that sub-directory, so a
/// mail rule saving `reports@club.example` attachments to
/// `<dir>/reports@club.example/` makes the sender filter work.
#[derive(Debug)]
pub struct DirectorySource {
    dir: PathBuf,
    patterns: GlobSet,
}

impl DirectorySource {
    /// Create a source over `dir` accepting file names matching any of `patterns`.
    pub fn new(dir: impl Into<PathBuf>, patterns: &[String]) -> Result<Self, String> {
        let mut builder = GlobSetBuilder::new();
        if patterns.is_empty() {
            for pattern in DEFAULT_PATTERNS {
                builder.add(compile_pattern(pattern)?);
            }
        } else {
            for pattern in patterns {
                builder.add(compile_pattern(pattern)?);
            }
        }
        let patterns = builder
            .build()
            .map_err(|error| format!("failed to build attachment patterns: {error}"))?;

        Ok(Self {
            dir: dir.into(),
            patterns,
        })
    }

    fn collect(&self, dir: &Path, sender: Option<&str>) -> Result<Vec<Attachment>, String> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)
            .map_err(|error| format!("failed reading directory '{}': {error}", dir.display()))?
        {
            let entry = entry.map_err(|error| format!("failed reading directory entry: {error}"))?;
            let path = entry.path();
            if path.is_file() && self.accepts(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .into_iter()
            .map(|path| {
                let bytes = fs::read(&path).map_err(|error| {
                    format!("failed to read attachment '{}': {error}", path.display())
                })?;
                Ok(Attachment {
                    name: file_name(&path),
                    sender: sender.map(str::to_owned),
                    bytes,
                })
            })
            .collect()
    }

    fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.patterns.is_match(Path::new(name)))
    }

    fn sender_dirs(&self) -> Result<Vec<(String, PathBuf)>, String> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|error| {
            format!("failed reading directory '{}': {error}", self.dir.display())
        })? {
            let entry = entry.map_err(|error| format!("failed reading directory entry: {error}"))?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push((file_name(&path), path));
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

impl AttachmentSource for DirectorySource {
    fn fetch(&self, sender: Option<&str>) -> Result<Vec<Attachment>, String> {
        if !self.dir.is_dir() {
            return Err(format!("'{}' is not a directory", self.dir.display()));
        }

        let sender_dirs = self.sender_dirs()?;
        match sender {
            // Mail addresses compare case-insensitively.
            Some(sender) => match sender_dirs
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(sender))
            {
                Some((name, path)) => self.collect(path, Some(name)),
                None => Ok(Vec::new()),
            },
            None => {
                let mut attachments = self.collect(&self.dir, None)?;
                for (name, path) in &sender_dirs {
                    attachments.extend(self.collect(path, Some(name))?);
                }
                Ok(attachments)
            }
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<Glob, String> {
    Glob::new(pattern).map_err(|error| format!("invalid attachment pattern '{pattern}': {error}"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(OsStr::to_str)
        .map(str::to_owned)
        .unwrap_or_else(|| path.display().to_string())
}
