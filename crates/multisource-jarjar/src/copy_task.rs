use std::path::{Path, PathBuf};

use multisource_util::errors::MultisourceError;

/// Where an archive is written: `<destination_dir>/<base>-<version>[-<classifier>].<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveNaming {
    pub destination_dir: PathBuf,
    pub base_name: String,
    pub version: String,
    /// Empty for no classifier.
    pub classifier: String,
    pub extension: String,
}

impl ArchiveNaming {
    pub fn new(
        destination_dir: impl Into<PathBuf>,
        base_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            destination_dir: destination_dir.into(),
            base_name: base_name.into(),
            version: version.into(),
            classifier: String::new(),
            extension: "jar".to_string(),
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = classifier.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn file_name(&self) -> String {
        let mut name = format!("{}-{}", self.base_name, self.version);
        if !self.classifier.is_empty() {
            name.push('-');
            name.push_str(&self.classifier);
        }
        format!("{name}.{}", self.extension)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.destination_dir.join(self.file_name())
    }

    /// Copy `input` to [`Self::archive_path`], replacing any existing file.
    pub fn copy_from(&self, input: &Path) -> miette::Result<PathBuf> {
        let out = self.archive_path();
        multisource_util::fs::ensure_dir(&self.destination_dir).map_err(MultisourceError::Io)?;
        if same_file(input, &out) {
            return Err(MultisourceError::Archive {
                message: format!("Cannot copy {} onto itself", input.display()),
            }
            .into());
        }
        std::fs::copy(input, &out).map_err(|e| MultisourceError::Archive {
            message: format!(
                "Failed to copy {} to {}: {e}",
                input.display(),
                out.display()
            ),
        })?;
        tracing::debug!("copied {} to {}", input.display(), out.display());
        Ok(out)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
