//! Output persistence - one file per resource, failures isolated per group.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::assembler::ResourceDocument;
use crate::error::WriteError;
use crate::types::OutputFormat;

/// A file written for one resource.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    pub resource: String,
    pub path: PathBuf,
    pub schemas: usize,
}

/// A resource that could not be written.
#[derive(Debug, Clone, Serialize)]
pub struct WriteFailure {
    pub resource: String,
    pub message: String,
}

/// Outcome of writing a batch of resources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteReport {
    pub written: Vec<WrittenFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<WriteFailure>,
}

impl WriteReport {
    /// Returns true if every resource was written.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Create `dir` (and parents) if it doesn't exist yet.
pub fn ensure_dir(dir: &Path) -> Result<(), WriteError> {
    std::fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Render and write one resource into `dir`.
///
/// Returns the path of the written file.
pub fn write_resource(
    dir: &Path,
    resource: &ResourceDocument,
    format: OutputFormat,
) -> Result<PathBuf, WriteError> {
    ensure_dir(dir)?;

    let content = resource.render(format)?;
    let path = dir.join(resource.file_name(format));
    std::fs::write(&path, content).map_err(|source| WriteError::Write {
        resource: resource.resource.clone(),
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Write every resource into `dir`.
///
/// A failure for one resource is logged and recorded; the remaining
/// resources are still written.
pub fn write_all(dir: &Path, resources: &[ResourceDocument], format: OutputFormat) -> WriteReport {
    let mut report = WriteReport::default();

    for resource in resources {
        match write_resource(dir, resource, format) {
            Ok(path) => {
                info!(resource = %resource.resource, path = %path.display(), "wrote resource");
                report.written.push(WrittenFile {
                    resource: resource.resource.clone(),
                    path,
                    schemas: resource.schema_count(),
                });
            }
            Err(e) => {
                warn!(resource = %resource.resource, error = %e, "failed to write resource");
                report.failures.push(WriteFailure {
                    resource: resource.resource.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    report
}
