use std::path::{Path, PathBuf};

use crate::types::{CourseRecord, UnitCode};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub fn output_path(output_dir: &Path, unit: &UnitCode) -> PathBuf {
    output_dir.join(format!("{}_courses.csv", unit.slug()))
}

pub fn ensure_output_dir(output_dir: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(output_dir).map_err(|source| OutputError::Io {
        path: output_dir.to_path_buf(),
        source,
    })
}

/// Writes `courses` as UTF-8 CSV with a `college,title,description` header,
/// replacing any existing file at `path`.
pub fn write_courses(path: &Path, courses: &[CourseRecord]) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_path(path)?;
    for course in courses {
        writer.serialize(course)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
