use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::output::{OutputError, ensure_output_dir, output_path, write_courses};
use crate::scraper::WebScraper;
use crate::types::UnitCode;

pub const DEFAULT_OUTPUT_DIR: &str = "bu_courses";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Written { path: PathBuf, courses: usize },
    Empty,
    WriteFailed,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub units: Vec<(UnitCode, UnitOutcome)>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.units
            .iter()
            .filter(|(_, o)| matches!(o, UnitOutcome::Written { .. }))
            .count()
    }

    pub fn total_courses(&self) -> usize {
        self.units
            .iter()
            .map(|(_, o)| match o {
                UnitOutcome::Written { courses, .. } => *courses,
                _ => 0,
            })
            .sum()
    }

    pub fn outcome(&self, unit: &UnitCode) -> Option<&UnitOutcome> {
        self.units.iter().find(|(u, _)| u == unit).map(|(_, o)| o)
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let empty = self
            .units
            .iter()
            .filter(|(_, o)| *o == UnitOutcome::Empty)
            .count();
        let failed = self
            .units
            .iter()
            .filter(|(_, o)| *o == UnitOutcome::WriteFailed)
            .count();

        writeln!(f, "\nSummary:")?;
        writeln!(f, "  Units with output:   {}", self.written())?;
        writeln!(f, "  Units without data:  {}", empty)?;
        writeln!(f, "  Units failed:        {}", failed)?;
        writeln!(f, "  Courses written:     {}", self.total_courses())
    }
}

/// Scrapes each unit in turn and writes one CSV per unit that has courses.
///
/// Only failing to create `output_dir` aborts the batch. A unit whose file
/// cannot be written is recorded as [`UnitOutcome::WriteFailed`].
pub async fn run_all(
    scraper: &WebScraper,
    units: &[UnitCode],
    output_dir: &Path,
) -> Result<BatchReport, OutputError> {
    ensure_output_dir(output_dir)?;

    let mut report = BatchReport::default();

    for unit in units {
        log::info!("Starting to scrape {} courses...", unit);

        let courses = scraper.scrape_unit(unit).await;

        let outcome = if courses.is_empty() {
            log::info!("No courses found for {}", unit);
            UnitOutcome::Empty
        } else {
            let path = output_path(output_dir, unit);
            match write_courses(&path, &courses) {
                Ok(()) => {
                    log::info!("Completed {}! Found {} courses.", unit, courses.len());
                    log::info!("Data saved to '{}'", path.display());
                    UnitOutcome::Written {
                        path,
                        courses: courses.len(),
                    }
                }
                Err(e) => {
                    log::error!("Failed to save {} courses to '{}': {}", unit, path.display(), e);
                    UnitOutcome::WriteFailed
                }
            }
        };

        report.units.push((unit.clone(), outcome));
    }

    Ok(report)
}
