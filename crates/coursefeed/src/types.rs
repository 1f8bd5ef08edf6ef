use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Every academic unit with a public course listing, in batch order.
pub const DEFAULT_UNITS: [&str; 28] = [
    "bua", "cas", "cfa", "cgs", "com", "eng", "egs", "eop", "gms", "grs", "hub", "khc", "law",
    "med", "met", "otp", "pdp", "qst", "sar", "sed", "sdm", "sha", "sph", "ssw", "sth", "sum",
    "uni", "xrg",
];

#[derive(Debug, thiserror::Error)]
#[error("Invalid unit code '{0}'. Expected a short alphanumeric abbreviation such as 'cas'")]
pub struct UnitCodeParseError(String);

/// Short lowercase identifier of an academic unit (college or school).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitCode(String);

impl UnitCode {
    /// The lowercase form used in listing URLs and output file names.
    pub fn slug(&self) -> &str {
        &self.0
    }

    /// The uppercase form written to the `college` column.
    pub fn label(&self) -> String {
        self.0.to_uppercase()
    }

    pub fn defaults() -> Vec<UnitCode> {
        DEFAULT_UNITS
            .iter()
            .map(|code| UnitCode(code.to_string()))
            .collect()
    }
}

impl FromStr for UnitCode {
    type Err = UnitCodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(UnitCodeParseError(s.to_string()));
        }
        Ok(UnitCode(code))
    }
}

impl Display for UnitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub college: String,
    pub title: String,
    pub description: String,
}

impl CourseRecord {
    pub fn new(unit: &UnitCode, title: String, description: String) -> Self {
        Self {
            college: unit.label(),
            title,
            description,
        }
    }
}

impl Display for CourseRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.college, self.title)
    }
}

/// Number of listing pages a unit exposes, as read from its first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCount {
    /// No course list at all.
    Empty,
    /// A course list without a pagination control.
    Single,
    Paginated(u32),
}

impl PageCount {
    pub fn total(self) -> u32 {
        match self {
            PageCount::Empty => 0,
            PageCount::Single => 1,
            PageCount::Paginated(n) => n,
        }
    }
}

/// Courses parsed from one page plus the number of list items that had no title.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub courses: Vec<CourseRecord>,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_code_normalizes_case_and_whitespace() {
        let unit: UnitCode = "  CAS ".parse().expect("Should parse unit code");
        assert_eq!(unit.slug(), "cas");
        assert_eq!(unit.label(), "CAS");
        assert_eq!(unit.to_string(), "CAS");
    }

    #[test]
    fn test_unit_code_rejects_invalid_input() {
        assert!("".parse::<UnitCode>().is_err());
        assert!("   ".parse::<UnitCode>().is_err());
        assert!("ca/s".parse::<UnitCode>().is_err());
        assert!("../etc".parse::<UnitCode>().is_err());
    }

    #[test]
    fn test_defaults_cover_every_unit_in_order() {
        let units = UnitCode::defaults();
        assert_eq!(units.len(), 28);
        assert_eq!(units[0].slug(), "bua");
        assert_eq!(units[27].slug(), "xrg");
    }

    #[test]
    fn test_course_record_uses_uppercase_college() {
        let unit: UnitCode = "eng".parse().unwrap();
        let record = CourseRecord::new(&unit, "Statics".to_string(), String::new());
        assert_eq!(record.college, "ENG");
        assert_eq!(record.to_string(), "[ENG] Statics");
    }

    #[test]
    fn test_page_count_totals() {
        assert_eq!(PageCount::Empty.total(), 0);
        assert_eq!(PageCount::Single.total(), 1);
        assert_eq!(PageCount::Paginated(7).total(), 7);
    }
}
