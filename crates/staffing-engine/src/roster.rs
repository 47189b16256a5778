//! Input tables: open positions and the candidate pool.
//!
//! Both types are plain snapshots of one row of the corresponding table.
//! Serde renames map the table's column headers when the `serde` feature is
//! enabled, so CSV rows deserialize directly into them.

/// One open position to fill.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    /// Role name, unique across the jobs table
    #[cfg_attr(feature = "serde", serde(rename = "Job"))]
    pub name: String,
    /// Required minimum average English proficiency (0-100)
    #[cfg_attr(feature = "serde", serde(rename = "English"))]
    pub english_min: u32,
    /// Required minimum average Italian proficiency (0-100)
    #[cfg_attr(feature = "serde", serde(rename = "Italian"))]
    pub italian_min: u32,
    /// Seats to fill, exactly
    #[cfg_attr(feature = "serde", serde(rename = "Number"))]
    pub headcount: u32,
}

/// One applicant. A candidate is eligible only for the job whose name
/// matches `role`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Candidate name, unique within one solve
    #[cfg_attr(feature = "serde", serde(rename = "Name"))]
    pub name: String,
    /// Yearly salary demanded
    #[cfg_attr(feature = "serde", serde(rename = "Salary"))]
    pub salary: f64,
    /// The single role this candidate may hold
    #[cfg_attr(feature = "serde", serde(rename = "Role"))]
    pub role: String,
    /// English proficiency score (0-100)
    #[cfg_attr(feature = "serde", serde(rename = "English"))]
    pub english: u32,
    /// Italian proficiency score (0-100)
    #[cfg_attr(feature = "serde", serde(rename = "Italian"))]
    pub italian: u32,
}

impl Job {
    pub fn new(name: impl Into<String>, english_min: u32, italian_min: u32, headcount: u32) -> Self {
        Self {
            name: name.into(),
            english_min,
            italian_min,
            headcount,
        }
    }
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        salary: f64,
        role: impl Into<String>,
        english: u32,
        italian: u32,
    ) -> Self {
        Self {
            name: name.into(),
            salary,
            role: role.into(),
            english,
            italian,
        }
    }
}
