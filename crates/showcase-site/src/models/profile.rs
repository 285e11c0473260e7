//! Profile records: projects, certifications and career entries.

use serde::Serialize;

/// A delivered project.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Project {
    /// Unique identifier
    pub id: &'static str,

    pub name: &'static str,

    pub description: &'static str,

    /// Live site
    pub link: &'static str,

    /// Path of the demo video under the public assets
    pub video: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Certification {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,

    /// Verification page
    pub link: &'static str,

    /// Badge image path
    pub image: &'static str,
}

/// A position held.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct WorkExperience {
    pub id: &'static str,
    pub company: &'static str,
    pub title: &'static str,

    /// Start year
    pub start: &'static str,

    /// End year, or "Nu" while ongoing
    pub end: &'static str,
}

impl WorkExperience {
    pub fn is_current(&self) -> bool {
        self.end == crate::content::ONGOING
    }
}

/// A completed or ongoing education.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Study {
    pub id: &'static str,
    pub school: &'static str,
    pub title: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

impl Study {
    pub fn is_current(&self) -> bool {
        self.end == crate::content::ONGOING
    }
}

/// Blog post stub; only the listing exists.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BlogPost {
    pub uid: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}
