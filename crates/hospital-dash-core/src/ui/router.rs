//! Sidebar navigation between content sections.

use std::str::FromStr;

/// A content panel reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Patients,
    Surgeries,
    Doctors,
    OperatingRooms,
    MedicalSupplies,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Patients,
        Section::Surgeries,
        Section::Doctors,
        Section::OperatingRooms,
        Section::MedicalSupplies,
    ];

    /// Short name used in action arguments ("operating-rooms").
    pub fn slug(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Patients => "patients",
            Section::Surgeries => "surgeries",
            Section::Doctors => "doctors",
            Section::OperatingRooms => "operating-rooms",
            Section::MedicalSupplies => "medical-supplies",
        }
    }

    /// Sidebar link id ("nav-patients").
    pub fn nav_id(&self) -> String {
        format!("nav-{}", self.slug())
    }

    /// Content panel element id.
    pub fn content_id(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboardContent",
            Section::Patients => "patientsContent",
            Section::Surgeries => "surgeriesContent",
            Section::Doctors => "doctorsContent",
            Section::OperatingRooms => "operatingRoomsContent",
            Section::MedicalSupplies => "medicalSuppliesContent",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Patients => "Patients",
            Section::Surgeries => "Surgeries",
            Section::Doctors => "Doctors",
            Section::OperatingRooms => "Operating Rooms",
            Section::MedicalSupplies => "Medical Supplies",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Dashboard => "fa-tachometer-alt",
            Section::Patients => "fa-user-injured",
            Section::Surgeries => "fa-procedures",
            Section::Doctors => "fa-user-md",
            Section::OperatingRooms => "fa-hospital",
            Section::MedicalSupplies => "fa-medkit",
        }
    }
}

impl FromStr for Section {
    type Err = String;

    /// Accepts a slug ("patients"), a nav id ("nav-patients") or a content
    /// id ("patientsContent").
    fn from_str(target: &str) -> Result<Self, Self::Err> {
        let target = target.trim();
        let slug = target.strip_prefix("nav-").unwrap_or(target);
        Section::ALL
            .into_iter()
            .find(|s| s.slug() == slug || s.content_id() == target)
            .ok_or_else(|| format!("unknown section: {}", target))
    }
}

/// Tracks which panel is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionRouter {
    active: Section,
}

impl SectionRouter {
    /// Make `section` the only active panel and sidebar entry.
    ///
    /// Returns the section whose loader the caller must run.
    pub fn activate(&mut self, section: Section) -> Section {
        self.active = section;
        section
    }

    /// Resolve a raw target; `None` for unknown targets, leaving state alone.
    pub fn route(&mut self, target: &str) -> Option<Section> {
        let section = target.parse().ok()?;
        Some(self.activate(section))
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active == section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!("patients".parse::<Section>(), Ok(Section::Patients));
        assert_eq!("nav-operating-rooms".parse::<Section>(), Ok(Section::OperatingRooms));
        assert_eq!("medicalSuppliesContent".parse::<Section>(), Ok(Section::MedicalSupplies));
        assert!("nav-reports".parse::<Section>().is_err());
    }

    #[test]
    fn test_route_activates_single_section() {
        let mut router = SectionRouter::default();
        assert!(router.is_active(Section::Dashboard));

        assert_eq!(router.route("nav-surgeries"), Some(Section::Surgeries));
        assert!(router.is_active(Section::Surgeries));
        assert_eq!(
            Section::ALL.iter().filter(|s| router.is_active(**s)).count(),
            1
        );
    }

    #[test]
    fn test_unknown_target_is_noop() {
        let mut router = SectionRouter::default();
        router.activate(Section::Doctors);
        assert_eq!(router.route("settings"), None);
        assert_eq!(router.active(), Section::Doctors);
    }
}
