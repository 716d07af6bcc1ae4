//! Request generation tokens.
//!
//! Every load for a region takes a ticket first; its response may only be
//! committed while that ticket is still the region's newest.

use std::collections::HashMap;

/// A part of the page filled by one kind of request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Patients,
    Surgeries,
    Doctors,
    OperatingRooms,
    Supplies,
    Notifications,
    DashboardPatients,
    DashboardSurgeries,
    DashboardSupplies,
    /// Whichever dialog was opened last
    Dialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    region: Region,
    generation: u64,
}

impl Ticket {
    pub fn region(&self) -> Region {
        self.region
    }
}

/// Newest generation issued per region.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: HashMap<Region, u64>,
}

impl RequestGenerations {
    /// Start a request, superseding any in flight for the same region.
    pub fn begin(&mut self, region: Region) -> Ticket {
        let generation = self.latest.entry(region).or_insert(0);
        *generation += 1;
        Ticket {
            region,
            generation: *generation,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.region) == Some(&ticket.generation)
    }
}
