//! The booking catalog: services and their options, add-ons, visit
//! frequencies and bookable time slots.
//!
//! Prices are whole Singapore dollars. The catalog is compiled in; the
//! `services` table seeded by `cleanpro-db` is a separate, admin-facing
//! record of the same offering and is not consulted when pricing a booking.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A variant of a service with a signed price adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceOption {
    pub id: &'static str,
    pub name: &'static str,
    /// Added to the service base price; may be negative.
    pub price_delta: i64,
}

/// A bookable cleaning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_price: i64,
    pub options: &'static [ServiceOption],
}

/// A flat-fee supplement selectable independently of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddOn {
    pub id: &'static str,
    pub name: &'static str,
    pub price: i64,
}

/// How often the visit repeats, with the percentage discount it earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frequency {
    pub id: &'static str,
    pub name: &'static str,
    pub discount_percent: u8,
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

pub static SERVICES: &[Service] = &[
    Service {
        id: "residential",
        name: "Residential Cleaning",
        description: "Regular house cleaning for homes and apartments",
        base_price: 80,
        options: &[
            ServiceOption { id: "basic", name: "Basic Clean", price_delta: 0 },
            ServiceOption { id: "deep", name: "Deep Clean", price_delta: 50 },
            ServiceOption { id: "moveout", name: "Move-in/out Clean", price_delta: 70 },
        ],
    },
    Service {
        id: "commercial",
        name: "Commercial Cleaning",
        description: "Professional office and commercial space cleaning",
        base_price: 120,
        options: &[
            ServiceOption { id: "daily", name: "Daily Maintenance", price_delta: 0 },
            ServiceOption { id: "weekly", name: "Weekly Service", price_delta: -20 },
            ServiceOption { id: "monthly", name: "Monthly Deep Clean", price_delta: 30 },
        ],
    },
    Service {
        id: "deep",
        name: "Deep Cleaning",
        description: "Comprehensive deep cleaning and sanitization",
        base_price: 150,
        options: &[
            ServiceOption { id: "standard", name: "Standard Deep Clean", price_delta: 0 },
            ServiceOption { id: "postreno", name: "Post-Renovation", price_delta: 100 },
            ServiceOption { id: "disinfect", name: "Disinfection Service", price_delta: 50 },
        ],
    },
];

pub static ADD_ONS: &[AddOn] = &[
    AddOn { id: "fridge", name: "Inside Fridge Cleaning", price: 25 },
    AddOn { id: "oven", name: "Inside Oven Cleaning", price: 30 },
    AddOn { id: "windows", name: "Window Cleaning", price: 40 },
    AddOn { id: "balcony", name: "Balcony Cleaning", price: 20 },
    AddOn { id: "laundry", name: "Laundry Service", price: 35 },
];

pub static FREQUENCIES: &[Frequency] = &[
    Frequency { id: "once", name: "One-time", discount_percent: 0 },
    Frequency { id: "weekly", name: "Weekly", discount_percent: 10 },
    Frequency { id: "biweekly", name: "Bi-weekly", discount_percent: 5 },
    Frequency { id: "monthly", name: "Monthly", discount_percent: 0 },
];

/// Frequency preselected when a checkout starts.
pub const DEFAULT_FREQUENCY_ID: &str = "once";

pub static TIME_SLOTS: &[&str] = &[
    "8:00 AM", "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM",
    "4:00 PM", "5:00 PM", "6:00 PM",
];

/// Smallest selectable bedroom / bathroom count.
pub const MIN_ROOMS: u8 = 1;
/// Largest selectable bedroom / bathroom count.
pub const MAX_ROOMS: u8 = 6;

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn find_service(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.id == id)
}

/// Find an option of a specific service.
///
/// Option ids are only unique within their service (`"weekly"` is both a
/// commercial option and a frequency), so the service must be given.
pub fn find_option(service_id: &str, option_id: &str) -> Option<&'static ServiceOption> {
    find_service(service_id)?
        .options
        .iter()
        .find(|o| o.id == option_id)
}

pub fn find_add_on(id: &str) -> Option<&'static AddOn> {
    ADD_ONS.iter().find(|a| a.id == id)
}

pub fn find_frequency(id: &str) -> Option<&'static Frequency> {
    FREQUENCIES.iter().find(|f| f.id == id)
}

pub fn is_valid_time_slot(slot: &str) -> bool {
    TIME_SLOTS.contains(&slot)
}

/// The whole catalog in one serializable value, for the booking page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Catalog {
    pub services: &'static [Service],
    pub add_ons: &'static [AddOn],
    pub frequencies: &'static [Frequency],
    pub time_slots: &'static [&'static str],
    pub default_frequency_id: &'static str,
    pub min_rooms: u8,
    pub max_rooms: u8,
}

pub fn catalog() -> Catalog {
    Catalog {
        services: SERVICES,
        add_ons: ADD_ONS,
        frequencies: FREQUENCIES,
        time_slots: TIME_SLOTS,
        default_frequency_id: DEFAULT_FREQUENCY_ID,
        min_rooms: MIN_ROOMS,
        max_rooms: MAX_ROOMS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_lookup() {
        assert_eq!(find_service("residential").unwrap().base_price, 80);
        assert!(find_service("window-washing").is_none());
    }

    #[test]
    fn option_must_belong_to_service() {
        assert_eq!(find_option("residential", "deep").unwrap().price_delta, 50);
        assert_eq!(find_option("commercial", "weekly").unwrap().price_delta, -20);
        // "deep" is a residential option, not a commercial one.
        assert!(find_option("commercial", "deep").is_none());
        assert!(find_option("nope", "basic").is_none());
    }

    #[test]
    fn every_service_has_a_zero_delta_option() {
        for service in SERVICES {
            assert!(
                service.options.iter().any(|o| o.price_delta == 0),
                "{} has no included option",
                service.id
            );
        }
    }

    #[test]
    fn default_frequency_exists_and_is_undiscounted() {
        let f = find_frequency(DEFAULT_FREQUENCY_ID).unwrap();
        assert_eq!(f.discount_percent, 0);
    }

    #[test]
    fn time_slots_run_hourly_eight_to_six() {
        assert_eq!(TIME_SLOTS.len(), 11);
        assert!(is_valid_time_slot("8:00 AM"));
        assert!(is_valid_time_slot("6:00 PM"));
        assert!(!is_valid_time_slot("7:00 PM"));
        assert!(!is_valid_time_slot("08:00"));
    }

    #[test]
    fn add_on_lookup() {
        assert_eq!(find_add_on("windows").unwrap().price, 40);
        assert!(find_add_on("garage").is_none());
    }
}
