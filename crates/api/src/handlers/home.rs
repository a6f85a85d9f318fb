//! Landing page content.
//!
//! Service cards quote their "from" price straight out of the booking
//! catalog so the two never disagree.

use axum::Json;
use cleanpro_core::catalog::{self, Service};
use cleanpro_core::pricing::Money;
use serde::Serialize;

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub hero: Hero,
    pub services: Vec<ServiceCard>,
    pub highlights: &'static [Highlight],
    pub contact: Contact,
    pub book_path: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Hero {
    pub badge: &'static str,
    pub headline: &'static str,
    pub subheadline: &'static str,
    pub stats: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct ServiceCard {
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub features: &'static [&'static str],
    /// Lowest bookable price for the service, e.g. `From S$80`.
    pub from_price: Money,
    pub call_to_action: String,
}

#[derive(Debug, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Contact {
    pub phone: &'static str,
    pub email: &'static str,
    pub whatsapp: &'static str,
}

const HIGHLIGHTS: &[Highlight] = &[
    Highlight {
        title: "Insured & Bonded",
        body: "All our cleaners are fully insured and background-checked for your peace of mind.",
    },
    Highlight {
        title: "Flexible Scheduling",
        body: "Book services that fit your schedule, including evenings and weekends.",
    },
    Highlight {
        title: "Quality Guarantee",
        body: "Not satisfied? We'll return within 24 hours to make it right, free of charge.",
    },
    Highlight {
        title: "Trained Professionals",
        body: "Our team undergoes rigorous training and uses eco-friendly cleaning products.",
    },
];

const RESIDENTIAL_FEATURES: &[&str] = &[
    "Weekly, bi-weekly, or monthly service",
    "Kitchen and bathroom deep clean",
    "Dusting and vacuuming",
    "Window and mirror cleaning",
];

const COMMERCIAL_FEATURES: &[&str] = &[
    "Daily office maintenance",
    "Restroom sanitization",
    "Floor care and carpet cleaning",
    "Waste management",
];

const NO_FEATURES: &[&str] = &[];

const DEEP_FEATURES: &[&str] = &[
    "Post-renovation cleanup",
    "Spring cleaning service",
    "Appliance deep clean",
    "Disinfection service",
];

fn card_copy(service_id: &str) -> (&'static str, &'static [&'static str]) {
    match service_id {
        "residential" => (
            "Regular house cleaning, deep cleaning, and move-in/out services for homes and apartments.",
            RESIDENTIAL_FEATURES,
        ),
        "commercial" => (
            "Professional office and commercial space cleaning services for businesses of all sizes.",
            COMMERCIAL_FEATURES,
        ),
        "deep" => (
            "Comprehensive deep cleaning service for thorough sanitization and detailed cleaning.",
            DEEP_FEATURES,
        ),
        _ => ("", NO_FEATURES),
    }
}

/// Cheapest option of a service, never below zero.
fn from_price(service: &Service) -> Money {
    let cheapest_delta = service
        .options
        .iter()
        .map(|o| o.price_delta)
        .min()
        .unwrap_or(0);
    Money::from_dollars(service.base_price + cheapest_delta).floor_zero()
}

fn service_cards() -> Vec<ServiceCard> {
    catalog::SERVICES
        .iter()
        .map(|service| {
            let (summary, features) = card_copy(service.id);
            let price = from_price(service);
            ServiceCard {
                id: service.id,
                name: service.name,
                summary,
                features,
                from_price: price,
                call_to_action: format!("From {price}"),
            }
        })
        .collect()
}

/// GET /
pub async fn home() -> Json<DataResponse<HomePage>> {
    Json(DataResponse {
        data: HomePage {
            brand: "CleanPro",
            tagline: "Singapore's trusted professional cleaning service provider since 2020.",
            hero: Hero {
                badge: "Serving All of Singapore",
                headline: "Professional Cleaning Made Simple",
                subheadline: "Book trusted cleaning professionals in Singapore with just a few clicks. \
                              Residential, commercial, and deep cleaning services available 7 days a week.",
                stats: &["4.9/5 Rating", "10,000+ Happy Customers", "Insured & Bonded"],
            },
            services: service_cards(),
            highlights: HIGHLIGHTS,
            contact: Contact {
                phone: "+65 1234 5678",
                email: "hello@cleanpro.sg",
                whatsapp: "+65 9876 5432",
            },
            book_path: "/api/v1/checkout",
        },
    })
}
