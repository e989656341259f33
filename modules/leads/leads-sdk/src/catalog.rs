//! Fixed choices offered by the intake form.
//!
//! Stored leads keep the submitted strings as-is; these lists only drive the
//! form and are not enforced on write.

pub const VISA_CATEGORIES: &[&str] = &["O-1", "EB-1A", "EB-2 NIW", "I don't know"];

pub const COUNTRIES: &[&str] = &[
    "United States",
    "Canada",
    "Mexico",
    "United Kingdom",
    "Germany",
    "France",
    "Italy",
    "Spain",
    "Netherlands",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
    "Switzerland",
    "Austria",
    "Belgium",
    "Ireland",
    "Portugal",
    "Greece",
    "Poland",
    "Czech Republic",
    "Hungary",
    "Romania",
    "Bulgaria",
    "Croatia",
    "Slovenia",
    "Slovakia",
    "Estonia",
    "Latvia",
    "Lithuania",
    "Australia",
    "New Zealand",
    "Japan",
    "South Korea",
    "Singapore",
    "Hong Kong",
    "Taiwan",
    "Israel",
    "Brazil",
    "Argentina",
    "Chile",
    "Colombia",
    "Peru",
    "Venezuela",
    "Uruguay",
    "Paraguay",
    "Ecuador",
    "Bolivia",
    "India",
    "China",
    "Russia",
    "Ukraine",
    "Turkey",
    "South Africa",
    "Egypt",
    "Nigeria",
    "Kenya",
    "Morocco",
    "Tunisia",
    "Algeria",
    "Other",
];
