//! Bundled demo dataset
//!
//! Served whenever the backend is unreachable so the app keeps working
//! offline. Ids are stable (`prov-001`, `hosp-001`, ...) and the data is
//! deliberately small but varied enough to exercise every filter.

use crate::models::{Hospital, Pharmacy, Provider};

#[derive(Debug, Clone)]
pub struct BundledData {
    pub providers: Vec<Provider>,
    pub hospitals: Vec<Hospital>,
    pub pharmacies: Vec<Pharmacy>,
    pub specialties: Vec<String>,
}

impl BundledData {
    pub fn new() -> Self {
        Self {
            providers: providers(),
            hospitals: hospitals(),
            pharmacies: pharmacies(),
            specialties: specialties(),
        }
    }
}

impl Default for BundledData {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_arguments)]
fn provider(
    id: &str,
    npi: &str,
    first: &str,
    last: &str,
    specialties: &[&str],
    hospital: Option<(&str, &str)>,
    score: Option<u8>,
    distance: Option<f64>,
    conditions: &[&str],
    symptoms: &[&str],
    lat: f64,
    lng: f64,
) -> Provider {
    Provider {
        id: id.to_string(),
        npi: npi.to_string(),
        name: format!("Dr. {} {}", first, last),
        first_name: first.to_string(),
        last_name: last.to_string(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        hospital_id: hospital.map(|(h, _)| h.to_string()),
        hospital_name: hospital.map(|(_, n)| n.to_string()),
        hcahps_score: score,
        lat,
        lng,
        distance,
        conditions: conditions.iter().map(|s| s.to_string()).collect(),
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        phone: None,
        address: None,
    }
}

fn providers() -> Vec<Provider> {
    vec![
        provider(
            "prov-001",
            "1740283947",
            "Sarah",
            "Chen",
            &["Cardiology"],
            Some(("hosp-001", "Metro General Hospital")),
            Some(95),
            Some(2.3),
            &["hypertension", "arrhythmia"],
            &["chest pain", "shortness of breath", "palpitations"],
            33.4520,
            -112.0690,
        ),
        provider(
            "prov-002",
            "1528374650",
            "Michael",
            "Torres",
            &["Cardiology"],
            Some(("hosp-002", "City Medical Center")),
            Some(78),
            Some(4.1),
            &["heart failure"],
            &["chest pain", "dizziness", "fatigue"],
            33.4610,
            -112.0550,
        ),
        provider(
            "prov-003",
            "1639485761",
            "Emily",
            "Watson",
            &["Dermatology"],
            Some(("hosp-002", "City Medical Center")),
            Some(91),
            Some(3.0),
            &["eczema", "psoriasis"],
            &["rash", "itching"],
            33.4405,
            -112.0812,
        ),
        provider(
            "prov-004",
            "1847596031",
            "James",
            "Okafor",
            &["Cardiology", "Internal Medicine"],
            Some(("hosp-003", "University Health System")),
            Some(88),
            Some(15.2),
            &["coronary artery disease"],
            &["chest pain", "fatigue"],
            33.3080,
            -111.9210,
        ),
        provider(
            "prov-005",
            "1950384726",
            "Lisa",
            "Park",
            &["Neurology"],
            Some(("hosp-001", "Metro General Hospital")),
            Some(85),
            Some(1.8),
            &["migraine", "epilepsy"],
            &["headache", "numbness", "dizziness"],
            33.4490,
            -112.0701,
        ),
        provider(
            "prov-006",
            "1061728394",
            "Robert",
            "Kim",
            &["Cardiology"],
            Some(("hosp-004", "Westside Community Hospital")),
            Some(82),
            Some(8.9),
            &["chronic chest pain", "coronary artery disease"],
            &["palpitations", "swelling"],
            33.5102,
            -112.1340,
        ),
        provider(
            "prov-007",
            "1273849506",
            "Anna",
            "Novak",
            &["Orthopedics"],
            Some(("hosp-004", "Westside Community Hospital")),
            Some(89),
            Some(5.5),
            &["osteoarthritis"],
            &["joint pain", "back pain", "stiffness"],
            33.4950,
            -112.1105,
        ),
        provider(
            "prov-008",
            "1384950617",
            "David",
            "Singh",
            &["Pulmonology"],
            Some(("hosp-003", "University Health System")),
            Some(93),
            Some(6.7),
            &["asthma", "copd"],
            &["shortness of breath", "cough", "chest pain"],
            33.4203,
            -112.0097,
        ),
        provider(
            "prov-009",
            "1495061728",
            "Maria",
            "Gonzalez",
            &["Family Medicine"],
            Some(("hosp-005", "Desert Valley Medical")),
            None,
            Some(3.2),
            &["diabetes", "hypertension"],
            &["fever", "chest pain", "sore throat"],
            33.4388,
            -112.0666,
        ),
        provider(
            "prov-010",
            "1506172839",
            "Thomas",
            "Lee",
            &["Cardiology"],
            Some(("hosp-005", "Desert Valley Medical")),
            Some(90),
            None,
            &["valvular disease"],
            &["chest pain"],
            33.4791,
            -112.0440,
        ),
    ]
}

fn hospital(
    id: &str,
    cms_id: &str,
    name: &str,
    address: &str,
    zip: &str,
    score: u8,
    lat: f64,
    lng: f64,
    affiliated: u32,
    beds: Option<u32>,
    emergency: bool,
) -> Hospital {
    Hospital {
        id: id.to_string(),
        cms_id: cms_id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        city: "Phoenix".to_string(),
        state: "AZ".to_string(),
        zip_code: zip.to_string(),
        hcahps_score: score,
        lat,
        lng,
        phone: None,
        about: None,
        affiliated_providers: affiliated,
        bed_count: beds,
        emergency_services: emergency,
    }
}

fn hospitals() -> Vec<Hospital> {
    vec![
        hospital(
            "hosp-001",
            "030101",
            "Metro General Hospital",
            "123 Medical Plaza",
            "85004",
            87,
            33.4510,
            -112.0700,
            45,
            Some(520),
            true,
        ),
        hospital(
            "hosp-002",
            "030102",
            "City Medical Center",
            "456 Health Avenue",
            "85008",
            92,
            33.4602,
            -112.0560,
            62,
            Some(680),
            true,
        ),
        hospital(
            "hosp-003",
            "030103",
            "University Health System",
            "789 University Boulevard",
            "85281",
            78,
            33.4180,
            -111.9350,
            38,
            Some(450),
            true,
        ),
        hospital(
            "hosp-004",
            "030104",
            "Westside Community Hospital",
            "321 Community Drive",
            "85035",
            85,
            33.5090,
            -112.1310,
            24,
            Some(210),
            false,
        ),
        hospital(
            "hosp-005",
            "030105",
            "Desert Valley Medical",
            "654 Desert Way",
            "85016",
            90,
            33.4800,
            -112.0450,
            31,
            None,
            true,
        ),
    ]
}

fn pharmacy(
    id: &str,
    name: &str,
    chain: Option<&str>,
    address: &str,
    zip: &str,
    hours: &str,
    distance: f64,
    all_night: bool,
    lat: f64,
    lng: f64,
) -> Pharmacy {
    Pharmacy {
        id: id.to_string(),
        name: name.to_string(),
        chain: chain.map(|c| c.to_string()),
        address: address.to_string(),
        city: "Phoenix".to_string(),
        state: "AZ".to_string(),
        zip_code: zip.to_string(),
        lat,
        lng,
        phone: None,
        hours: Some(hours.to_string()),
        distance: Some(distance),
        is_24_hour: all_night,
    }
}

fn pharmacies() -> Vec<Pharmacy> {
    vec![
        pharmacy(
            "pharm-001",
            "Central Pharmacy",
            Some("WellCare"),
            "100 Main Street",
            "85004",
            "8am-10pm",
            0.8,
            false,
            33.4495,
            -112.0712,
        ),
        pharmacy(
            "pharm-002",
            "Night Owl Drugs",
            None,
            "215 Camelback Road",
            "85013",
            "24 hours",
            2.1,
            true,
            33.5093,
            -112.0745,
        ),
        pharmacy(
            "pharm-003",
            "Valley Rx",
            Some("WellCare"),
            "980 7th Avenue",
            "85007",
            "9am-9pm",
            3.4,
            false,
            33.4530,
            -112.0830,
        ),
        pharmacy(
            "pharm-004",
            "Desert Compounding",
            None,
            "44 McDowell Road",
            "85003",
            "9am-6pm",
            4.9,
            false,
            33.4660,
            -112.0740,
        ),
    ]
}

fn specialties() -> Vec<String> {
    [
        "Cardiology",
        "Dermatology",
        "Family Medicine",
        "Gastroenterology",
        "Internal Medicine",
        "Neurology",
        "Obstetrics & Gynecology",
        "Oncology",
        "Orthopedics",
        "Pediatrics",
        "Psychiatry",
        "Pulmonology",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
