//! Sample upstream rows, shaped like the REST backend's tables.

use fleetdash_app::ports::Record;
use serde_json::json;

/// `(id, model, plate, type, status, location, last user)`
const VEHICLES: [(u64, &str, &str, &str, &str, &str, &str); 19] = [
    (1, "Land Rover Defender", "BG2795-VO", "SUV", "available", "Main Office", "John Doe"),
    (2, "Volvo XC60", "BG2765-RL", "SUV", "booked", "Site A", "Maria Silva"),
    (3, "Volvo XC60", "BG1671-TO", "SUV", "available", "Main Office", ""),
    (4, "Ford Kuga", "BG2779-DS", "SUV", "booked", "Site B", "Carlos Santos"),
    (5, "Ford Kuga", "BG2779-DZ", "SUV", "available", "Main Office", ""),
    (6, "Ford Puma", "BG2900-I", "Compact SUV", "available", "Main Office", ""),
    (7, "Land Rover Discovery", "BG2051-ON", "SUV", "booked", "Site C", "Ana Costa"),
    (8, "Smart", "BG2792-GB", "City Car", "available", "Main Office", ""),
    (9, "Jeep Renegade", "BG1665-HC", "SUV", "available", "Main Office", ""),
    (10, "Jeep Renegade", "BG2198-EP", "SUV", "booked", "Site D", "Pedro Alves"),
    (11, "Dacia Duster", "BG1645-XB", "SUV", "available", "Main Office", ""),
    (12, "Dacia Duster", "BG2387-IM", "SUV", "available", "Main Office", ""),
    (13, "Dacia Sandero", "BG1645-XC", "Sedan", "available", "Main Office", ""),
    (14, "Fiat Panda", "BG1996-FG", "City Car", "available", "Main Office", ""),
    (15, "Ford Transit Kombi", "BG2380-TN", "Van", "booked", "Site E", "Sofia Lima"),
    (16, "VW T-Roc", "BG1822-TD", "Compact SUV", "available", "Main Office", ""),
    (17, "Jeep Renegade", "BG1665-HB", "SUV", "available", "Main Office", ""),
    (18, "Jeep Renegade", "BG1818-ZT", "SUV", "available", "Main Office", ""),
    (19, "Jeep Renegade", "BG1818-ZU", "SUV", "available", "Main Office", ""),
];

const PROJECTS: [(u64, &str, u32); 9] = [
    (1, "Northern Highway Project", 150),
    (2, "Bridge Renovation", 100),
    (3, "Asset Survey Q1", 50),
    (4, "New Site Development", 200),
    (5, "Equipment Transport", 120),
    (6, "Permit Site Visit", 80),
    (7, "Executive Review", 30),
    (8, "Southern Expansion", 180),
    (9, "Infrastructure Upgrade", 110),
];

pub(crate) fn vehicles() -> Vec<Record> {
    let mut rows: Vec<_> = VEHICLES
        .iter()
        .map(|&(id, model, plate, kind, status, location, last_user)| {
            json!({
                "id": id,
                "model": model,
                "plate": plate,
                "type": kind,
                "status": status,
                "location": location,
                "last_user": last_user,
            })
        })
        .collect();
    rows.sort_by(|a, b| a["plate"].as_str().cmp(&b["plate"].as_str()));
    rows
}

pub(crate) fn projects() -> Vec<Record> {
    PROJECTS
        .iter()
        .map(|&(id, name, km_per_day)| json!({ "id": id, "name": name, "km_per_day": km_per_day }))
        .collect()
}

/// Ordered by start date; projects are referenced by name.
pub(crate) fn reservations() -> Vec<Record> {
    let mut rows = vec![
        json!({
            "id": 1, "vehicle_id": 2, "booker_name": "Maria Silva",
            "sector": "Engineering - Design", "project": "Northern Highway Project",
            "start_date": "2026-01-11T09:00", "end_date": "2026-01-13T17:00",
            "notes": "Site inspection", "status": "approved",
            "approved_by": "John Smith", "approved_at": "2026-01-10T14:30",
        }),
        json!({
            "id": 2, "vehicle_id": 4, "booker_name": "Carlos Santos",
            "sector": "Engineering - Construction", "project": "Bridge Renovation",
            "start_date": "2026-01-10T08:00", "end_date": "2026-01-14T18:00",
            "notes": "Construction site visits", "status": "approved",
            "approved_by": "John Smith", "approved_at": "2026-01-09T16:00",
        }),
        json!({
            "id": 3, "vehicle_id": 7, "booker_name": "Ana Costa",
            "sector": "Asset Management & Logistics - AM", "project": "Asset Survey Q1",
            "start_date": "2026-01-11T10:00", "end_date": "2026-01-12T16:00",
            "notes": "Equipment inspection", "status": "approved",
            "approved_by": "John Smith", "approved_at": "2026-01-10T09:15",
        }),
        json!({
            "id": 4, "vehicle_id": 10, "booker_name": "Pedro Alves",
            "sector": "Development", "project": "New Site Development",
            "start_date": "2026-01-09T08:00", "end_date": "2026-01-15T17:00",
            "notes": "Week-long site evaluation", "status": "approved",
            "approved_by": "John Smith", "approved_at": "2026-01-08T11:00",
        }),
        json!({
            "id": 5, "vehicle_id": 15, "booker_name": "Sofia Lima",
            "sector": "Asset Management & Logistics - Logistics", "project": "Equipment Transport",
            "start_date": "2026-01-11T07:00", "end_date": "2026-01-11T19:00",
            "notes": "Transporting materials", "status": "approved",
            "approved_by": "John Smith", "approved_at": "2026-01-10T08:00",
        }),
        json!({
            "id": 6, "vehicle_id": 1, "booker_name": "Ricardo Mendes",
            "sector": "Engineering - Permitting", "project": "Permit Site Visit",
            "start_date": "2026-01-14T09:00", "end_date": "2026-01-14T15:00",
            "status": "pending",
        }),
        json!({
            "id": 7, "vehicle_id": 3, "booker_name": "Luisa Torres",
            "sector": "Management", "project": "Executive Review",
            "start_date": "2026-01-16T10:00", "end_date": "2026-01-17T14:00",
            "status": "pending",
        }),
    ];
    rows.sort_by(|a, b| a["start_date"].as_str().cmp(&b["start_date"].as_str()));
    rows
}
