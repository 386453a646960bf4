//! Maps raw discovery records into display-ready services.

use std::collections::HashSet;

use crate::model::{Service, ServiceCategory};

use super::wire::RawPlace;

/// Normalize a discovery response. The category is always the one that was
/// requested. Empty phone strings and zero ratings/review counts count as
/// missing. Ids are unique within the response.
pub fn normalize_places(places: Vec<RawPlace>, category: ServiceCategory) -> Vec<Service> {
    let mut seen = HashSet::new();
    places
        .into_iter()
        .map(|p| {
            let base = Service::derive_id(&p.name, &p.address);
            let mut id = base;
            let mut ordinal = 1;
            while !seen.insert(id) {
                id = Service::derive_repeat_id(base, ordinal);
                ordinal += 1;
            }
            Service {
                id,
                name: p.name,
                category,
                address: p.address,
                distance_km: p.distance_km.filter(|d| d.is_finite()),
                phone: p.phone.filter(|s| !s.trim().is_empty()),
                rating: p.rating.filter(|r| *r != 0.0 && r.is_finite()),
                reviews: review_count(p.reviews),
                open_now: p.open_now,
                maps_url: p.maps_url.filter(|s| !s.trim().is_empty()),
            }
        })
        .collect()
}

fn review_count(raw: Option<f64>) -> Option<u32> {
    raw.filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n.round().min(f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::wire::DiscoverResponse;

    fn place(name: &str) -> RawPlace {
        RawPlace {
            name: name.to_string(),
            address: format!("{name} street"),
            distance_km: Some(0.8),
            ..Default::default()
        }
    }

    #[test]
    fn category_comes_from_request() {
        let raw: Vec<RawPlace> = serde_json::from_value(serde_json::json!([
            {"name": "Pantry", "address": "1 A St", "distance_km": 0.4, "category": "SHELTER"},
            {"name": "Kitchen", "address": "2 B St", "distance_km": 1.1, "category": "MEDICAL"}
        ]))
        .unwrap();
        let services = normalize_places(raw, ServiceCategory::Food);
        assert_eq!(services.len(), 2);
        assert!(services.iter().all(|s| s.category == ServiceCategory::Food));
    }

    #[test]
    fn falsy_optionals_become_none() {
        let raw = RawPlace {
            phone: Some(String::new()),
            rating: Some(0.0),
            reviews: Some(0.0),
            ..place("Shelter")
        };
        let service = &normalize_places(vec![raw], ServiceCategory::Shelter)[0];
        assert!(service.phone.is_none());
        assert!(service.rating.is_none());
        assert!(service.reviews.is_none());
        assert!(service.open_now.is_none());
    }

    #[test]
    fn present_optionals_are_kept() {
        let raw = RawPlace {
            phone: Some("555-0100".to_string()),
            rating: Some(4.5),
            reviews: Some(120.0),
            open_now: Some(false),
            maps_url: Some("https://maps.example/x".to_string()),
            ..place("Clinic")
        };
        let service = &normalize_places(vec![raw], ServiceCategory::Medical)[0];
        assert_eq!(service.phone.as_deref(), Some("555-0100"));
        assert_eq!(service.rating, Some(4.5));
        assert_eq!(service.reviews, Some(120));
        assert_eq!(service.open_now, Some(false));
    }

    #[test]
    fn ids_follow_the_place_not_the_position() {
        let first = normalize_places(vec![place("A"), place("B")], ServiceCategory::Food);
        let second = normalize_places(vec![place("B"), place("A")], ServiceCategory::Food);
        assert_eq!(first[0].id, second[1].id);
        assert_eq!(first[1].id, second[0].id);
        assert_ne!(first[0].id, first[1].id);
    }

    #[test]
    fn sparse_record_survives_next_to_a_full_one() {
        let resp: DiscoverResponse = serde_json::from_value(serde_json::json!({
            "places": [
                {"name": "Drop-in", "address": "3 C St", "distance_km": null, "reviews": 12.0},
                {"name": "Pantry", "address": "1 A St", "distance_km": 0.4, "reviews": 7}
            ]
        }))
        .unwrap();
        let services = normalize_places(resp.places, ServiceCategory::Food);
        assert_eq!(services.len(), 2);
        assert!(services[0].distance_km.is_none());
        assert_eq!(services[0].reviews, Some(12));
        assert_eq!(services[1].distance_km, Some(0.4));
        assert_eq!(services[1].reviews, Some(7));
    }

    #[test]
    fn repeated_name_and_address_get_distinct_ids() {
        let clinic = || RawPlace {
            name: "Clinic".to_string(),
            ..Default::default()
        };
        let services = normalize_places(vec![clinic(), clinic(), clinic()], ServiceCategory::Medical);
        assert_eq!(services[0].id, Service::derive_id("Clinic", ""));
        assert_ne!(services[0].id, services[1].id);
        assert_ne!(services[1].id, services[2].id);
        assert_ne!(services[0].id, services[2].id);
    }

    #[test]
    fn empty_response_is_empty() {
        assert!(normalize_places(Vec::new(), ServiceCategory::Legal).is_empty());
    }
}
