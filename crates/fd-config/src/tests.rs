//! Unit tests for fd-config.

use std::io::Cursor;

use fd_core::{CityId, TimestampMs};

use crate::{Catalog, CityConfig, TimeRangeConfig, load_catalog_reader, load_pois_reader, time_markers};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sample_catalog() -> Catalog {
    Catalog {
        cities: vec![
            CityConfig {
                name:               "Testville".into(),
                center:             fd_core::GeoPoint::new(10.0, 20.0),
                zoom_default:       12,
                utc_offset_minutes: 0,
                pois:               vec![],
            },
            CityConfig {
                name:               "Harborview".into(),
                center:             fd_core::GeoPoint::new(51.5, -0.1),
                zoom_default:       13,
                utc_offset_minutes: 60,
                pois:               vec![],
            },
        ],
        time_ranges: vec![TimeRangeConfig {
            id:                  "24h".into(),
            label:               "Last 24 hours".into(),
            days:                1,
            granularity_minutes: 60,
        }],
    }
}

// ── Catalog lookups ───────────────────────────────────────────────────────────

#[cfg(test)]
mod catalog {
    use super::*;

    #[test]
    fn city_by_id_and_name() {
        let cat = sample_catalog();
        assert_eq!(cat.city_id("Harborview"), Some(CityId(1)));
        assert_eq!(cat.city(CityId(1)).unwrap().name, "Harborview");
        assert!(cat.city_id("Nowhere").is_none());
        assert!(cat.city(CityId::INVALID).is_none());
    }

    #[test]
    fn time_range_by_id() {
        let cat = sample_catalog();
        assert_eq!(cat.time_range("24h").unwrap().days, 1);
        assert!(cat.time_range("99d").is_none());
    }

    #[test]
    fn range_validity() {
        let mut r = sample_catalog().time_ranges[0].clone();
        assert!(r.is_valid());
        r.days = 0;
        assert!(!r.is_valid());
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "cities": [
            { "name": "Testville",
              "center": { "lat": 10.0, "lon": 20.0 },
              "zoom_default": 12 }
        ],
        "time_ranges": [
            { "id": "24h", "label": "Last 24 hours",
              "days": 1, "granularity_minutes": 30 }
        ]
    }"#;

    #[test]
    fn json_catalog_roundtrip() {
        let cat = load_catalog_reader(Cursor::new(CATALOG_JSON)).unwrap();
        assert_eq!(cat.cities.len(), 1);
        assert_eq!(cat.cities[0].name, "Testville");
        assert_eq!(cat.cities[0].utc_offset_minutes, 0); // serde default
        assert!(cat.cities[0].pois.is_empty());
        assert_eq!(cat.time_ranges[0].granularity_minutes, 30);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = load_catalog_reader(Cursor::new("{ not json")).unwrap_err();
        assert!(matches!(err, crate::ConfigError::Parse(_)));
    }

    #[test]
    fn poi_csv_attaches_to_cities() {
        let mut cat = sample_catalog();
        let csv = "city,name,lat,lon\n\
                   Testville,Central Station,10.001,20.002\n\
                   Testville,Old Market,9.998,19.995\n";
        load_pois_reader(&mut cat, Cursor::new(csv)).unwrap();
        assert_eq!(cat.cities[0].pois.len(), 2);
        assert_eq!(cat.cities[0].pois[1].name, "Old Market");
        assert!(cat.cities[1].pois.is_empty());
    }

    #[test]
    fn poi_csv_unknown_city_errors() {
        let mut cat = sample_catalog();
        let csv = "city,name,lat,lon\nAtlantis,Palace,0.0,0.0\n";
        let err = load_pois_reader(&mut cat, Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, crate::ConfigError::UnknownCity(c) if c == "Atlantis"));
    }
}

// ── Markers ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod markers {
    use super::*;

    #[test]
    fn marker_count_and_order() {
        let range = sample_catalog().time_ranges[0].clone(); // 1 day, 60 min
        let live = TimestampMs::from_secs(1_704_067_200); // Monday 00:00 UTC
        let m = time_markers(&range, live, 0);

        // 24 steps + both endpoints inclusive.
        assert_eq!(m.len(), 25);
        assert_eq!(m.first().unwrap().timestamp, live.offset_ms(-86_400_000));
        assert_eq!(m.last().unwrap().timestamp, live);
        assert!(m.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn labels_follow_utc_offset() {
        let range = sample_catalog().time_ranges[0].clone();
        let live = TimestampMs::from_secs(1_704_067_200);
        let utc = time_markers(&range, live, 0);
        let shifted = time_markers(&range, live, 120);
        assert_ne!(utc.last().unwrap().label, shifted.last().unwrap().label);
        assert!(shifted.last().unwrap().label.contains("02:00"));
    }

    #[test]
    fn invalid_range_yields_no_markers() {
        let mut range = sample_catalog().time_ranges[0].clone();
        range.granularity_minutes = 0;
        assert!(time_markers(&range, TimestampMs::ZERO, 0).is_empty());
    }
}
