use crate::models::country::{Coordinates, Country};

/// A country that can be placed on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint<'a> {
    pub country: &'a Country,
    pub coordinates: Coordinates,
}

impl GeoPoint<'_> {
    pub fn title(&self) -> &str {
        &self.country.name
    }
}

/// Countries of `snapshot` that carry coordinates, in snapshot order.
pub fn visible_on<'a>(snapshot: impl IntoIterator<Item = &'a Country>) -> Vec<GeoPoint<'a>> {
    snapshot
        .into_iter()
        .filter_map(|country| {
            country.coordinates.map(|coordinates| GeoPoint {
                country,
                coordinates,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::CountryCatalog;

    #[test]
    fn test_entries_without_coordinates_are_skipped() {
        let catalog = CountryCatalog::from_countries(vec![
            Country::new("FRA", "France").with_coordinates(46.0, 2.0),
            Country::new("ATA", "Antarctica"),
            Country::new("DEU", "Germany").with_coordinates(51.0, 9.0),
            Country::new("BAD", "Badland").with_coordinates(f64::NAN, 9.0),
        ]);

        let points = visible_on(catalog.iter());
        let titles: Vec<&str> = points.iter().map(GeoPoint::title).collect();

        assert_eq!(titles, vec!["France", "Germany"]);
        assert_eq!(points[1].coordinates, Coordinates::new(51.0, 9.0).unwrap());
    }

    #[test]
    fn test_every_located_entry_is_kept() {
        let catalog = CountryCatalog::from_countries(
            (0..30)
                .map(|i| {
                    let country = Country::new(format!("C{:02}", i), format!("Country {:02}", i));
                    if i % 3 == 0 {
                        country
                    } else {
                        country.with_coordinates(i as f64, -(i as f64))
                    }
                })
                .collect(),
        );

        let points = visible_on(catalog.iter());
        let located = catalog.iter().filter(|c| c.coordinates.is_some()).count();

        assert_eq!(points.len(), located);
        assert!(points.iter().all(|p| p.country.coordinates == Some(p.coordinates)));
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(visible_on(CountryCatalog::new().iter()).is_empty());
    }
}
