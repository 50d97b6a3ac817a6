//! Static coordinate directories for ports and countries.
//!
//! All lookups are pure and never fail: an unknown name resolves to `None`.

pub mod country_directory;
pub mod port_directory;
pub mod text_fold;

pub use country_directory::CountryDirectory;
pub use port_directory::{PortDirectory, PortMatch, PortMatchKind};

use crate::shipment_tracking::domain::{CoordinateSource, Coordinates};

/// Where a destination port should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub source: CoordinateSource,
    pub country: Option<&'static str>,
}

/// Resolves a destination port, falling back to its country's centroid.
pub fn locate_destination(port_name: &str) -> Option<ResolvedLocation> {
    let country = CountryDirectory::country_for_port(port_name);

    if let Some(coordinates) = PortDirectory::coordinates(port_name) {
        return Some(ResolvedLocation {
            coordinates,
            source: CoordinateSource::Port,
            country,
        });
    }

    let country = country?;
    CountryDirectory::coordinates(country).map(|coordinates| ResolvedLocation {
        coordinates,
        source: CoordinateSource::Country,
        country: Some(country),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_known_port() {
        let location = locate_destination("SHANGHAI").unwrap();
        assert_eq!(location.source, CoordinateSource::Port);
        assert_eq!(location.country, Some("CHINA"));
    }

    #[test]
    fn test_locate_falls_back_to_country() {
        let location = locate_destination("SOMEWHERE, BR").unwrap();
        assert_eq!(location.source, CoordinateSource::Country);
        assert_eq!(location.country, Some("BRAZIL"));
        assert_eq!(location.coordinates, Coordinates::new(-51.9253, -14.2350));
    }

    #[test]
    fn test_locate_unknown() {
        assert!(locate_destination("NOWHERE").is_none());
        assert!(locate_destination("").is_none());
    }
}
