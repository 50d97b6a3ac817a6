use super::text_fold::{contains_either, normalize_place_name};
use crate::shipment_tracking::domain::Coordinates;

/// Country centroids used when a destination port itself is unknown.
/// Two-letter codes are accepted as aliases.
const COUNTRIES: &[(&str, Coordinates)] = &[
    ("CHINA", Coordinates::new(104.1954, 35.8617)),
    ("CN", Coordinates::new(104.1954, 35.8617)),
    ("KOREA", Coordinates::new(127.7669, 35.9078)),
    ("SOUTH KOREA", Coordinates::new(127.7669, 35.9078)),
    ("KR", Coordinates::new(127.7669, 35.9078)),
    ("SINGAPORE", Coordinates::new(103.8198, 1.2897)),
    ("SG", Coordinates::new(103.8198, 1.2897)),
    ("HONG KONG", Coordinates::new(114.1694, 22.3193)),
    ("HK", Coordinates::new(114.1694, 22.3193)),
    ("THAILAND", Coordinates::new(100.5018, 13.7563)),
    ("TH", Coordinates::new(100.5018, 13.7563)),
    ("TAIWAN", Coordinates::new(120.9605, 23.6978)),
    ("TW", Coordinates::new(120.9605, 23.6978)),
    ("JAPAN", Coordinates::new(138.2529, 36.2048)),
    ("JP", Coordinates::new(138.2529, 36.2048)),
    ("VIETNAM", Coordinates::new(108.2772, 14.0583)),
    ("VN", Coordinates::new(108.2772, 14.0583)),
    ("INDONESIA", Coordinates::new(113.9213, -0.7893)),
    ("ID", Coordinates::new(113.9213, -0.7893)),
    ("PHILIPPINES", Coordinates::new(121.7740, 12.8797)),
    ("PH", Coordinates::new(121.7740, 12.8797)),
    ("INDIA", Coordinates::new(78.9629, 20.5937)),
    ("IN", Coordinates::new(78.9629, 20.5937)),
    ("UAE", Coordinates::new(53.8478, 23.4241)),
    ("UNITED ARAB EMIRATES", Coordinates::new(53.8478, 23.4241)),
    ("SAUDI ARABIA", Coordinates::new(45.0792, 23.8859)),
    ("SA", Coordinates::new(45.0792, 23.8859)),
    ("TURKEY", Coordinates::new(35.2433, 38.9637)),
    ("TR", Coordinates::new(35.2433, 38.9637)),
    ("JORDAN", Coordinates::new(36.2384, 30.5852)),
    ("JO", Coordinates::new(36.2384, 30.5852)),
    ("QATAR", Coordinates::new(51.1839, 25.3548)),
    ("QA", Coordinates::new(51.1839, 25.3548)),
    ("LEBANON", Coordinates::new(35.8623, 33.8547)),
    ("LB", Coordinates::new(35.8623, 33.8547)),
    ("LIBYA", Coordinates::new(17.2283, 26.3351)),
    ("LY", Coordinates::new(17.2283, 26.3351)),
    ("TUNISIA", Coordinates::new(9.5375, 33.8869)),
    ("TN", Coordinates::new(9.5375, 33.8869)),
    ("CYPRUS", Coordinates::new(33.4299, 35.1264)),
    ("CY", Coordinates::new(33.4299, 35.1264)),
    ("EGYPT", Coordinates::new(30.8025, 26.8206)),
    ("EG", Coordinates::new(30.8025, 26.8206)),
    ("SPAIN", Coordinates::new(-3.7038, 40.4168)),
    ("ES", Coordinates::new(-3.7038, 40.4168)),
    ("NETHERLANDS", Coordinates::new(5.2913, 52.1326)),
    ("NL", Coordinates::new(5.2913, 52.1326)),
    ("GERMANY", Coordinates::new(10.4515, 51.1657)),
    ("DE", Coordinates::new(10.4515, 51.1657)),
    ("BELGIUM", Coordinates::new(4.4699, 50.5039)),
    ("BE", Coordinates::new(4.4699, 50.5039)),
    ("ITALY", Coordinates::new(12.5674, 41.8719)),
    ("IT", Coordinates::new(12.5674, 41.8719)),
    ("FRANCE", Coordinates::new(2.2137, 46.2276)),
    ("FR", Coordinates::new(2.2137, 46.2276)),
    ("PORTUGAL", Coordinates::new(-8.2245, 39.3999)),
    ("PT", Coordinates::new(-8.2245, 39.3999)),
    ("UNITED KINGDOM", Coordinates::new(-3.4360, 55.3781)),
    ("UK", Coordinates::new(-3.4360, 55.3781)),
    ("GB", Coordinates::new(-3.4360, 55.3781)),
    ("SWEDEN", Coordinates::new(18.6435, 60.1282)),
    ("SE", Coordinates::new(18.6435, 60.1282)),
    ("FINLAND", Coordinates::new(25.7482, 61.9241)),
    ("FI", Coordinates::new(25.7482, 61.9241)),
    ("NORWAY", Coordinates::new(8.4689, 60.4720)),
    ("NO", Coordinates::new(8.4689, 60.4720)),
    ("POLAND", Coordinates::new(19.1451, 51.9194)),
    ("PL", Coordinates::new(19.1451, 51.9194)),
    ("GREECE", Coordinates::new(21.8243, 39.0742)),
    ("GR", Coordinates::new(21.8243, 39.0742)),
    ("IRELAND", Coordinates::new(-8.2439, 53.4129)),
    ("IE", Coordinates::new(-8.2439, 53.4129)),
    ("LATVIA", Coordinates::new(24.6032, 56.8796)),
    ("LV", Coordinates::new(24.6032, 56.8796)),
    ("ESTONIA", Coordinates::new(25.0136, 58.5953)),
    ("EE", Coordinates::new(25.0136, 58.5953)),
    ("USA", Coordinates::new(-95.7129, 37.0902)),
    ("UNITED STATES", Coordinates::new(-95.7129, 37.0902)),
    ("US", Coordinates::new(-95.7129, 37.0902)),
    ("CANADA", Coordinates::new(-106.3468, 56.1304)),
    ("CA", Coordinates::new(-106.3468, 56.1304)),
    ("MEXICO", Coordinates::new(-102.5528, 23.6345)),
    ("MX", Coordinates::new(-102.5528, 23.6345)),
    ("GUATEMALA", Coordinates::new(-90.2308, 15.7835)),
    ("GT", Coordinates::new(-90.2308, 15.7835)),
    ("HONDURAS", Coordinates::new(-86.2419, 15.2000)),
    ("HN", Coordinates::new(-86.2419, 15.2000)),
    ("EL SALVADOR", Coordinates::new(-88.8965, 13.7942)),
    ("SV", Coordinates::new(-88.8965, 13.7942)),
    ("NICARAGUA", Coordinates::new(-85.2072, 12.2650)),
    ("NI", Coordinates::new(-85.2072, 12.2650)),
    ("COSTA RICA", Coordinates::new(-83.7534, 9.7489)),
    ("CR", Coordinates::new(-83.7534, 9.7489)),
    ("PANAMA", Coordinates::new(-80.7821, 8.5380)),
    ("PA", Coordinates::new(-80.7821, 8.5380)),
    ("COLOMBIA", Coordinates::new(-74.2973, 4.5709)),
    ("CO", Coordinates::new(-74.2973, 4.5709)),
    ("CHILE", Coordinates::new(-71.5429, -35.6751)),
    ("CL", Coordinates::new(-71.5429, -35.6751)),
    ("ARGENTINA", Coordinates::new(-63.6167, -38.4161)),
    ("AR", Coordinates::new(-63.6167, -38.4161)),
    ("URUGUAY", Coordinates::new(-55.7658, -32.5228)),
    ("UY", Coordinates::new(-55.7658, -32.5228)),
    ("BRAZIL", Coordinates::new(-51.9253, -14.2350)),
    ("BR", Coordinates::new(-51.9253, -14.2350)),
    ("PERU", Coordinates::new(-75.0152, -9.1900)),
    ("PE", Coordinates::new(-75.0152, -9.1900)),
    ("ECUADOR", Coordinates::new(-78.1834, -1.8312)),
    ("EC", Coordinates::new(-78.1834, -1.8312)),
    ("VENEZUELA", Coordinates::new(-66.5897, 6.4238)),
    ("VE", Coordinates::new(-66.5897, 6.4238)),
    ("AUSTRALIA", Coordinates::new(133.7751, -25.2744)),
    ("AU", Coordinates::new(133.7751, -25.2744)),
    ("NEW ZEALAND", Coordinates::new(174.8860, -40.9006)),
    ("NZ", Coordinates::new(174.8860, -40.9006)),
    ("SOUTH AFRICA", Coordinates::new(22.9375, -30.5595)),
    ("ZA", Coordinates::new(22.9375, -30.5595)),
];

/// Ports (and a few inland destinations) with a known country.
const PORT_COUNTRIES: &[(&str, &str)] = &[
    ("ACAJUTLA", "EL SALVADOR"),
    ("PUERTO CALDERA", "EL SALVADOR"),
    ("CALDERA", "EL SALVADOR"),
    ("ALGECIRAS", "SPAIN"),
    ("BARCELONA", "SPAIN"),
    ("VALENCIA", "SPAIN"),
    ("SINES", "SPAIN"),
    ("VIGO", "SPAIN"),
    ("TENERIFE", "SPAIN"),
    ("MARIN", "SPAIN"),
    ("AMBARLI", "TURKEY"),
    ("AMBARLI PORT ISTANBUL", "TURKEY"),
    ("IZMIR", "TURKEY"),
    ("IZMIT KORFEZI", "TURKEY"),
    ("GEBZE", "TURKEY"),
    ("MERSIN", "TURKEY"),
    ("BALBOA", "PANAMA"),
    ("PUERTO LIMON", "PANAMA"),
    ("BARRANQUILLAS", "COLOMBIA"),
    ("BARRANQUILLA", "COLOMBIA"),
    ("BUENAVENTURA", "COLOMBIA"),
    ("CARTAGENA", "COLOMBIA"),
    ("CHENGDU", "CHINA"),
    ("GUANGZHOU", "CHINA"),
    ("NANSHA", "CHINA"),
    ("NANSHA NEW PORT", "CHINA"),
    ("SHANGHAI", "CHINA"),
    ("SHENZHEN", "CHINA"),
    ("HEFEI", "CHINA"),
    ("CORINTO", "NICARAGUA"),
    ("MANAGUA", "NICARAGUA"),
    ("MATAGALPA", "NICARAGUA"),
    ("DUBLIN", "IRELAND"),
    ("FOS SUR MER", "FRANCE"),
    ("HALTON HILLS", "CANADA"),
    ("TORONTO", "CANADA"),
    ("AUBURN", "USA"),
    ("CADILLAC", "CANADA"),
    ("CALUMET CITY", "CANADA"),
    ("CORNWALL", "CANADA"),
    ("GREENFIELD", "CANADA"),
    ("HART", "CANADA"),
    ("LAKE WALES", "CANADA"),
    ("MANAWA", "CANADA"),
    ("RANCHO DOMINGUEZ", "CANADA"),
    ("STANFORD-LE-HOPE", "CANADA"),
    ("HAMAD", "QATAR"),
    ("DOHA", "QATAR"),
    ("HAMBURGO", "GERMANY"),
    ("HAMBURG", "GERMANY"),
    ("BREMERHAVEN", "GERMANY"),
    ("HELSINGBORG", "SWEDEN"),
    ("ESKILSTUNA", "SWEDEN"),
    ("HELSINKI", "FINLAND"),
    ("HEREDIA", "COSTA RICA"),
    ("PUERTO MOIN", "COSTA RICA"),
    ("PUERTO QUETZAL", "COSTA RICA"),
    ("CARTAGO", "COSTA RICA"),
    ("SAN SALVADOR", "COSTA RICA"),
    ("HONG KONG", "HONG KONG"),
    ("JEBEL ALI", "UAE"),
    ("SHUWAIKH", "UAE"),
    ("JEDDAH", "SAUDI ARABIA"),
    ("KING ABDULLAH", "SAUDI ARABIA"),
    ("KING ABDULLAH PORT", "SAUDI ARABIA"),
    ("KEELUNG", "TAIWAN"),
    ("TAIPEI", "TAIWAN"),
    ("KAOHSIUNG", "TAIWAN"),
    ("LA GUAIRA", "VENEZUELA"),
    ("PUERTO CABELLO", "VENEZUELA"),
    ("LISBOA", "PORTUGAL"),
    ("LISBON", "PORTUGAL"),
    ("LIVORNO", "ITALY"),
    ("CIVITAVECCHIA", "ITALY"),
    ("GENOA VADO LIGURE", "ITALY"),
    ("SALERNO", "ITALY"),
    ("LEGHORN", "ITALY"),
    ("LOS ANGELES", "USA"),
    ("PHILADELPHIA", "USA"),
    ("LONG BEACH", "USA"),
    ("CHARLESTON", "USA"),
    ("CHARLESTON NORTH", "USA"),
    ("CHICAGO", "USA"),
    ("HOUSTON", "USA"),
    ("NEWARK", "USA"),
    ("NORFOLK", "USA"),
    ("PORT EVERGLADES", "USA"),
    ("PORT HUENEME", "USA"),
    ("SAVANNAH", "USA"),
    ("SAN JUAN", "USA"),
    ("MEMPHIS", "USA"),
    ("ROTTERDAM", "NETHERLANDS"),
    ("MAASVLAKTE", "NETHERLANDS"),
    ("VLISSINGEN", "NETHERLANDS"),
    ("WILLEMSTAD", "NETHERLANDS"),
    ("SALVADOR, BAHIA", "BRAZIL"),
    ("SALVADOR BAHIA", "BRAZIL"),
    ("SALVADOR DE BAHIA", "BRAZIL"),
    ("SALVADOR-BAHIA", "BRAZIL"),
    ("SALVADOR DE BAHÍA", "BRAZIL"),
    ("SALVADOR, BAHÍA", "BRAZIL"),
    ("SUAPE", "BRAZIL"),
    ("SAN PEDRO SULA", "HONDURAS"),
    ("PUERTO CORTES", "HONDURAS"),
    ("TEGUCIGALPA", "HONDURAS"),
    ("GUATEMALA CITY", "GUATEMALA"),
    ("EL TEJAR", "GUATEMALA"),
    ("ANTWERP", "BELGIUM"),
    ("AQABA", "JORDAN"),
    ("ADELAIDE", "AUSTRALIA"),
    ("BRISBANE", "AUSTRALIA"),
    ("FREMANTLE", "AUSTRALIA"),
    ("MELBOURNE", "AUSTRALIA"),
    ("SYDNEY", "AUSTRALIA"),
    ("AL KHOMS", "LIBYA"),
    ("MISURATAH", "LIBYA"),
    ("BANGKOK", "THAILAND"),
    ("LAEM CHABANG", "THAILAND"),
    ("CAUCEDO", "DOMINICAN REPUBLIC"),
    ("AUCKLAND METROPORT", "NEW ZEALAND"),
    ("LYTTELTON", "NEW ZEALAND"),
    ("NAPIER", "NEW ZEALAND"),
    ("TAURANGA", "NEW ZEALAND"),
    ("GDANSK", "POLAND"),
    ("PIRAEUS", "GREECE"),
    ("THESSALONIKI", "GREECE"),
    ("FELIXSTOWE", "UNITED KINGDOM"),
    ("SOUTHAMPTON", "UNITED KINGDOM"),
    ("LONDON GATEWAY", "UNITED KINGDOM"),
    ("KOBE", "JAPAN"),
    ("NAGOYA", "JAPAN"),
    ("YOKOHAMA", "JAPAN"),
    ("HAKATA", "JAPAN"),
    ("HO CHI MINH CITY", "VIETNAM"),
    ("JAKARTA", "INDONESIA"),
    ("PORT KLANG", "MALAYSIA"),
    ("SOHAR", "OMAN"),
    ("BEIRUT", "LEBANON"),
    ("LEBANON", "LEBANON"),
    ("SFAX", "TUNISIA"),
    ("LIMASSOL", "CYPRUS"),
    ("KRISTIANSAND", "NORWAY"),
    ("OSLO", "NORWAY"),
    ("RIGA", "LATVIA"),
    ("TALLINN", "ESTONIA"),
    ("CAPE TOWN", "SOUTH AFRICA"),
    ("MONTREAL", "CANADA"),
    ("CALLAO", "PERU"),
    ("GUAYAQUIL", "ECUADOR"),
    ("GUAYAQUIL-POSORJA", "ECUADOR"),
    ("MANZANILLO - MÉXICO", "MEXICO"),
    ("MANZANILLO - MEXICO", "MEXICO"),
    ("MANZANILLO-MEXICO", "MEXICO"),
    ("MANZANILLO-MÉXICO", "MEXICO"),
    ("MANZANILLO MEXICO", "MEXICO"),
    ("MANZANILLO MÉXICO", "MEXICO"),
    ("MANZANILLO", "MEXICO"),
    ("LAZARO CARDENAS", "MEXICO"),
    ("MANZANILLO - PANAMÁ", "PANAMA"),
    ("MANZANILLO - PANAMA", "PANAMA"),
    ("BUSAN", "KOREA"),
    ("SINGAPORE", "SINGAPORE"),
    ("NINGBO", "CHINA"),
    ("QINGDAO", "CHINA"),
    ("TIANJIN", "CHINA"),
    ("XINGANG", "CHINA"),
    ("YANTIAN", "CHINA"),
    ("SHEKOU", "CHINA"),
    ("CHIWAN", "CHINA"),
    ("ZHOUSHAN", "CHINA"),
    ("YANGSHAN", "CHINA"),
];

/// Trailing country codes, e.g. `"BARCELONA, ES"`.
const COUNTRY_CODE_SUFFIXES: &[(&str, &str)] = &[
    (" CN", "CHINA"),
    (", CN", "CHINA"),
    (" ES", "SPAIN"),
    (", ES", "SPAIN"),
    (" NL", "NETHERLANDS"),
    (", NL", "NETHERLANDS"),
    (" DE", "GERMANY"),
    (", DE", "GERMANY"),
    (" BE", "BELGIUM"),
    (", BE", "BELGIUM"),
    (" IT", "ITALY"),
    (", IT", "ITALY"),
    (" FR", "FRANCE"),
    (", FR", "FRANCE"),
    (" PT", "PORTUGAL"),
    (", PT", "PORTUGAL"),
    (" UK", "UNITED KINGDOM"),
    (", UK", "UNITED KINGDOM"),
    (" GB", "UNITED KINGDOM"),
    (", GB", "UNITED KINGDOM"),
    (" US", "USA"),
    (", US", "USA"),
    (" USA", "USA"),
    (", USA", "USA"),
    (" CL", "CHILE"),
    (", CL", "CHILE"),
    (" AR", "ARGENTINA"),
    (", AR", "ARGENTINA"),
    (" UY", "URUGUAY"),
    (", UY", "URUGUAY"),
    (" BR", "BRAZIL"),
    (", BR", "BRAZIL"),
    (" PE", "PERU"),
    (", PE", "PERU"),
    (" EC", "ECUADOR"),
    (", EC", "ECUADOR"),
    (" CO", "COLOMBIA"),
    (", CO", "COLOMBIA"),
    (" PA", "PANAMA"),
    (", PA", "PANAMA"),
    (" MX", "MEXICO"),
    (", MX", "MEXICO"),
    (" CA", "CANADA"),
    (", CA", "CANADA"),
    (" AU", "AUSTRALIA"),
    (", AU", "AUSTRALIA"),
    (" NZ", "NEW ZEALAND"),
    (", NZ", "NEW ZEALAND"),
    (" KR", "KOREA"),
    (", KR", "KOREA"),
    (" SG", "SINGAPORE"),
    (", SG", "SINGAPORE"),
    (" HK", "HONG KONG"),
    (", HK", "HONG KONG"),
    (" JP", "JAPAN"),
    (", JP", "JAPAN"),
    (" TW", "TAIWAN"),
    (", TW", "TAIWAN"),
    (" TH", "THAILAND"),
    (", TH", "THAILAND"),
    (" TR", "TURKEY"),
    (", TR", "TURKEY"),
    (" AE", "UAE"),
    (", AE", "UAE"),
    (" SA", "SAUDI ARABIA"),
    (", SA", "SAUDI ARABIA"),
];

/// Static directory of countries and their centroids.
pub struct CountryDirectory;

impl CountryDirectory {
    /// Detects the country of a port name.
    ///
    /// Checks the known-port table exactly, then by partial match on the
    /// normalized names, then looks for a trailing country code.
    pub fn country_for_port(port_name: &str) -> Option<&'static str> {
        let upper = port_name.trim().to_uppercase();
        if upper.is_empty() {
            return None;
        }

        if let Some((_, country)) = PORT_COUNTRIES.iter().find(|(port, _)| *port == upper) {
            return Some(*country);
        }

        let normalized = normalize_place_name(&upper);
        if let Some((_, country)) = PORT_COUNTRIES
            .iter()
            .find(|(port, _)| contains_either(&normalized, &normalize_place_name(port)))
        {
            return Some(*country);
        }

        COUNTRY_CODE_SUFFIXES
            .iter()
            .find(|(suffix, _)| upper.ends_with(suffix))
            .map(|(_, country)| *country)
    }

    /// Centroid of a country, by exact name or code first, then by partial
    /// match against full country names.
    pub fn coordinates(country: &str) -> Option<Coordinates> {
        let normalized = normalize_place_name(country);
        if normalized.is_empty() {
            return None;
        }

        if let Some((_, coordinates)) = COUNTRIES.iter().find(|(name, _)| *name == normalized) {
            return Some(*coordinates);
        }

        // Two-letter codes are skipped here; they occur inside too many names.
        COUNTRIES
            .iter()
            .filter(|(name, _)| name.len() > 2)
            .find(|(name, _)| contains_either(&normalized, name))
            .map(|(_, coordinates)| *coordinates)
    }

    /// Country of a port and that country's centroid, when both are known.
    pub fn fallback_for_port(port_name: &str) -> Option<(&'static str, Coordinates)> {
        let country = Self::country_for_port(port_name)?;
        Self::coordinates(country).map(|coordinates| (country, coordinates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_for_known_port() {
        assert_eq!(CountryDirectory::country_for_port("shanghai"), Some("CHINA"));
        assert_eq!(CountryDirectory::country_for_port("CAUCEDO"), Some("DOMINICAN REPUBLIC"));
        assert_eq!(CountryDirectory::country_for_port("AUBURN"), Some("USA"));
    }

    #[test]
    fn test_country_for_port_partial() {
        assert_eq!(
            CountryDirectory::country_for_port("Salvador de Bahía"),
            Some("BRAZIL")
        );
        assert_eq!(
            CountryDirectory::country_for_port("PORT OF FELIXSTOWE"),
            Some("UNITED KINGDOM")
        );
    }

    #[test]
    fn test_country_for_port_by_code_suffix() {
        assert_eq!(CountryDirectory::country_for_port("PUERTO NUEVO, ES"), Some("SPAIN"));
        assert_eq!(CountryDirectory::country_for_port("ZEEBRUGGE BE"), Some("BELGIUM"));
        assert_eq!(CountryDirectory::country_for_port("UNKNOWN PLACE"), None);
        assert_eq!(CountryDirectory::country_for_port(""), None);
    }

    #[test]
    fn test_country_coordinates_exact_and_code() {
        let spain = Coordinates::new(-3.7038, 40.4168);
        assert_eq!(CountryDirectory::coordinates("Spain"), Some(spain));
        assert_eq!(CountryDirectory::coordinates("ES"), Some(spain));
    }

    #[test]
    fn test_country_coordinates_partial() {
        assert_eq!(
            CountryDirectory::coordinates("REPUBLIC OF KOREA"),
            Some(Coordinates::new(127.7669, 35.9078))
        );
        assert!(CountryDirectory::coordinates("DOMINICAN REPUBLIC").is_none());
        assert!(CountryDirectory::coordinates("").is_none());
    }

    #[test]
    fn test_fallback_for_port() {
        let (country, coordinates) =
            CountryDirectory::fallback_for_port("NEW TERMINAL, CL").unwrap();
        assert_eq!(country, "CHILE");
        assert_eq!(coordinates, Coordinates::new(-71.5429, -35.6751));
    }
}
