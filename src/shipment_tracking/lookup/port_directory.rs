use super::text_fold::{compact_place_name, contains_either, normalize_place_name};
use crate::shipment_tracking::domain::Coordinates;
use std::sync::OnceLock;

/// How a port name was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortMatchKind {
    Exact,
    /// One name contains the other, or a MANZANILLO / SALVADOR-BAHIA rule fired
    Partial,
    Keyword,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortMatch {
    /// Directory entry (or keyword) that matched
    pub entry: &'static str,
    pub coordinates: Coordinates,
    pub kind: PortMatchKind,
}

/// Container ports and inland destinations the company ships to, as
/// `[lon, lat]`. Entries with `None` are placeholders that never resolve.
const PORTS: &[(&str, Option<Coordinates>)] = &[
    ("VALPARAISO", Some(Coordinates::new(-71.6297, -33.0472))),
    ("SAN ANTONIO", Some(Coordinates::new(-71.6178, -33.5944))),
    ("LIRQUEN", Some(Coordinates::new(-72.9767, -36.7083))),
    ("CORONEL", Some(Coordinates::new(-73.1517, -37.0167))),
    ("TALCAHUANO", Some(Coordinates::new(-73.1167, -36.7167))),
    ("QUINTERO", Some(Coordinates::new(-71.5333, -32.7833))),
    ("IQUIQUE", Some(Coordinates::new(-70.1531, -20.2208))),
    ("ANTOFAGASTA", Some(Coordinates::new(-70.4025, -23.6500))),
    ("ARICA", Some(Coordinates::new(-70.3197, -18.4783))),
    ("COQUIMBO", Some(Coordinates::new(-71.3425, -29.9528))),
    ("ACAJUTLA", Some(Coordinates::new(-89.8272, 13.5922))),
    ("PUERTO CALDERA", Some(Coordinates::new(-89.8272, 13.5922))),
    ("CALDERA", Some(Coordinates::new(-89.8272, 13.5922))),
    ("ALGECIRAS", Some(Coordinates::new(-5.4565, 36.1269))),
    ("BARCELONA", Some(Coordinates::new(2.1734, 41.3851))),
    ("VALENCIA", Some(Coordinates::new(-0.3774, 39.4699))),
    ("SINES", Some(Coordinates::new(-8.8688, 37.9562))),
    ("VIGO", Some(Coordinates::new(-8.7266, 42.2406))),
    ("TENERIFE", Some(Coordinates::new(-16.2518, 28.4636))),
    ("MARIN", Some(Coordinates::new(-8.7266, 42.2406))),
    ("AMBARLI", Some(Coordinates::new(28.7767, 40.9756))),
    ("AMBARLI PORT ISTANBUL", Some(Coordinates::new(28.7767, 40.9756))),
    ("IZMIR", Some(Coordinates::new(27.1428, 38.4237))),
    ("IZMIT KORFEZI", Some(Coordinates::new(29.7333, 40.7667))),
    ("GEBZE", Some(Coordinates::new(29.4306, 40.8028))),
    ("MERSIN", Some(Coordinates::new(34.6415, 36.8004))),
    ("BALBOA", Some(Coordinates::new(-79.5667, 8.9667))),
    ("PUERTO LIMON", Some(Coordinates::new(-79.5667, 8.9667))),
    ("MANZANILLO - PANAMÁ", Some(Coordinates::new(-79.5667, 8.9667))),
    ("MANZANILLO - PANAMA", Some(Coordinates::new(-79.5667, 8.9667))),
    ("BARRANQUILLAS", Some(Coordinates::new(-74.7811, 10.9639))),
    ("BARRANQUILLA", Some(Coordinates::new(-74.7811, 10.9639))),
    ("BUENAVENTURA", Some(Coordinates::new(-77.0197, 3.8801))),
    ("CARTAGENA", Some(Coordinates::new(-75.5144, 10.3910))),
    ("CAUCEDO", Some(Coordinates::new(-69.9000, 18.5000))),
    ("SALVADOR, BAHIA", Some(Coordinates::new(-38.5108, -12.9714))),
    ("SALVADOR BAHIA", Some(Coordinates::new(-38.5108, -12.9714))),
    ("SALVADOR DE BAHIA", Some(Coordinates::new(-38.5108, -12.9714))),
    ("SALVADOR-BAHIA", Some(Coordinates::new(-38.5108, -12.9714))),
    ("SALVADOR DE BAHÍA", Some(Coordinates::new(-38.5108, -12.9714))),
    ("SALVADOR, BAHÍA", Some(Coordinates::new(-38.5108, -12.9714))),
    ("CHENGDU", Some(Coordinates::new(104.0668, 30.5728))),
    ("GUANGZHOU", Some(Coordinates::new(113.2644, 23.1291))),
    ("NANSHA", Some(Coordinates::new(113.5800, 22.7600))),
    ("NANSHA NEW PORT", Some(Coordinates::new(113.5800, 22.7600))),
    ("SHANGHAI", Some(Coordinates::new(121.5000, 31.2000))),
    ("SHENZHEN", Some(Coordinates::new(114.2200, 22.4800))),
    ("HEFEI", Some(Coordinates::new(117.2838, 31.8612))),
    ("NINGBO", Some(Coordinates::new(121.8300, 29.9500))),
    ("QINGDAO", Some(Coordinates::new(120.3000, 36.0500))),
    ("TIANJIN", Some(Coordinates::new(117.8000, 38.9800))),
    ("XINGANG", Some(Coordinates::new(117.8000, 38.9800))),
    ("YANTIAN", Some(Coordinates::new(114.2200, 22.4800))),
    ("SHEKOU", Some(Coordinates::new(113.8800, 22.4800))),
    ("CHIWAN", Some(Coordinates::new(113.8800, 22.4800))),
    ("ZHOUSHAN", Some(Coordinates::new(121.8300, 29.9500))),
    ("YANGSHAN", Some(Coordinates::new(121.5000, 31.2000))),
    ("CORINTO", Some(Coordinates::new(-87.1833, 12.4833))),
    ("PUERTO CORTES", Some(Coordinates::new(-87.9567, 15.8400))),
    ("DUBLIN", Some(Coordinates::new(-6.2603, 53.3498))),
    ("FOS SUR MER", Some(Coordinates::new(5.1833, 43.4333))),
    ("HALTON HILLS", Some(Coordinates::new(-79.9333, 43.6333))),
    ("TORONTO", Some(Coordinates::new(-79.3832, 43.6532))),
    ("AUBURN", Some(Coordinates::new(-79.8500, 43.9000))),
    ("CADILLAC", Some(Coordinates::new(-85.4000, 44.2500))),
    ("CALUMET CITY", Some(Coordinates::new(-87.5295, 41.6156))),
    ("CORNWALL", Some(Coordinates::new(-74.7264, 45.0181))),
    ("GREENFIELD", Some(Coordinates::new(-79.7667, 43.9000))),
    ("HART", Some(Coordinates::new(-79.7667, 43.9000))),
    ("LAKE WALES", Some(Coordinates::new(-81.5869, 27.9014))),
    ("MANAWA", Some(Coordinates::new(-88.9198, 44.4642))),
    ("RANCHO DOMINGUEZ", Some(Coordinates::new(-118.2167, 33.8667))),
    ("STANFORD-LE-HOPE", Some(Coordinates::new(0.4225, 51.5139))),
    ("MONTREAL", Some(Coordinates::new(-73.5673, 45.5017))),
    ("HAMAD", Some(Coordinates::new(51.5342, 25.2614))),
    ("DOHA", Some(Coordinates::new(51.5342, 25.2614))),
    ("HAMBURGO", Some(Coordinates::new(9.9937, 53.5511))),
    ("HAMBURG", Some(Coordinates::new(9.9937, 53.5511))),
    ("BREMERHAVEN", Some(Coordinates::new(8.5783, 53.5439))),
    ("HELSINGBORG", Some(Coordinates::new(12.6958, 56.0467))),
    ("ESKILSTUNA", Some(Coordinates::new(16.5144, 59.3711))),
    ("HELSINKI", Some(Coordinates::new(24.9384, 60.1699))),
    ("HEREDIA", Some(Coordinates::new(-84.1167, 9.9985))),
    ("PUERTO MOIN", Some(Coordinates::new(-83.2667, 10.0167))),
    ("PUERTO QUETZAL", Some(Coordinates::new(-90.7333, 13.9333))),
    ("CARTAGO", Some(Coordinates::new(-83.9167, 9.8500))),
    ("SAN SALVADOR", Some(Coordinates::new(-89.2181, 13.6929))),
    ("HONG KONG", Some(Coordinates::new(114.1694, 22.3193))),
    ("JEBEL ALI", Some(Coordinates::new(55.0273, 25.0262))),
    ("SHUWAIKH", Some(Coordinates::new(47.9731, 29.3375))),
    ("JEDDAH", Some(Coordinates::new(39.1825, 21.4858))),
    ("KING ABDULLAH", Some(Coordinates::new(39.1667, 21.4833))),
    ("KING ABDULLAH PORT", Some(Coordinates::new(39.1667, 21.4833))),
    ("KEELUNG", Some(Coordinates::new(121.7478, 25.1276))),
    ("TAIPEI", Some(Coordinates::new(121.5654, 25.0330))),
    ("KAOHSIUNG", Some(Coordinates::new(120.3016, 22.6273))),
    ("LA GUAIRA", Some(Coordinates::new(-66.9344, 10.6011))),
    ("PUERTO CABELLO", Some(Coordinates::new(-68.0122, 10.4731))),
    ("LISBOA", Some(Coordinates::new(-9.1393, 38.7223))),
    ("LISBON", Some(Coordinates::new(-9.1393, 38.7223))),
    ("LIVORNO", Some(Coordinates::new(10.3157, 43.5500))),
    ("CIVITAVECCHIA", Some(Coordinates::new(11.7967, 42.0911))),
    ("GENOA VADO LIGURE", Some(Coordinates::new(8.9463, 44.4056))),
    ("SALERNO", Some(Coordinates::new(14.7673, 40.6824))),
    ("LEGHORN", Some(Coordinates::new(10.3157, 43.5500))),
    ("PHILADELPHIA", Some(Coordinates::new(-75.1652, 39.9526))),
    ("NEW YORK", Some(Coordinates::new(-74.0060, 40.7128))),
    ("NEWARK", Some(Coordinates::new(-74.1724, 40.7357))),
    ("CHARLESTON", Some(Coordinates::new(-79.9348, 32.7765))),
    ("CHARLESTON NORTH", Some(Coordinates::new(-79.9348, 32.7765))),
    ("NORFOLK", Some(Coordinates::new(-76.2852, 36.8468))),
    ("SAVANNAH", Some(Coordinates::new(-81.0998, 32.0809))),
    ("PORT EVERGLADES", Some(Coordinates::new(-80.1373, 26.0967))),
    ("PORT HUENEME", Some(Coordinates::new(-119.2079, 34.1478))),
    ("SAN JUAN", Some(Coordinates::new(-66.1057, 18.4655))),
    ("LOS ANGELES", Some(Coordinates::new(-118.2437, 34.0522))),
    ("LONG BEACH", Some(Coordinates::new(-118.1937, 33.7701))),
    ("CHICAGO", Some(Coordinates::new(-87.6298, 41.8781))),
    ("HOUSTON", Some(Coordinates::new(-95.3698, 29.7604))),
    ("MEMPHIS", Some(Coordinates::new(-90.0490, 35.1495))),
    ("ROTTERDAM", Some(Coordinates::new(4.4777, 51.9225))),
    ("MAASVLAKTE", Some(Coordinates::new(4.0300, 51.9500))),
    ("VLISSINGEN", Some(Coordinates::new(3.5736, 51.4428))),
    ("WILLEMSTAD", Some(Coordinates::new(-68.9384, 12.1026))),
    ("SANTOS", Some(Coordinates::new(-46.3273, -23.9608))),
    ("SUAPE", Some(Coordinates::new(-34.9333, -8.4000))),
    ("SAN PEDRO SULA", Some(Coordinates::new(-88.0333, 15.5000))),
    ("TEGUCIGALPA", Some(Coordinates::new(-87.2167, 14.1000))),
    ("GUATEMALA CITY", Some(Coordinates::new(-90.5132, 14.6349))),
    ("EL TEJAR", Some(Coordinates::new(-90.7833, 14.6500))),
    ("ANTWERP", Some(Coordinates::new(4.4028, 51.2194))),
    ("AQABA", Some(Coordinates::new(35.0074, 29.5320))),
    ("ADELAIDE", Some(Coordinates::new(138.6007, -34.9285))),
    ("BRISBANE", Some(Coordinates::new(153.0251, -27.4698))),
    ("FREMANTLE", Some(Coordinates::new(115.7500, -32.0500))),
    ("MELBOURNE", Some(Coordinates::new(144.9631, -37.8136))),
    ("SYDNEY", Some(Coordinates::new(151.2093, -33.8688))),
    ("AL KHOMS", Some(Coordinates::new(14.2617, 32.6519))),
    ("MISURATAH", Some(Coordinates::new(15.0927, 32.3754))),
    ("BANGKOK", Some(Coordinates::new(100.5018, 13.7563))),
    ("LAEM CHABANG", Some(Coordinates::new(100.8833, 13.0833))),
    ("AUCKLAND METROPORT", Some(Coordinates::new(174.7633, -36.8485))),
    ("LYTTELTON", Some(Coordinates::new(172.7250, -43.6017))),
    ("NAPIER", Some(Coordinates::new(176.9086, -39.4928))),
    ("TAURANGA", Some(Coordinates::new(176.1652, -37.6878))),
    ("GDANSK", Some(Coordinates::new(18.6464, 54.3520))),
    ("PIRAEUS", Some(Coordinates::new(23.6467, 37.9420))),
    ("THESSALONIKI", Some(Coordinates::new(22.9444, 40.6401))),
    ("FELIXSTOWE", Some(Coordinates::new(1.3139, 51.9607))),
    ("SOUTHAMPTON", Some(Coordinates::new(-1.4043, 50.9097))),
    ("LONDON GATEWAY", Some(Coordinates::new(0.4225, 51.5139))),
    ("KOBE", Some(Coordinates::new(135.1833, 34.6903))),
    ("NAGOYA", Some(Coordinates::new(136.9066, 35.1815))),
    ("YOKOHAMA", Some(Coordinates::new(139.6389, 35.4437))),
    ("HAKATA", Some(Coordinates::new(130.4181, 33.5904))),
    ("HO CHI MINH CITY", Some(Coordinates::new(106.6297, 10.8231))),
    ("JAKARTA", Some(Coordinates::new(106.8451, -6.2088))),
    ("PORT KLANG", Some(Coordinates::new(101.3972, 3.0000))),
    ("SOHAR", Some(Coordinates::new(56.7439, 24.3644))),
    ("BEIRUT", Some(Coordinates::new(35.5018, 33.8938))),
    ("LEBANON", Some(Coordinates::new(35.8623, 33.8547))),
    ("SFAX", Some(Coordinates::new(10.7600, 34.7400))),
    ("LIMASSOL", Some(Coordinates::new(33.0222, 34.6750))),
    ("KRISTIANSAND", Some(Coordinates::new(8.0186, 58.1474))),
    ("OSLO", Some(Coordinates::new(10.7522, 59.9139))),
    ("RIGA", Some(Coordinates::new(24.1052, 56.9496))),
    ("TALLINN", Some(Coordinates::new(24.7536, 59.4370))),
    ("CAPE TOWN", Some(Coordinates::new(18.4241, -33.9249))),
    ("CALLAO", Some(Coordinates::new(-77.1189, -12.0566))),
    ("GUAYAQUIL", Some(Coordinates::new(-79.9203, -2.1709))),
    ("GUAYAQUIL-POSORJA", Some(Coordinates::new(-80.0833, -2.7833))),
    ("MANZANILLO - MÉXICO", Some(Coordinates::new(-104.3156, 19.0519))),
    ("MANZANILLO - MEXICO", Some(Coordinates::new(-104.3156, 19.0519))),
    ("MANZANILLO-MEXICO", Some(Coordinates::new(-104.3156, 19.0519))),
    ("MANZANILLO-MÉXICO", Some(Coordinates::new(-104.3156, 19.0519))),
    ("MANZANILLO MEXICO", Some(Coordinates::new(-104.3156, 19.0519))),
    ("MANZANILLO MÉXICO", Some(Coordinates::new(-104.3156, 19.0519))),
    ("MANZANILLO", Some(Coordinates::new(-104.3156, 19.0519))),
    ("LAZARO CARDENAS", Some(Coordinates::new(-102.1956, 17.9561))),
    ("BUSAN", Some(Coordinates::new(129.0756, 35.1796))),
    ("SINGAPORE", Some(Coordinates::new(103.8198, 1.2897))),
    ("SHANGHAI, CHINA", Some(Coordinates::new(121.5000, 31.2000))),
    ("SHANGHAI CN", Some(Coordinates::new(121.5000, 31.2000))),
    ("CNSHA", Some(Coordinates::new(121.5000, 31.2000))),
    ("SHENZHEN, CHINA", Some(Coordinates::new(114.2200, 22.4800))),
    ("SHENZHEN CN", Some(Coordinates::new(114.2200, 22.4800))),
    ("CNSZN", Some(Coordinates::new(114.2200, 22.4800))),
    ("NINGBO, CHINA", Some(Coordinates::new(121.8300, 29.9500))),
    ("NINGBO CN", Some(Coordinates::new(121.8300, 29.9500))),
    ("CNNGB", Some(Coordinates::new(121.8300, 29.9500))),
    ("QINGDAO, CHINA", Some(Coordinates::new(120.3000, 36.0500))),
    ("QINGDAO CN", Some(Coordinates::new(120.3000, 36.0500))),
    ("CNQIN", Some(Coordinates::new(120.3000, 36.0500))),
    ("TIANJIN, CHINA", Some(Coordinates::new(117.8000, 38.9800))),
    ("TIANJIN CN", Some(Coordinates::new(117.8000, 38.9800))),
    ("CNTXG", Some(Coordinates::new(117.8000, 38.9800))),
    ("XINGANG TIANJIN", Some(Coordinates::new(117.8000, 38.9800))),
    ("TIANJIN XINGANG", Some(Coordinates::new(117.8000, 38.9800))),
    ("PRUEBA", None),
    ("ZAMBRANO", Some(Coordinates::new(-63.6167, -38.4161))),
];

/// Last-resort substrings checked against the normalized name.
const KEYWORDS: &[(&str, Coordinates)] = &[
    ("SHANGHAI", Coordinates::new(121.5000, 31.2000)),
    ("YANGSHAN", Coordinates::new(121.5000, 31.2000)),
    ("SHENZHEN", Coordinates::new(114.2200, 22.4800)),
    ("YANTIAN", Coordinates::new(114.2200, 22.4800)),
    ("SHEKOU", Coordinates::new(113.8800, 22.4800)),
    ("CHIWAN", Coordinates::new(113.8800, 22.4800)),
    ("NINGBO", Coordinates::new(121.8300, 29.9500)),
    ("ZHOUSHAN", Coordinates::new(121.8300, 29.9500)),
    ("QINGDAO", Coordinates::new(120.3000, 36.0500)),
    ("TIANJIN", Coordinates::new(117.8000, 38.9800)),
    ("XINGANG", Coordinates::new(117.8000, 38.9800)),
    ("PHILADELPHIA", Coordinates::new(-75.1652, 39.9526)),
    ("BARCELONA", Coordinates::new(2.1734, 41.3851)),
    ("ALGECIRAS", Coordinates::new(-5.4565, 36.1269)),
    ("ROTTERDAM", Coordinates::new(4.4777, 51.9225)),
    ("HAMBURG", Coordinates::new(9.9937, 53.5511)),
    ("ANTWERP", Coordinates::new(4.4028, 51.2194)),
    ("LOS ANGELES", Coordinates::new(-118.2437, 34.0522)),
    ("LONG BEACH", Coordinates::new(-118.1937, 33.7701)),
    ("MANZANILLO", Coordinates::new(-104.3156, 19.0519)),
    ("SALVADOR BAHIA", Coordinates::new(-38.5108, -12.9714)),
    ("SALVADOR DE BAHIA", Coordinates::new(-38.5108, -12.9714)),
];

struct PortEntry {
    name: &'static str,
    normalized: String,
    compact: String,
    coordinates: Option<Coordinates>,
}

struct PortIndex {
    /// Table order, used for exact matches
    entries: Vec<PortEntry>,
    /// Indices into `entries`: `" - "` names first, then longest first
    by_specificity: Vec<usize>,
}

fn index() -> &'static PortIndex {
    static INDEX: OnceLock<PortIndex> = OnceLock::new();
    INDEX.get_or_init(|| {
        let entries: Vec<PortEntry> = PORTS
            .iter()
            .map(|(name, coordinates)| {
                let normalized = normalize_place_name(name);
                PortEntry {
                    name: *name,
                    compact: compact_place_name(&normalized),
                    normalized,
                    coordinates: *coordinates,
                }
            })
            .collect();

        let mut by_specificity: Vec<usize> = (0..entries.len()).collect();
        // Stable sort keeps table order among equally specific names.
        by_specificity.sort_by_key(|&i| {
            let name = entries[i].name;
            (!name.contains(" - "), std::cmp::Reverse(name.chars().count()))
        });

        PortIndex {
            entries,
            by_specificity,
        }
    })
}

/// Static directory of port coordinates.
pub struct PortDirectory;

impl PortDirectory {
    /// Resolves a free-text port name to coordinates.
    ///
    /// Tries an exact match on the normalized name, then partial matches over
    /// the most specific names first, then a keyword table. Returns `None`
    /// for empty names, placeholders and unknown ports.
    pub fn resolve(port_name: &str) -> Option<PortMatch> {
        let normalized = normalize_place_name(port_name);
        if normalized.is_empty() {
            return None;
        }
        let index = index();

        if let Some(entry) = index
            .entries
            .iter()
            .find(|e| e.coordinates.is_some() && e.normalized == normalized)
        {
            return entry.coordinates.map(|coordinates| PortMatch {
                entry: entry.name,
                coordinates,
                kind: PortMatchKind::Exact,
            });
        }

        let compact = compact_place_name(&normalized);
        let manzanillo_mexico =
            normalized.contains("MANZANILLO") && !normalized.contains("PANAMA");
        let salvador_bahia = normalized.contains("SALVADOR") && normalized.contains("BAHIA");

        for &i in &index.by_specificity {
            let entry = &index.entries[i];
            let Some(coordinates) = entry.coordinates else {
                continue;
            };

            let matched = contains_either(&normalized, &entry.normalized)
                || contains_either(&compact, &entry.compact)
                || (manzanillo_mexico
                    && entry.normalized.contains("MANZANILLO")
                    && (entry.normalized.contains("MEXICO") || entry.name == "MANZANILLO"))
                || (salvador_bahia
                    && entry.normalized.contains("SALVADOR")
                    && entry.normalized.contains("BAHIA"));

            if matched {
                return Some(PortMatch {
                    entry: entry.name,
                    coordinates,
                    kind: PortMatchKind::Partial,
                });
            }
        }

        KEYWORDS
            .iter()
            .find(|(keyword, _)| normalized.contains(keyword))
            .map(|(keyword, coordinates)| PortMatch {
                entry: *keyword,
                coordinates: *coordinates,
                kind: PortMatchKind::Keyword,
            })
    }

    /// Coordinates only; see [`PortDirectory::resolve`].
    pub fn coordinates(port_name: &str) -> Option<Coordinates> {
        Self::resolve(port_name).map(|m| m.coordinates)
    }
}
