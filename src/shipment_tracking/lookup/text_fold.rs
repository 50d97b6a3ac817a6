//! Place-name normalization shared by the port and country directories.

/// Replaces accented Latin letters with their base letter.
///
/// Only the accents that show up in port and country names are folded;
/// every other character passes through unchanged.
pub fn fold_accents(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ç' => 'C',
        'ç' => 'c',
        other => other,
    }
}

/// Canonical form used for every place lookup: uppercase, accents folded,
/// `.,;:` removed and whitespace collapsed to single spaces.
pub fn normalize_place_name(name: &str) -> String {
    let folded = fold_accents(&name.trim().to_uppercase());
    let stripped: String = folded
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ';' | ':'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized name with all spaces and hyphens removed, so that
/// `"SALVADOR-BAHIA"` and `"SALVADOR BAHIA"` compare equal.
pub fn compact_place_name(normalized: &str) -> String {
    normalized
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// True when either string contains the other.
pub(crate) fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("MÉXICO"), "MEXICO");
        assert_eq!(fold_accents("Bahía"), "Bahia");
        assert_eq!(fold_accents("PANAMÁ"), "PANAMA");
        assert_eq!(fold_accents("Curaçao"), "Curacao");
    }

    #[test]
    fn test_normalize_place_name() {
        assert_eq!(normalize_place_name("  salvador,   bahía "), "SALVADOR BAHIA");
        assert_eq!(normalize_place_name("Manzanillo - México"), "MANZANILLO - MEXICO");
        assert_eq!(normalize_place_name("st. petersburg;"), "ST PETERSBURG");
        assert_eq!(normalize_place_name(""), "");
    }

    #[test]
    fn test_compact_place_name() {
        assert_eq!(compact_place_name("SALVADOR-BAHIA"), "SALVADORBAHIA");
        assert_eq!(compact_place_name("SALVADOR BAHIA"), "SALVADORBAHIA");
        assert_eq!(compact_place_name("GUAYAQUIL - POSORJA"), "GUAYAQUILPOSORJA");
    }

    #[test]
    fn test_contains_either() {
        assert!(contains_either("SHANGHAI CN", "SHANGHAI"));
        assert!(contains_either("SHANGHAI", "SHANGHAI CN"));
        assert!(!contains_either("ROTTERDAM", "ANTWERP"));
    }
}
