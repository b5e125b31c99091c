//! Place name vocabularies: country canonicalization, ISO country codes,
//! country name to code lookup and marine water body terms.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Canonical form used for the United States at every oracle boundary.
pub const UNITED_STATES: &str = "UNITED STATES";

/// Aliases that collapse to [`UNITED_STATES`], compared case-insensitively.
const UNITED_STATES_ALIASES: &[&str] = &["usa", "u.s.a.", "united states of america"];

/// Canonicalize a country name before it reaches a region oracle.
///
/// Recognized aliases of the United States map to [`UNITED_STATES`]; every
/// other name is trimmed and upper-cased.
pub fn canonical_country_name(country: &str) -> String {
    let trimmed = country.trim();
    let lower = trimmed.to_lowercase();
    if UNITED_STATES_ALIASES.contains(&lower.as_str()) {
        UNITED_STATES.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

/// Canonicalize a state/province name for lookup (trimmed, upper-cased).
pub fn canonical_subregion_name(subregion: &str) -> String {
    subregion.trim().to_uppercase()
}

/// Ocean and sea words accepted as evidence of a marine water body.
///
/// `Carribean` and `Mediteranian` are historical misspellings that existing
/// records still carry; both spellings are accepted.
pub const MARINE_TERMS: &[&str] = &[
    "Indian",
    "Pacific",
    "Arctic",
    "Atlantic",
    "Ocean",
    "Sea",
    "Caribbean",
    "Mediterranean",
    "Carribean",
    "Mediteranian",
];

/// Whether a water body names an ocean or sea.
///
/// Matching is case-sensitive and token based: at least one whitespace or
/// punctuation separated word must equal a [`MARINE_TERMS`] entry.
pub fn is_marine_water_body(water_body: &str) -> bool {
    water_body
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';' || c == '(' || c == ')')
        .filter(|token| !token.is_empty())
        .any(|token| MARINE_TERMS.contains(&token))
}

/// ISO 3166-1 alpha-2 codes.
const ISO_ALPHA2_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

static ISO_ALPHA2_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ISO_ALPHA2_CODES.iter().copied().collect());

/// Case-sensitive check against the ISO 3166-1 alpha-2 list.
pub fn is_iso_alpha2_code(code: &str) -> bool {
    ISO_ALPHA2_SET.contains(code)
}

/// All known ISO 3166-1 alpha-2 codes.
pub fn iso_alpha2_codes() -> &'static [&'static str] {
    ISO_ALPHA2_CODES
}

/// Upper-cased country names, with common native-language and short forms,
/// mapped to their ISO 3166-1 alpha-2 code.
const COUNTRY_NAME_CODES: &[(&str, &str)] = &[
    ("ANDORRA", "AD"),
    ("UNITED ARAB EMIRATES", "AE"),
    ("AFGHANISTAN", "AF"),
    ("ANTIGUA AND BARBUDA", "AG"),
    ("ANGUILLA", "AI"),
    ("ALBANIA", "AL"),
    ("ARMENIA", "AM"),
    ("ANGOLA", "AO"),
    ("ANTARCTICA", "AQ"),
    ("ARGENTINA", "AR"),
    ("AMERICAN SAMOA", "AS"),
    ("AUSTRIA", "AT"),
    ("ÖSTERREICH", "AT"),
    ("AUSTRALIA", "AU"),
    ("ARUBA", "AW"),
    ("ÅLAND ISLANDS", "AX"),
    ("AZERBAIJAN", "AZ"),
    ("BOSNIA AND HERZEGOVINA", "BA"),
    ("BARBADOS", "BB"),
    ("BANGLADESH", "BD"),
    ("BELGIUM", "BE"),
    ("BURKINA FASO", "BF"),
    ("BULGARIA", "BG"),
    ("BAHRAIN", "BH"),
    ("BURUNDI", "BI"),
    ("BENIN", "BJ"),
    ("SAINT BARTHÉLEMY", "BL"),
    ("BERMUDA", "BM"),
    ("BRUNEI", "BN"),
    ("BRUNEI DARUSSALAM", "BN"),
    ("BOLIVIA", "BO"),
    ("BONAIRE, SINT EUSTATIUS AND SABA", "BQ"),
    ("BRAZIL", "BR"),
    ("BRASIL", "BR"),
    ("BAHAMAS", "BS"),
    ("THE BAHAMAS", "BS"),
    ("BHUTAN", "BT"),
    ("BOUVET ISLAND", "BV"),
    ("BOTSWANA", "BW"),
    ("BELARUS", "BY"),
    ("BELIZE", "BZ"),
    ("CANADA", "CA"),
    ("COCOS (KEELING) ISLANDS", "CC"),
    ("DEMOCRATIC REPUBLIC OF THE CONGO", "CD"),
    ("DEM. REP. CONGO", "CD"),
    ("CENTRAL AFRICAN REPUBLIC", "CF"),
    ("CONGO", "CG"),
    ("REPUBLIC OF THE CONGO", "CG"),
    ("SWITZERLAND", "CH"),
    ("CÔTE D'IVOIRE", "CI"),
    ("IVORY COAST", "CI"),
    ("COOK ISLANDS", "CK"),
    ("CHILE", "CL"),
    ("CAMEROON", "CM"),
    ("CHINA", "CN"),
    ("COLOMBIA", "CO"),
    ("COSTA RICA", "CR"),
    ("CUBA", "CU"),
    ("CABO VERDE", "CV"),
    ("CAPE VERDE", "CV"),
    ("CURAÇAO", "CW"),
    ("CHRISTMAS ISLAND", "CX"),
    ("CYPRUS", "CY"),
    ("CZECHIA", "CZ"),
    ("CZECH REPUBLIC", "CZ"),
    ("GERMANY", "DE"),
    ("DEUTSCHLAND", "DE"),
    ("DJIBOUTI", "DJ"),
    ("DENMARK", "DK"),
    ("DOMINICA", "DM"),
    ("DOMINICAN REPUBLIC", "DO"),
    ("ALGERIA", "DZ"),
    ("ECUADOR", "EC"),
    ("ESTONIA", "EE"),
    ("EGYPT", "EG"),
    ("WESTERN SAHARA", "EH"),
    ("ERITREA", "ER"),
    ("SPAIN", "ES"),
    ("ESPAÑA", "ES"),
    ("ETHIOPIA", "ET"),
    ("FINLAND", "FI"),
    ("FIJI", "FJ"),
    ("FALKLAND ISLANDS", "FK"),
    ("MICRONESIA", "FM"),
    ("FAROE ISLANDS", "FO"),
    ("FRANCE", "FR"),
    ("GABON", "GA"),
    ("UNITED KINGDOM", "GB"),
    ("GRENADA", "GD"),
    ("GEORGIA", "GE"),
    ("FRENCH GUIANA", "GF"),
    ("GUERNSEY", "GG"),
    ("GHANA", "GH"),
    ("GIBRALTAR", "GI"),
    ("GREENLAND", "GL"),
    ("GAMBIA", "GM"),
    ("GUINEA", "GN"),
    ("GUADELOUPE", "GP"),
    ("EQUATORIAL GUINEA", "GQ"),
    ("GREECE", "GR"),
    ("SOUTH GEORGIA AND THE SOUTH SANDWICH ISLANDS", "GS"),
    ("GUATEMALA", "GT"),
    ("GUAM", "GU"),
    ("GUINEA-BISSAU", "GW"),
    ("GUYANA", "GY"),
    ("HONG KONG", "HK"),
    ("HEARD ISLAND AND MCDONALD ISLANDS", "HM"),
    ("HONDURAS", "HN"),
    ("CROATIA", "HR"),
    ("HAITI", "HT"),
    ("HUNGARY", "HU"),
    ("INDONESIA", "ID"),
    ("IRELAND", "IE"),
    ("ISRAEL", "IL"),
    ("ISLE OF MAN", "IM"),
    ("INDIA", "IN"),
    ("BRITISH INDIAN OCEAN TERRITORY", "IO"),
    ("IRAQ", "IQ"),
    ("IRAN", "IR"),
    ("ICELAND", "IS"),
    ("ITALY", "IT"),
    ("ITALIA", "IT"),
    ("JERSEY", "JE"),
    ("JAMAICA", "JM"),
    ("JORDAN", "JO"),
    ("JAPAN", "JP"),
    ("KENYA", "KE"),
    ("KYRGYZSTAN", "KG"),
    ("CAMBODIA", "KH"),
    ("KIRIBATI", "KI"),
    ("COMOROS", "KM"),
    ("SAINT KITTS AND NEVIS", "KN"),
    ("NORTH KOREA", "KP"),
    ("SOUTH KOREA", "KR"),
    ("KUWAIT", "KW"),
    ("CAYMAN ISLANDS", "KY"),
    ("KAZAKHSTAN", "KZ"),
    ("LAOS", "LA"),
    ("LEBANON", "LB"),
    ("SAINT LUCIA", "LC"),
    ("LIECHTENSTEIN", "LI"),
    ("SRI LANKA", "LK"),
    ("LIBERIA", "LR"),
    ("LESOTHO", "LS"),
    ("LITHUANIA", "LT"),
    ("LUXEMBOURG", "LU"),
    ("LATVIA", "LV"),
    ("LIBYA", "LY"),
    ("MOROCCO", "MA"),
    ("MONACO", "MC"),
    ("MOLDOVA", "MD"),
    ("MONTENEGRO", "ME"),
    ("SAINT MARTIN", "MF"),
    ("MADAGASCAR", "MG"),
    ("MARSHALL ISLANDS", "MH"),
    ("NORTH MACEDONIA", "MK"),
    ("MALI", "ML"),
    ("MYANMAR", "MM"),
    ("MONGOLIA", "MN"),
    ("MACAO", "MO"),
    ("NORTHERN MARIANA ISLANDS", "MP"),
    ("MARTINIQUE", "MQ"),
    ("MAURITANIA", "MR"),
    ("MONTSERRAT", "MS"),
    ("MALTA", "MT"),
    ("MAURITIUS", "MU"),
    ("MALDIVES", "MV"),
    ("MALAWI", "MW"),
    ("MEXICO", "MX"),
    ("MÉXICO", "MX"),
    ("MALAYSIA", "MY"),
    ("MOZAMBIQUE", "MZ"),
    ("NAMIBIA", "NA"),
    ("NEW CALEDONIA", "NC"),
    ("NIGER", "NE"),
    ("NORFOLK ISLAND", "NF"),
    ("NIGERIA", "NG"),
    ("NICARAGUA", "NI"),
    ("NETHERLANDS", "NL"),
    ("NORWAY", "NO"),
    ("NEPAL", "NP"),
    ("NAURU", "NR"),
    ("NIUE", "NU"),
    ("NEW ZEALAND", "NZ"),
    ("OMAN", "OM"),
    ("PANAMA", "PA"),
    ("PANAMÁ", "PA"),
    ("PERU", "PE"),
    ("PERÚ", "PE"),
    ("FRENCH POLYNESIA", "PF"),
    ("PAPUA NEW GUINEA", "PG"),
    ("PHILIPPINES", "PH"),
    ("PAKISTAN", "PK"),
    ("POLAND", "PL"),
    ("SAINT PIERRE AND MIQUELON", "PM"),
    ("PITCAIRN", "PN"),
    ("PUERTO RICO", "PR"),
    ("PALESTINE", "PS"),
    ("PORTUGAL", "PT"),
    ("PALAU", "PW"),
    ("PARAGUAY", "PY"),
    ("QATAR", "QA"),
    ("RÉUNION", "RE"),
    ("ROMANIA", "RO"),
    ("SERBIA", "RS"),
    ("RUSSIA", "RU"),
    ("RUSSIAN FEDERATION", "RU"),
    ("RWANDA", "RW"),
    ("SAUDI ARABIA", "SA"),
    ("SOLOMON ISLANDS", "SB"),
    ("SEYCHELLES", "SC"),
    ("SUDAN", "SD"),
    ("SWEDEN", "SE"),
    ("SINGAPORE", "SG"),
    ("SAINT HELENA", "SH"),
    ("SLOVENIA", "SI"),
    ("SVALBARD AND JAN MAYEN", "SJ"),
    ("SLOVAKIA", "SK"),
    ("SIERRA LEONE", "SL"),
    ("SAN MARINO", "SM"),
    ("SENEGAL", "SN"),
    ("SOMALIA", "SO"),
    ("SURINAME", "SR"),
    ("SOUTH SUDAN", "SS"),
    ("SAO TOME AND PRINCIPE", "ST"),
    ("EL SALVADOR", "SV"),
    ("SINT MAARTEN", "SX"),
    ("SYRIA", "SY"),
    ("ESWATINI", "SZ"),
    ("SWAZILAND", "SZ"),
    ("TURKS AND CAICOS ISLANDS", "TC"),
    ("CHAD", "TD"),
    ("FRENCH SOUTHERN TERRITORIES", "TF"),
    ("TOGO", "TG"),
    ("THAILAND", "TH"),
    ("TAJIKISTAN", "TJ"),
    ("TOKELAU", "TK"),
    ("TIMOR-LESTE", "TL"),
    ("EAST TIMOR", "TL"),
    ("TURKMENISTAN", "TM"),
    ("TUNISIA", "TN"),
    ("TONGA", "TO"),
    ("TURKEY", "TR"),
    ("TÜRKIYE", "TR"),
    ("TRINIDAD AND TOBAGO", "TT"),
    ("TUVALU", "TV"),
    ("TAIWAN", "TW"),
    ("TANZANIA", "TZ"),
    ("UKRAINE", "UA"),
    ("UGANDA", "UG"),
    ("UNITED STATES MINOR OUTLYING ISLANDS", "UM"),
    ("UNITED STATES", "US"),
    ("URUGUAY", "UY"),
    ("UZBEKISTAN", "UZ"),
    ("VATICAN CITY", "VA"),
    ("HOLY SEE", "VA"),
    ("SAINT VINCENT AND THE GRENADINES", "VC"),
    ("VENEZUELA", "VE"),
    ("BRITISH VIRGIN ISLANDS", "VG"),
    ("UNITED STATES VIRGIN ISLANDS", "VI"),
    ("VIETNAM", "VN"),
    ("VIET NAM", "VN"),
    ("VANUATU", "VU"),
    ("WALLIS AND FUTUNA", "WF"),
    ("SAMOA", "WS"),
    ("YEMEN", "YE"),
    ("MAYOTTE", "YT"),
    ("SOUTH AFRICA", "ZA"),
    ("ZAMBIA", "ZM"),
    ("ZIMBABWE", "ZW"),
];

static COUNTRY_NAME_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRY_NAME_CODES.iter().copied().collect());

/// The ISO 3166-1 alpha-2 code for a country name.
///
/// Matching ignores case only: surrounding whitespace, abbreviations such as
/// `USA` and misspellings are not recognized. Pass a name produced by
/// [`canonical_country_name`] to look up a normalized name.
pub fn country_code_for_name(name: &str) -> Option<&'static str> {
    COUNTRY_NAME_INDEX.get(name.to_uppercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_united_states_aliases() {
        assert_eq!(canonical_country_name("USA"), UNITED_STATES);
        assert_eq!(canonical_country_name("usa"), UNITED_STATES);
        assert_eq!(canonical_country_name("U.S.A."), UNITED_STATES);
        assert_eq!(canonical_country_name("United States of America"), UNITED_STATES);
        assert_eq!(canonical_country_name(" united states of america "), UNITED_STATES);
        assert_eq!(canonical_country_name("United States"), UNITED_STATES);
    }

    #[test]
    fn test_other_names_upper_cased() {
        assert_eq!(canonical_country_name("Uganda"), "UGANDA");
        assert_eq!(canonical_country_name(" Costa Rica"), "COSTA RICA");
        assert_eq!(canonical_country_name("US"), "US");
    }

    #[test]
    fn test_marine_water_body_tokens() {
        assert!(is_marine_water_body("Pacific"));
        assert!(is_marine_water_body("Pacific Ocean"));
        assert!(is_marine_water_body("Gulf of Mexico, Caribbean Sea"));
        assert!(is_marine_water_body("Carribean"));
        assert!(is_marine_water_body("Mediteranian"));
        assert!(!is_marine_water_body("pacific ocean"));
        assert!(!is_marine_water_body("Lake Victoria"));
        assert!(!is_marine_water_body("Seaside pond"));
        assert!(!is_marine_water_body(""));
    }

    #[test]
    fn test_iso_codes() {
        assert!(is_iso_alpha2_code("UG"));
        assert!(is_iso_alpha2_code("TL"));
        assert!(!is_iso_alpha2_code("ug"));
        assert!(!is_iso_alpha2_code("a"));
        assert!(!is_iso_alpha2_code("USA"));
        assert_eq!(iso_alpha2_codes().len(), ISO_ALPHA2_SET.len());
    }

    #[test]
    fn test_country_code_for_name() {
        assert_eq!(country_code_for_name("Uganda"), Some("UG"));
        assert_eq!(country_code_for_name("UGANDA"), Some("UG"));
        assert_eq!(country_code_for_name("México"), Some("MX"));
        assert_eq!(country_code_for_name("Mexico"), Some("MX"));
        assert_eq!(country_code_for_name(UNITED_STATES), Some("US"));
        assert_eq!(country_code_for_name("USA"), None);
        assert_eq!(country_code_for_name(" Uganda"), None);
        assert_eq!(country_code_for_name(""), None);
    }

    #[test]
    fn test_country_name_codes_are_iso() {
        assert_eq!(COUNTRY_NAME_INDEX.len(), COUNTRY_NAME_CODES.len());
        for (name, code) in COUNTRY_NAME_CODES {
            assert!(is_iso_alpha2_code(code), "{} -> {}", name, code);
            assert_eq!(name.to_uppercase(), *name);
        }
    }
}
