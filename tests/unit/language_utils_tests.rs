/*!
 * Tests for ISO language code utilities
 */

use dualsub::language_utils::{get_language_name, language_codes_match, normalize_to_part1_or_part2t};

/// Test normalization of 2- and 3-letter codes
#[test]
fn test_normalize_withVariousCodes_shouldPreferPart1() {
    assert_eq!(normalize_to_part1_or_part2t("en").unwrap(), "en");
    assert_eq!(normalize_to_part1_or_part2t("spa").unwrap(), "es");
    assert_eq!(normalize_to_part1_or_part2t("FRE").unwrap(), "fr");
    assert_eq!(normalize_to_part1_or_part2t(" ger ").unwrap(), "de");
}

/// Test invalid codes
#[test]
fn test_normalize_withInvalidCode_shouldFail() {
    assert!(normalize_to_part1_or_part2t("").is_err());
    assert!(normalize_to_part1_or_part2t("zz").is_err());
    assert!(normalize_to_part1_or_part2t("english").is_err());
}

/// Test matching across code forms
#[test]
fn test_language_codes_match_acrossForms() {
    assert!(language_codes_match("de", "deu"));
    assert!(language_codes_match("de", "ger"));
    assert!(!language_codes_match("de", "fr"));
    assert!(!language_codes_match("xx", "xx"));
}

/// Test language names
#[test]
fn test_get_language_name_withValidCode_shouldReturnEnglishName() {
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert_eq!(get_language_name("fra").unwrap(), "French");
}
