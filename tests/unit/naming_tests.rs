/*!
 * Tests for output file naming
 */

use std::path::MAIN_SEPARATOR;
use std::sync::Arc;

use dualsub::labels::BuiltinLabels;
use dualsub::merger::common_characters;
use dualsub::{MergeError, Merger, MergerOptions, Track};

fn expected(name: &str) -> String {
    format!("out{}{}", MAIN_SEPARATOR, name)
}

fn translate_merger(merge_label: bool) -> Merger {
    let mut options = MergerOptions::new("out");
    options.translate = true;
    options.merge_label = merge_label;
    Merger::new(options)
}

/// Shared characters of both names build the output name
#[test]
fn test_compute_output_name_withSimilarNames_shouldUseSharedCharacters() {
    let merger = Merger::new(MergerOptions::new("out"));

    let name = merger
        .compute_output_name(Some("episode01_en.srt"), Some("episode01_es.srt"))
        .unwrap();

    assert_eq!(name, expected("episode01_e.srt"));
}

/// Directories are ignored when comparing names
#[test]
fn test_compute_output_name_withDirectories_shouldCompareFileNamesOnly() {
    let merger = Merger::new(MergerOptions::new("out"));
    let left = format!("a{}movie.en.srt", MAIN_SEPARATOR);
    let right = format!("b{}movie.es.srt", MAIN_SEPARATOR);

    let name = merger.compute_output_name(Some(&left), Some(&right)).unwrap();

    assert_eq!(name, expected("movie.e.srt"));
}

/// Names with nothing in common fall back to the localized default
#[test]
fn test_compute_output_name_withNoSharedCharacters_shouldUseDefaultName() {
    let merger = Merger::new(MergerOptions::new("out"));
    assert_eq!(
        merger.compute_output_name(Some("abc.srt"), Some("xyz.srt")).unwrap(),
        expected("Merged.srt")
    );

    let spanish = Merger::with_labels(MergerOptions::new("out"), Arc::new(BuiltinLabels::for_language("es")));
    assert_eq!(
        spanish.compute_output_name(Some("abc.srt"), Some("xyz.srt")).unwrap(),
        expected("Fusionado.srt")
    );
}

/// Naming is deterministic
#[test]
fn test_compute_output_name_shouldBeDeterministic() {
    let merger = Merger::new(MergerOptions::new("out"));
    let first = merger.compute_output_name(Some("show_s01e02.en.srt"), Some("show_s01e02.fr.srt"));
    let second = merger.compute_output_name(Some("show_s01e02.en.srt"), Some("show_s01e02.fr.srt"));
    assert_eq!(first, second);
}

/// Translate mode appends the translated label before the extension
#[test]
fn test_compute_output_name_withTranslateMode_shouldAppendLabel() {
    let name = translate_merger(false)
        .compute_output_name(Some("movie.srt"), Some("movie.es.srt"))
        .unwrap();
    assert_eq!(name, expected("movie translated.srt"));

    let name = translate_merger(true)
        .compute_output_name(Some("movie.srt"), None)
        .unwrap();
    assert_eq!(name, expected("movie merged.srt"));
}

/// Translate mode uses the right name when the left one is missing
#[test]
fn test_compute_output_name_withTranslateModeAndNoLeft_shouldUseRight() {
    let name = translate_merger(false)
        .compute_output_name(None, Some("film.srt"))
        .unwrap();
    assert_eq!(name, expected("film translated.srt"));
}

/// Translate mode without an extension only appends the label
#[test]
fn test_compute_output_name_withTranslateModeAndNoExtension_shouldAppendLabel() {
    let name = translate_merger(false)
        .compute_output_name(Some("captions"), None)
        .unwrap();
    assert_eq!(name, expected("captions translated"));
}

/// Missing names are reported
#[test]
fn test_compute_output_name_withNoNames_shouldFail() {
    let merger = Merger::new(MergerOptions::new("out"));
    let result = merger.compute_output_name(None, None);
    assert!(matches!(result, Err(MergeError::MissingInput(_))));
}

/// Track file names feed the naming function
#[test]
fn test_output_name_for_withTracks_shouldUseFileNames() {
    let merger = Merger::new(MergerOptions::new("out"));
    let left = Track::default().with_file_name("talk_en.srt");
    let right = Track::default().with_file_name("talk_de.srt");

    assert_eq!(merger.output_name_for(&left, &right).unwrap(), expected("talk_e.srt"));
}

/// Character intersection keeps first-name order
#[test]
fn test_common_characters_shouldFollowFirstNameOrder() {
    assert_eq!(common_characters("episode01_en", "episode01_es"), "episode01_e");
    assert_eq!(common_characters("dcba", "abcd"), "dcba");
}

/// Translate mode drops the directories of the source name
#[test]
fn test_compute_output_name_withTranslateModeAndDirectory_shouldUseFileNameOnly() {
    let left = format!("season1{}show.s01e01.srt", MAIN_SEPARATOR);
    let name = translate_merger(false)
        .compute_output_name(Some(&left), None)
        .unwrap();
    assert_eq!(name, expected("show.s01e01 translated.srt"));
}
