use std::fs;

use tempfile::TempDir;

use halberd::error::HalberdError;
use halberd::intent::classifier::IntentClassifier;
use halberd::intent::corpus::ExampleSet;
use halberd::intent::semantic_classifier::SemanticClassifier;

#[test]
fn test_save_then_load_preserves_mapping() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("examples.json");

    let original = ExampleSet::builtin();
    original.save(&path)?;
    let loaded = ExampleSet::load(&path)?;
    assert_eq!(loaded, original);

    // A second pass through the file changes nothing.
    loaded.save(&path)?;
    assert_eq!(ExampleSet::load(&path)?, original);
    Ok(())
}

#[test]
fn test_phrase_order_survives_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("nested").join("dir").join("examples.json");

    let set = ExampleSet::from_pairs([
        ("timer", vec!["zzz last alphabetically", "aaa first alphabetically"]),
        ("note", vec!["write this down"]),
    ]);
    set.save(&path)?;

    let loaded = ExampleSet::load(&path)?;
    assert_eq!(
        loaded.examples("timer"),
        ["zzz last alphabetically", "aaa first alphabetically"]
    );
    assert_eq!(loaded.intents().collect::<Vec<_>>(), vec!["note", "timer"]);
    Ok(())
}

#[test]
fn test_load_or_init_writes_defaults_once() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("examples.json");

    let first = ExampleSet::load_or_init(&path)?;
    assert!(path.exists());
    assert_eq!(first, ExampleSet::builtin());

    fs::write(&path, r#"{"note": ["only this"]}"#)?;
    let second = ExampleSet::load_or_init(&path)?;
    assert_eq!(second.len(), 1);
    assert_eq!(second.examples("note"), ["only this"]);
    Ok(())
}

#[test]
fn test_malformed_file_is_a_corpus_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("examples.json");
    fs::write(&path, r#"{"note": "not a list"}"#)?;

    assert!(matches!(ExampleSet::load(&path), Err(HalberdError::Corpus(_))));
    assert!(matches!(
        ExampleSet::load(temp_dir.path().join("missing.json")),
        Err(HalberdError::Io(_))
    ));
    Ok(())
}

#[test]
fn test_loaded_corpus_trains_classifier() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("examples.json");
    fs::write(
        &path,
        r#"{"weather": ["what is the forecast", "will it rain tomorrow"], "note": []}"#,
    )?;

    let classifier = SemanticClassifier::new(&ExampleSet::load(&path)?)?;
    let result = classifier.classify("will it rain tomorrow")?;
    assert_eq!(result.intent, "weather");
    assert!(result.confidence >= 0.99);
    Ok(())
}

#[test]
fn test_empty_corpus_is_valid() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("examples.json");
    fs::write(&path, "{}")?;

    let examples = ExampleSet::load(&path)?;
    assert!(examples.is_empty());

    let classifier = SemanticClassifier::new(&examples)?;
    let result = classifier.classify("take note of this")?;
    assert!(result.is_unknown());
    assert_eq!(result.confidence, 0.0);
    Ok(())
}
