use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use halberd::config::HalberdConfig;
use halberd::extraction::rule_based::RuleBasedExtractor;
use halberd::intent::core::from_config;
use halberd::intent::corpus::ExampleSet;
use halberd::pipeline::Pipeline;

/// Friday, 2025-03-14 09:00.
fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn pipeline() -> Pipeline {
    let classifier = from_config(&HalberdConfig::default(), ExampleSet::builtin()).unwrap();
    Pipeline::builder()
        .classifier(classifier)
        .extractor(Arc::new(
            RuleBasedExtractor::new().with_reference_time(reference_time()),
        ))
        .build()
        .unwrap()
}

#[test]
fn test_reminder_with_date() -> Result<(), Box<dyn std::error::Error>> {
    let result = pipeline().process("remind me to call mom tomorrow")?;

    assert_eq!(result.intent, "reminder");
    assert_eq!(result.confidence, 0.7);
    assert_eq!(result.entity("text").unwrap(), "call mom tomorrow");

    let datetime = result.entity("datetime").unwrap();
    assert_eq!(datetime["expression"], "tomorrow");
    assert_eq!(datetime["value"], "2025-03-15");
    assert_eq!(datetime["granularity"], "date");
    Ok(())
}

#[test]
fn test_timer_with_duration() -> Result<(), Box<dyn std::error::Error>> {
    let result = pipeline().process("set timer for 10 minutes")?;

    assert_eq!(result.intent, "timer");
    assert_eq!(result.confidence, 0.95);
    assert_eq!(result.entity("number").unwrap()[0], 10.0);
    assert_eq!(result.entity("text").unwrap(), "10 minutes");

    let quantity = &result.entity("units").unwrap()["quantities"][0];
    assert_eq!(quantity["value"], 10.0);
    assert_eq!(quantity["unit"], "minute");
    assert_eq!(quantity["dimension"], "time");
    Ok(())
}

#[test]
fn test_conversion() -> Result<(), Box<dyn std::error::Error>> {
    let result = pipeline().process("convert 5 km to miles")?;

    assert_eq!(result.intent, "convert");
    let units = result.entity("units").unwrap();
    assert_eq!(units["quantities"][0]["value"], 5.0);
    assert_eq!(units["quantities"][0]["unit"], "kilometer");
    assert_eq!(units["target"], "mile");
    Ok(())
}

#[test]
fn test_relative_time_reminder() -> Result<(), Box<dyn std::error::Error>> {
    let result = pipeline().process("ping me in an hour about the laundry")?;

    assert_eq!(result.intent, "reminder");
    let datetime = result.entity("datetime").unwrap();
    assert_eq!(datetime["value"], "2025-03-14T10:00:00");
    assert_eq!(datetime["granularity"], "datetime");
    Ok(())
}

#[test]
fn test_unknown_still_gets_text() -> Result<(), Box<dyn std::error::Error>> {
    let result = pipeline().process("the weather is nice today")?;

    assert!(result.is_unknown());
    assert_eq!(result.entity("text").unwrap(), "the weather is nice today");
    assert!(result.entity("units").is_none());
    Ok(())
}

#[test]
fn test_blank_input() -> Result<(), Box<dyn std::error::Error>> {
    let result = pipeline().process("   ")?;

    assert!(result.is_unknown());
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.entity("text").unwrap(), "   ");
    Ok(())
}

#[test]
fn test_json_shape() -> Result<(), Box<dyn std::error::Error>> {
    let result = pipeline().process("take a note buy milk")?;
    let value = serde_json::to_value(&result)?;

    assert_eq!(value["intent"], "note");
    assert_eq!(value["raw_text"], "take a note buy milk");
    assert_eq!(value["entities"]["text"], "buy milk");
    Ok(())
}
