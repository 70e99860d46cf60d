//! Per-intent handlers for the CLI.
//!
//! Handlers describe what would be done with a command. Nothing is
//! scheduled, stored or converted.

use std::collections::HashMap;

use crate::intent::types::{IntentResult, KnownIntent};

/// Handler for one known intent.
pub trait IntentHandler: Send + Sync {
    /// The intent this handler serves.
    fn intent(&self) -> KnownIntent;

    /// Describe the action for a classified command.
    fn handle(&self, result: &IntentResult) -> String;
}

/// String entity, if present.
fn entity_str<'a>(result: &'a IntentResult, kind: &str) -> Option<&'a str> {
    result.entity(kind).and_then(|v| v.as_str())
}

/// Resolved `datetime` value, if present.
fn when(result: &IntentResult) -> Option<&str> {
    result
        .entity("datetime")
        .and_then(|v| v.get("value"))
        .and_then(|v| v.as_str())
}

/// Payload text, falling back to the raw command.
fn payload(result: &IntentResult) -> &str {
    entity_str(result, "text").unwrap_or(&result.raw_text)
}

pub struct ReminderHandler;

impl IntentHandler for ReminderHandler {
    fn intent(&self) -> KnownIntent {
        KnownIntent::Reminder
    }

    fn handle(&self, result: &IntentResult) -> String {
        match when(result) {
            Some(when) => format!("Reminder: \"{}\" at {}", payload(result), when),
            None => format!("Reminder: \"{}\" (no time given)", payload(result)),
        }
    }
}

pub struct NoteHandler;

impl IntentHandler for NoteHandler {
    fn intent(&self) -> KnownIntent {
        KnownIntent::Note
    }

    fn handle(&self, result: &IntentResult) -> String {
        format!("Note: \"{}\"", payload(result))
    }
}

pub struct TimerHandler;

impl IntentHandler for TimerHandler {
    fn intent(&self) -> KnownIntent {
        KnownIntent::Timer
    }

    fn handle(&self, result: &IntentResult) -> String {
        let quantities = result
            .entity("units")
            .and_then(|units| units.get("quantities"))
            .and_then(|q| q.as_array())
            .map(|quantities| {
                quantities
                    .iter()
                    .filter(|q| q.get("dimension").and_then(|d| d.as_str()) == Some("time"))
                    .filter_map(|q| {
                        let value = q.get("value")?.as_f64()?;
                        let unit = q.get("unit")?.as_str()?;
                        Some(format!("{value} {unit}(s)"))
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if quantities.is_empty() {
            "Timer: no duration given".to_string()
        } else {
            format!("Timer: {}", quantities.join(" "))
        }
    }
}

pub struct ConvertHandler;

impl IntentHandler for ConvertHandler {
    fn intent(&self) -> KnownIntent {
        KnownIntent::Convert
    }

    fn handle(&self, result: &IntentResult) -> String {
        let Some(units) = result.entity("units") else {
            return format!("Convert: \"{}\" (no units found)", payload(result));
        };

        let from = units
            .get("quantities")
            .and_then(|q| q.as_array())
            .and_then(|q| q.first())
            .and_then(|q| Some(format!("{} {}", q.get("value")?.as_f64()?, q.get("unit")?.as_str()?)));
        let target = units.get("target").and_then(|t| t.as_str());

        match (from, target) {
            (Some(from), Some(target)) => format!("Convert: {from} -> {target}"),
            (Some(from), None) => format!("Convert: {from} -> ?"),
            (None, Some(target)) => format!("Convert: ? -> {target}"),
            (None, None) => format!("Convert: \"{}\"", payload(result)),
        }
    }
}

/// Handlers keyed by intent.
pub struct HandlerRegistry {
    handlers: HashMap<KnownIntent, Box<dyn IntentHandler>>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ReminderHandler));
        registry.register(Box::new(NoteHandler));
        registry.register(Box::new(TimerHandler));
        registry.register(Box::new(ConvertHandler));
        registry
    }
}

impl HandlerRegistry {
    /// A registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add or replace the handler for its intent.
    pub fn register(&mut self, handler: Box<dyn IntentHandler>) {
        self.handlers.insert(handler.intent(), handler);
    }

    /// Hand a result to the handler for its intent.
    ///
    /// Returns `None`, with a warning, when no handler serves the intent.
    pub fn dispatch(&self, result: &IntentResult) -> Option<String> {
        let handler = result
            .known_intent()
            .and_then(|intent| self.handlers.get(&intent));

        match handler {
            Some(handler) => Some(handler.handle(result)),
            None => {
                log::warn!(
                    "no handler for intent {:?} ({:?})",
                    result.intent,
                    result.raw_text
                );
                None
            }
        }
    }
}
