//! Measurement unit extraction for conversion commands.
//!
//! Finds quantities (`5 km`, `two cups`) and the conversion target
//! (`to miles`, `into liters`). No arithmetic happens here.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::extraction::Extraction;
use crate::extraction::number::{number_alternation, parse_number};

/// Physical dimension of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Mass,
    Volume,
    Temperature,
    Time,
}

/// Canonical unit name, dimension and accepted spellings.
struct UnitDef {
    name: &'static str,
    dimension: Dimension,
    aliases: &'static [&'static str],
}

const UNITS: &[UnitDef] = &[
    UnitDef {
        name: "millimeter",
        dimension: Dimension::Length,
        aliases: &["mm", "millimeter", "millimeters", "millimetre", "millimetres"],
    },
    UnitDef {
        name: "centimeter",
        dimension: Dimension::Length,
        aliases: &["cm", "centimeter", "centimeters", "centimetre", "centimetres"],
    },
    UnitDef {
        name: "meter",
        dimension: Dimension::Length,
        aliases: &["m", "meter", "meters", "metre", "metres"],
    },
    UnitDef {
        name: "kilometer",
        dimension: Dimension::Length,
        aliases: &["km", "kilometer", "kilometers", "kilometre", "kilometres"],
    },
    UnitDef {
        name: "inch",
        dimension: Dimension::Length,
        aliases: &["inch", "inches"],
    },
    UnitDef {
        name: "foot",
        dimension: Dimension::Length,
        aliases: &["ft", "foot", "feet"],
    },
    UnitDef {
        name: "yard",
        dimension: Dimension::Length,
        aliases: &["yd", "yard", "yards"],
    },
    UnitDef {
        name: "mile",
        dimension: Dimension::Length,
        aliases: &["mi", "mile", "miles"],
    },
    UnitDef {
        name: "milligram",
        dimension: Dimension::Mass,
        aliases: &["mg", "milligram", "milligrams"],
    },
    UnitDef {
        name: "gram",
        dimension: Dimension::Mass,
        aliases: &["g", "gram", "grams"],
    },
    UnitDef {
        name: "kilogram",
        dimension: Dimension::Mass,
        aliases: &["kg", "kilo", "kilos", "kilogram", "kilograms"],
    },
    UnitDef {
        name: "ounce",
        dimension: Dimension::Mass,
        aliases: &["oz", "ounce", "ounces"],
    },
    UnitDef {
        name: "pound",
        dimension: Dimension::Mass,
        aliases: &["lb", "lbs", "pound", "pounds"],
    },
    UnitDef {
        name: "milliliter",
        dimension: Dimension::Volume,
        aliases: &["ml", "milliliter", "milliliters", "millilitre", "millilitres"],
    },
    UnitDef {
        name: "liter",
        dimension: Dimension::Volume,
        aliases: &["l", "liter", "liters", "litre", "litres"],
    },
    UnitDef {
        name: "cup",
        dimension: Dimension::Volume,
        aliases: &["cup", "cups"],
    },
    UnitDef {
        name: "pint",
        dimension: Dimension::Volume,
        aliases: &["pint", "pints"],
    },
    UnitDef {
        name: "gallon",
        dimension: Dimension::Volume,
        aliases: &["gal", "gallon", "gallons"],
    },
    UnitDef {
        name: "teaspoon",
        dimension: Dimension::Volume,
        aliases: &["tsp", "teaspoon", "teaspoons"],
    },
    UnitDef {
        name: "tablespoon",
        dimension: Dimension::Volume,
        aliases: &["tbsp", "tablespoon", "tablespoons"],
    },
    UnitDef {
        name: "celsius",
        dimension: Dimension::Temperature,
        aliases: &["c", "celsius", "degrees celsius", "centigrade"],
    },
    UnitDef {
        name: "fahrenheit",
        dimension: Dimension::Temperature,
        aliases: &["f", "fahrenheit", "degrees fahrenheit"],
    },
    UnitDef {
        name: "kelvin",
        dimension: Dimension::Temperature,
        aliases: &["k", "kelvin"],
    },
    UnitDef {
        name: "second",
        dimension: Dimension::Time,
        aliases: &["s", "sec", "secs", "second", "seconds"],
    },
    UnitDef {
        name: "minute",
        dimension: Dimension::Time,
        aliases: &["min", "mins", "minute", "minutes"],
    },
    UnitDef {
        name: "hour",
        dimension: Dimension::Time,
        aliases: &["h", "hr", "hrs", "hour", "hours"],
    },
    UnitDef {
        name: "day",
        dimension: Dimension::Time,
        aliases: &["day", "days"],
    },
    UnitDef {
        name: "week",
        dimension: Dimension::Time,
        aliases: &["week", "weeks"],
    },
];

/// Every alias, longest first, as a regex alternation.
fn unit_alternation() -> String {
    let mut aliases: Vec<&str> = UNITS
        .iter()
        .flat_map(|unit| unit.aliases.iter().copied())
        .collect();
    aliases.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    aliases
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

static QUANTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?P<value>{})\s*(?:°\s*)?(?P<unit>{})\b",
        number_alternation(),
        unit_alternation()
    ))
    .expect("Invalid regex")
});

// Single-letter aliases are too ambiguous without a number in front.
static TARGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:to|into)\s+(?P<unit>{})\b",
        unit_alternation()
    ))
    .expect("Invalid regex")
});

/// Resolve a spelling to its canonical unit.
fn lookup(alias: &str) -> Option<&'static UnitDef> {
    let alias = alias.to_lowercase();
    let alias = alias.split_whitespace().collect::<Vec<_>>().join(" ");
    UNITS
        .iter()
        .find(|unit| unit.aliases.contains(&alias.as_str()))
}

/// Canonical unit name and dimension for a spelling, if known.
pub fn canonical_unit(alias: &str) -> Option<(&'static str, Dimension)> {
    lookup(alias).map(|unit| (unit.name, unit.dimension))
}

/// A number attached to a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: &'static str,
    pub dimension: Dimension,
}

/// The `units` entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitsEntity {
    /// Quantities in order of appearance.
    pub quantities: Vec<Quantity>,
    /// Conversion target, if the command names one.
    pub target: Option<&'static str>,
}

/// Extract quantities and the conversion target.
pub fn extract_units(text: &str) -> Extraction<UnitsEntity> {
    let mut quantities = Vec::new();
    for caps in QUANTITY_PATTERN.captures_iter(text) {
        let (Some(value), Some(unit)) = (caps.name("value"), caps.name("unit")) else {
            continue;
        };
        let Some(def) = lookup(unit.as_str()) else {
            continue;
        };
        match parse_number(value.as_str()) {
            Some(value) => quantities.push(Quantity {
                value,
                unit: def.name,
                dimension: def.dimension,
            }),
            None => return Extraction::failed(format!("unreadable quantity {:?}", value.as_str())),
        }
    }

    let target = TARGET_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.name("unit"))
        .filter(|unit| unit.as_str().chars().count() > 1)
        .filter_map(|unit| lookup(unit.as_str()))
        .map(|def| def.name)
        .last();

    if quantities.is_empty() && target.is_none() {
        Extraction::Missing
    } else {
        Extraction::Found(UnitsEntity { quantities, target })
    }
}
