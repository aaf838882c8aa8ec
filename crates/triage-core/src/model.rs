use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency tier of a suggestion, ordered from most to least time critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Emergency,
    Urgent,
    Moderate,
    Mild,
    Routine,
}

impl Urgency {
    pub const ALL: [Urgency; 5] = [
        Urgency::Emergency,
        Urgency::Urgent,
        Urgency::Moderate,
        Urgency::Mild,
        Urgency::Routine,
    ];
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Emergency => write!(f, "emergency"),
            Urgency::Urgent => write!(f, "urgent"),
            Urgency::Moderate => write!(f, "moderate"),
            Urgency::Mild => write!(f, "mild"),
            Urgency::Routine => write!(f, "routine"),
        }
    }
}

/// Unit of a symptom duration or a duration threshold.
///
/// Anything outside the five known units is kept verbatim as
/// `Unrecognized` and converts with the identity ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DurationUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Unrecognized(String),
}

impl DurationUnit {
    /// Convert `value` in this unit to hours. Months are fixed at 30 days.
    pub fn to_hours(&self, value: f64) -> f64 {
        match self {
            DurationUnit::Minutes => value / 60.0,
            DurationUnit::Hours => value,
            DurationUnit::Days => value * 24.0,
            DurationUnit::Weeks => value * 168.0,
            DurationUnit::Months => value * 720.0,
            DurationUnit::Unrecognized(raw) => {
                tracing::debug!(unit = %raw, "unrecognized duration unit, using value as hours");
                value
            }
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, DurationUnit::Unrecognized(_))
    }

    pub fn from_str_loose(s: &str) -> DurationUnit {
        match s.trim().to_lowercase().as_str() {
            "minute" | "minutes" => DurationUnit::Minutes,
            "hour" | "hours" => DurationUnit::Hours,
            "day" | "days" => DurationUnit::Days,
            "week" | "weeks" => DurationUnit::Weeks,
            "month" | "months" => DurationUnit::Months,
            _ => DurationUnit::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for DurationUnit {
    fn from(s: String) -> Self {
        DurationUnit::from_str_loose(&s)
    }
}

impl From<DurationUnit> for String {
    fn from(unit: DurationUnit) -> Self {
        unit.to_string()
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationUnit::Minutes => write!(f, "minutes"),
            DurationUnit::Hours => write!(f, "hours"),
            DurationUnit::Days => write!(f, "days"),
            DurationUnit::Weeks => write!(f, "weeks"),
            DurationUnit::Months => write!(f, "months"),
            DurationUnit::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomDuration {
    pub value: f64,
    pub unit: DurationUnit,
}

impl SymptomDuration {
    pub fn new(value: f64, unit: DurationUnit) -> Self {
        Self { value, unit }
    }

    pub fn hours(&self) -> f64 {
        self.unit.to_hours(self.value)
    }
}

impl fmt::Display for SymptomDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomStatus {
    Active,
    Improving,
    Worsening,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociatedSymptom {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
}

/// A logged symptom. Only `name`, `severity` and `duration` are required;
/// the remaining fields are either optional scoring inputs or bookkeeping
/// used by batch selection and report output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// 1 (barely noticeable) to 10 (worst imaginable).
    pub severity: u8,
    pub duration: SymptomDuration,
    /// Degrees Fahrenheit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub associated_symptoms: Vec<AssociatedSymptom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SymptomStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl SymptomRecord {
    pub fn new(name: impl Into<String>, severity: u8, duration: SymptomDuration) -> Self {
        Self {
            id: None,
            name: name.into(),
            severity,
            duration,
            temperature: None,
            associated_symptoms: Vec::new(),
            status: None,
            recorded_at: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_associated(mut self, names: &[&str]) -> Self {
        self.associated_symptoms
            .extend(names.iter().map(|n| AssociatedSymptom {
                name: n.to_string(),
                severity: None,
            }));
        self
    }
}
