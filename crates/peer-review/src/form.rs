//! Peer review application payload as submitted by the web form.
//!
//! The form posts either `application/x-www-form-urlencoded` pairs or a JSON object. Both are
//! folded into an immutable field map and every read goes through a total accessor, so an absent
//! field is indistinguishable from an empty one.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keys posted by the application form.
pub mod keys {
    pub const FIRM_NAME: &str = "firmName";
    pub const FIRM_REG_NUMBER: &str = "firmRegNumber";
    pub const REVIEW_START_DATE: &str = "reviewStartDate";
    pub const REVIEW_END_DATE: &str = "reviewEndDate";
    pub const APPLY_REASON: &str = "applyReason";
    pub const OTHER_REGULATOR: &str = "otherRegulator";
    pub const OTHER_SERVICE: &str = "otherService";
    pub const HAS_CONDUCTED: &str = "hasConducted";
    pub const REVIEWER_OPTION: &str = "reviewerOption";
    pub const PREFERRED_CITY: &str = "preferredCity";
    pub const COMMUNICATION_EMAIL: &str = "communicationEmail";
    pub const CERTIFICATE_ADDRESS: &str = "certificateAddress";

    /// `clientType1` through `clientType7`, one per assurance service row.
    pub const CLIENT_TYPES: [&str; 7] = [
        "clientType1",
        "clientType2",
        "clientType3",
        "clientType4",
        "clientType5",
        "clientType6",
        "clientType7",
    ];
}

/// Regulatory basis under which the practice unit seeks review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyReason {
    Mandatory,
    Voluntary,
    SpecialCase,
    NewUnit,
    BoardDecision,
}

impl ApplyReason {
    pub const ALL: [ApplyReason; 5] = [
        ApplyReason::Mandatory,
        ApplyReason::Voluntary,
        ApplyReason::SpecialCase,
        ApplyReason::NewUnit,
        ApplyReason::BoardDecision,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ApplyReason::Mandatory => "mandatory",
            ApplyReason::Voluntary => "voluntary",
            ApplyReason::SpecialCase => "specialCase",
            ApplyReason::NewUnit => "newUnit",
            ApplyReason::BoardDecision => "boardDecision",
        }
    }
}

/// Applicant preference for where the reviewer comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewerOption {
    SameCity,
    OutsideCity,
    Either,
    PreferredCity,
}

impl ReviewerOption {
    pub const ALL: [ReviewerOption; 4] = [
        ReviewerOption::SameCity,
        ReviewerOption::OutsideCity,
        ReviewerOption::Either,
        ReviewerOption::PreferredCity,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ReviewerOption::SameCity => "sameCity",
            ReviewerOption::OutsideCity => "outsideCity",
            ReviewerOption::Either => "either",
            ReviewerOption::PreferredCity => "preferredCity",
        }
    }
}

/// Answer to the listed-entity statutory audit declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConductedAnswer {
    Yes,
    No,
    Unanswered,
}

/// A single submitted field: one value, or several for multi-select inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    fn push(self, value: String) -> Self {
        match self {
            FieldValue::Single(existing) => FieldValue::Multiple(vec![existing, value]),
            FieldValue::Multiple(mut values) => {
                values.push(value);
                FieldValue::Multiple(values)
            }
        }
    }

    fn contains(&self, option: &str) -> bool {
        match self {
            FieldValue::Single(value) => value == option,
            FieldValue::Multiple(values) => values.iter().any(|value| value == option),
        }
    }
}

/// Immutable field map for one peer review application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    fields: BTreeMap<String, FieldValue>,
}

impl FormSubmission {
    /// Folds url-encoded pairs; repeated keys, `key[]` and `key[<index>]` collect into a list.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields: BTreeMap<String, FieldValue> = BTreeMap::new();
        for (raw_key, value) in pairs {
            let (key, is_list) = match list_key(&raw_key) {
                Some(stripped) => (stripped.to_string(), true),
                None => (raw_key, false),
            };
            let merged = match fields.remove(&key) {
                Some(existing) => existing.push(value),
                None if is_list => FieldValue::Multiple(vec![value]),
                None => FieldValue::Single(value),
            };
            fields.insert(key, merged);
        }
        Self { fields }
    }

    /// Builds a submission from a JSON object. Scalars are stringified, arrays keep their
    /// scalar members, and nulls or nested objects are treated as absent.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let field = match value {
                    Value::Array(items) => {
                        FieldValue::Multiple(items.into_iter().filter_map(scalar_text).collect())
                    }
                    other => FieldValue::Single(scalar_text(other)?),
                };
                Some((key, field))
            })
            .collect();

        Self { fields }
    }

    /// Text for `key`, empty when absent. Multi-valued fields join with `","`.
    pub fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(FieldValue::Single(value)) => value.clone(),
            Some(FieldValue::Multiple(values)) => values.join(","),
            None => String::new(),
        }
    }

    /// Trimmed text for `key`, `None` when absent or blank.
    pub fn non_blank(&self, key: &str) -> Option<String> {
        let text = self.text(key);
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Whether the multi-select field `key` includes `option`.
    pub fn contains(&self, key: &str, option: &str) -> bool {
        self.fields
            .get(key)
            .map(|field| field.contains(option))
            .unwrap_or(false)
    }

    pub fn has_reason(&self, reason: ApplyReason) -> bool {
        self.contains(keys::APPLY_REASON, reason.key())
    }

    pub fn has_reviewer_option(&self, option: ReviewerOption) -> bool {
        self.contains(keys::REVIEWER_OPTION, option.key())
    }

    /// Only the literals `yes` and `no` count as answers.
    pub fn conducted(&self) -> ConductedAnswer {
        match self.fields.get(keys::HAS_CONDUCTED) {
            Some(FieldValue::Single(value)) if value == "yes" => ConductedAnswer::Yes,
            Some(FieldValue::Single(value)) if value == "no" => ConductedAnswer::No,
            _ => ConductedAnswer::Unanswered,
        }
    }

    pub fn client_type(&self, row: usize) -> String {
        keys::CLIENT_TYPES
            .get(row)
            .map(|key| self.text(key))
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<'de> Deserialize<'de> for FormSubmission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(value))
    }
}

/// Base name of a list key: `reason[]` or `reason[2]` yield `reason`.
fn list_key(raw: &str) -> Option<&str> {
    let open = raw.strip_suffix(']')?.rfind('[')?;
    let index = &raw[open + 1..raw.len() - 1];
    if open == 0 || !index.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some(&raw[..open])
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
