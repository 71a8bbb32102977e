//! Named input sets and assignment parsing.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::circuits::CircuitKind;
use crate::error::{Error, Result};

/// `NAME=VALUE`, where NAME starts with a letter.
fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z][A-Za-z0-9]*)\s*=\s*(\S+)\s*$").expect("valid assignment regex")
    })
}

/// Parse a single bit value: `1/0`, `true/false`, `on/off` or `high/low`.
#[must_use]
pub fn parse_bit(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "high" | "h" => Some(true),
        "0" | "false" | "off" | "low" | "l" => Some(false),
        _ => None,
    }
}

/// The state of a circuit's input switches.
///
/// Unset inputs read as low. Names are case-sensitive (`A0` is not `a0`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSet(BTreeMap<String, bool>);

impl InputSet {
    /// Create an empty input set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input set with every given name low.
    #[must_use]
    pub fn all_low(names: &[&str]) -> Self {
        Self(names.iter().map(|n| ((*n).to_string(), false)).collect())
    }

    /// Parse a list of `NAME=VALUE` assignments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAssignment`] for any entry that doesn't parse.
    pub fn parse_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self> {
        let mut set = Self::new();
        for text in assignments {
            let (name, value) = Self::parse_assignment(text.as_ref())?;
            set.set(name, value);
        }
        Ok(set)
    }

    /// Parse one `NAME=VALUE` assignment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAssignment`] if the text doesn't match.
    pub fn parse_assignment(text: &str) -> Result<(String, bool)> {
        let caps = assignment_pattern()
            .captures(text)
            .ok_or_else(|| Error::invalid_assignment(text))?;
        let value = parse_bit(&caps[2]).ok_or_else(|| Error::invalid_assignment(text))?;
        Ok((caps[1].to_string(), value))
    }

    /// Read an input; unset inputs are low.
    #[must_use]
    pub fn get(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Set an input.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        self.0.insert(name.into(), value);
    }

    /// Flip an input and return its new value.
    pub fn toggle(&mut self, name: &str) -> bool {
        let value = !self.get(name);
        self.set(name, value);
        value
    }

    /// Copy every entry of `other` over this set.
    pub fn merge(&mut self, other: &Self) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Read several inputs in order.
    #[must_use]
    pub fn bits(&self, names: &[&str]) -> Vec<bool> {
        names.iter().map(|n| self.get(n)).collect()
    }

    /// Iterate over explicitly set inputs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of explicitly set inputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no input has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any input is high.
    #[must_use]
    pub fn any_high(&self) -> bool {
        self.0.values().any(|v| *v)
    }

    /// Check that every name is an input of the given circuit, in any mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownInput`] for the first unknown name.
    pub fn validate_for(&self, kind: CircuitKind) -> Result<()> {
        let known = kind.all_input_names();
        match self.0.keys().find(|name| !known.contains(&name.as_str())) {
            Some(name) => Err(Error::unknown_input(kind.id(), name.clone())),
            None => Ok(()),
        }
    }

    /// Render the given inputs as a compact `A=1 B=0` string.
    #[must_use]
    pub fn describe(&self, names: &[&str]) -> String {
        names
            .iter()
            .map(|n| format!("{n}={}", u8::from(self.get(n))))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<(String, bool)> for InputSet {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, bool>> for InputSet {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bit_spellings() {
        for s in ["1", "true", "ON", "High", "h"] {
            assert_eq!(parse_bit(s), Some(true), "{s}");
        }
        for s in ["0", "False", "off", "LOW", "l"] {
            assert_eq!(parse_bit(s), Some(false), "{s}");
        }
        assert_eq!(parse_bit("2"), None);
        assert_eq!(parse_bit(""), None);
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            InputSet::parse_assignment("A3=1").unwrap(),
            ("A3".to_string(), true)
        );
        assert_eq!(
            InputSet::parse_assignment(" Cin = off ").unwrap(),
            ("Cin".to_string(), false)
        );
    }

    #[test]
    fn test_parse_assignment_rejects_garbage() {
        for bad in ["A", "=1", "3A=1", "A=maybe", "A==1", "A B=1"] {
            let err = InputSet::parse_assignment(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidAssignment { .. }), "{bad}");
        }
    }

    #[test]
    fn test_parse_assignments_last_wins() {
        let set = InputSet::parse_assignments(&["A=1", "B=1", "A=0"]).unwrap();
        assert!(!set.get("A"));
        assert!(set.get("B"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_missing_inputs_read_low() {
        let set = InputSet::new();
        assert!(!set.get("A"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut set = InputSet::new();
        assert!(set.toggle("A"));
        assert!(set.get("A"));
        assert!(!set.toggle("A"));
        assert!(!set.get("A"));
    }

    #[test]
    fn test_all_low_and_any_high() {
        let mut set = InputSet::all_low(&["A", "B"]);
        assert_eq!(set.len(), 2);
        assert!(!set.any_high());
        set.set("B", true);
        assert!(set.any_high());
    }

    #[test]
    fn test_merge() {
        let mut base = InputSet::all_low(&["A", "B"]);
        let overlay = InputSet::parse_assignments(&["B=1"]).unwrap();
        base.merge(&overlay);
        assert_eq!(base.bits(&["A", "B"]), vec![false, true]);
    }

    #[test]
    fn test_validate_for() {
        let set = InputSet::parse_assignments(&["A=1", "Cin=1"]).unwrap();
        assert!(set.validate_for(CircuitKind::FullAdder).is_ok());
        let err = set.validate_for(CircuitKind::HalfAdder).unwrap_err();
        assert!(matches!(err, Error::UnknownInput { ref name, .. } if name == "Cin"));
    }

    #[test]
    fn test_validate_comparator_accepts_both_widths() {
        let set = InputSet::parse_assignments(&["A=1", "A3=1", "B0=1"]).unwrap();
        assert!(set.validate_for(CircuitKind::Comparator).is_ok());
    }

    #[test]
    fn test_describe() {
        let set = InputSet::parse_assignments(&["A=1"]).unwrap();
        assert_eq!(set.describe(&["A", "B"]), "A=1 B=0");
    }

    #[test]
    fn test_serde_is_plain_map() {
        let set = InputSet::parse_assignments(&["A=1", "B=0"]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"A":true,"B":false}"#);
    }
}
