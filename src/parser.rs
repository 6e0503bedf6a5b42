//! This module provides the parser for machine settings documents (`.enigma`
//! files). The format is line-oriented: `key: value` pairs, `#` comments, and
//! blank lines.
//!
//! ```text
//! # key sheet entry
//! name: Evening traffic
//! rotors: I II III
//! positions: A A A
//! rings: A A A
//! reflector: B
//! stepping: classic
//! ```
//!
//! `rotors` and `reflector` are required; `positions` and `rings` default to
//! all-`A`, `stepping` to `classic`. Positions and ring settings accept either
//! a letter `A..Z` or a number `0..=25`.

use crate::types::{
    EnigmaError, MachineConfig, ReflectorKind, RotorKind, RotorSlot, Stepping, MAX_SETTINGS_SIZE,
};
use crate::wiring::letter_to_index;
use regex::Regex;
use std::collections::HashSet;

lazy_static::lazy_static! {
    static ref SETTING_LINE: Regex =
        Regex::new(r"^([A-Za-z]+)\s*:\s*(.*?)\s*$").expect("setting line regex");
}

/// Parses a settings document into a validated `MachineConfig`.
///
/// This is the main entry point for parsing machine settings. The parsed
/// configuration is validated (rotor count vs stepping mode, setting ranges)
/// before being returned, so a successful parse always yields a mountable
/// configuration.
///
/// # Arguments
///
/// * `input` - A string slice containing the settings document.
///
/// # Returns
///
/// * `Ok(MachineConfig)` if the input is successfully parsed and validated.
/// * `Err(EnigmaError::ParseError)` for syntax errors or unknown values.
/// * `Err(EnigmaError::ValidationError)` for structural problems (duplicate
///   keys, mismatched list lengths).
pub fn parse(input: &str) -> Result<MachineConfig, EnigmaError> {
    if input.len() > MAX_SETTINGS_SIZE {
        return Err(EnigmaError::ValidationError(format!(
            "Settings document exceeds {} bytes",
            MAX_SETTINGS_SIZE
        )));
    }

    let mut name: Option<String> = None;
    let mut rotors: Option<Vec<RotorKind>> = None;
    let mut positions: Option<Vec<u8>> = None;
    let mut rings: Option<Vec<u8>> = None;
    let mut reflector: Option<ReflectorKind> = None;
    let mut stepping: Option<Stepping> = None;
    let mut seen = HashSet::new();

    for (line_no, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let captures = SETTING_LINE.captures(line).ok_or_else(|| {
            EnigmaError::ParseError(format!("line {}: expected 'key: value'", line_no + 1))
        })?;
        let key = captures[1].to_lowercase();
        let value = captures[2].to_string();

        if !seen.insert(key.clone()) {
            return Err(EnigmaError::ValidationError(format!(
                "line {}: duplicate '{}' setting",
                line_no + 1,
                key
            )));
        }

        match key.as_str() {
            "name" => name = Some(value),
            "rotors" => rotors = Some(parse_rotor_list(&value)?),
            "positions" => positions = Some(parse_setting_list(&value)?),
            "rings" => rings = Some(parse_setting_list(&value)?),
            "reflector" => reflector = Some(value.parse()?),
            "stepping" => stepping = Some(value.parse()?),
            other => {
                return Err(EnigmaError::ParseError(format!(
                    "line {}: unknown setting '{}'",
                    line_no + 1,
                    other
                )));
            }
        }
    }

    let rotors = rotors.ok_or_else(|| missing("rotors"))?;
    let reflector = reflector.ok_or_else(|| missing("reflector"))?;
    let positions = positions.unwrap_or_else(|| vec![0; rotors.len()]);
    let rings = rings.unwrap_or_else(|| vec![0; rotors.len()]);

    check_list_length("positions", &positions, rotors.len())?;
    check_list_length("rings", &rings, rotors.len())?;

    let config = MachineConfig {
        name: name.unwrap_or_default(),
        rotors: rotors
            .into_iter()
            .zip(positions)
            .zip(rings)
            .map(|((kind, position), ring)| RotorSlot::new(kind, position, ring))
            .collect(),
        reflector,
        stepping: stepping.unwrap_or_default(),
    };

    config.validate()?;

    Ok(config)
}

/// Parses a rotor order list such as `"I II III"` or `"IV, V, II"`,
/// leftmost rotor first.
pub fn parse_rotor_list(value: &str) -> Result<Vec<RotorKind>, EnigmaError> {
    let kinds: Vec<RotorKind> = tokens(value)
        .map(|token| token.parse())
        .collect::<Result<_, _>>()?;
    if kinds.is_empty() {
        return Err(EnigmaError::ParseError("empty rotor list".to_string()));
    }
    Ok(kinds)
}

/// Parses a list of positions or ring settings, one entry per rotor slot,
/// leftmost first. Each entry is a letter `A..Z` or a number `0..=25`.
pub fn parse_setting_list(value: &str) -> Result<Vec<u8>, EnigmaError> {
    tokens(value).map(parse_setting).collect()
}

/// Parses a single position or ring setting entry.
pub fn parse_setting(token: &str) -> Result<u8, EnigmaError> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(index) = letter_to_index(c) {
            return Ok(index);
        }
    }

    token.parse::<u8>().map_err(|_| {
        EnigmaError::ParseError(format!(
            "invalid setting '{}' (expected a letter A-Z or a number 0-25)",
            token
        ))
    })
}

fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn missing(key: &str) -> EnigmaError {
    EnigmaError::ValidationError(format!("missing required '{}' setting", key))
}

fn check_list_length(key: &str, list: &[u8], rotors: usize) -> Result<(), EnigmaError> {
    if list.len() != rotors {
        return Err(EnigmaError::ValidationError(format!(
            "'{}' has {} entries for {} rotors",
            key,
            list.len(),
            rotors
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let input = r#"
# morning key sheet
name: Morning traffic
rotors: IV, I, V
positions: B L Q
rings: C A T
reflector: C
stepping: classic
"#;

        let config = parse(input).unwrap();
        assert_eq!(config.name, "Morning traffic");
        assert_eq!(config.reflector, ReflectorKind::C);
        assert_eq!(config.stepping, Stepping::Classic);

        let kinds: Vec<RotorKind> = config.rotors.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RotorKind::IV, RotorKind::I, RotorKind::V]);
        assert_eq!(config.rotors[0].position, 1); // B
        assert_eq!(config.rotors[1].position, 11); // L
        assert_eq!(config.rotors[2].ring, 19); // T
    }

    #[test]
    fn test_parse_applies_defaults() {
        let config = parse("rotors: I II III\nreflector: B").unwrap();
        assert_eq!(config.name, "");
        assert_eq!(config.stepping, Stepping::Classic);
        for rotor in &config.rotors {
            assert_eq!(rotor.position, 0);
            assert_eq!(rotor.ring, 0);
        }
    }

    #[test]
    fn test_parse_numeric_settings() {
        let config = parse("rotors: I II III\npositions: 0 12 25\nreflector: B").unwrap();
        assert_eq!(config.rotors[1].position, 12);
        assert_eq!(config.rotors[2].position, 25);
    }

    #[test]
    fn test_parse_rejects_unknown_rotor() {
        let err = parse("rotors: I II VIII\nreflector: B").unwrap_err();
        assert_eq!(err, EnigmaError::UnknownRotor("VIII".to_string()));
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = parse("rotors: I II III\nreflector: B\nplugboard: AB CD").unwrap_err();
        assert!(matches!(err, EnigmaError::ParseError(_)));
    }

    #[test]
    fn test_parse_rejects_duplicate_key() {
        let err = parse("rotors: I II III\nrotors: I II III\nreflector: B").unwrap_err();
        assert!(matches!(err, EnigmaError::ValidationError(_)));
    }

    #[test]
    fn test_parse_rejects_missing_required_keys() {
        assert!(matches!(
            parse("reflector: B").unwrap_err(),
            EnigmaError::ValidationError(_)
        ));
        assert!(matches!(
            parse("rotors: I II III").unwrap_err(),
            EnigmaError::ValidationError(_)
        ));
    }

    #[test]
    fn test_parse_rejects_list_length_mismatch() {
        let err = parse("rotors: I II III\npositions: A A\nreflector: B").unwrap_err();
        assert!(matches!(err, EnigmaError::ValidationError(_)));
    }

    #[test]
    fn test_parse_rejects_out_of_range_numeric_setting() {
        let err = parse("rotors: I II III\nrings: 0 0 26\nreflector: B").unwrap_err();
        assert!(matches!(err, EnigmaError::SettingOutOfRange { slot: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_rotor_count_for_classic() {
        let err = parse("rotors: I II\nreflector: B").unwrap_err();
        assert_eq!(err, EnigmaError::UnsupportedRotorCount(2));
    }

    #[test]
    fn test_parse_basic_stepping_allows_other_rotor_counts() {
        let config = parse("rotors: I II\nreflector: B\nstepping: basic").unwrap();
        assert_eq!(config.stepping, Stepping::Basic);
        assert_eq!(config.rotors.len(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed_line() {
        let err = parse("rotors I II III").unwrap_err();
        assert!(matches!(err, EnigmaError::ParseError(_)));
    }

    #[test]
    fn test_parse_setting_variants() {
        assert_eq!(parse_setting("A").unwrap(), 0);
        assert_eq!(parse_setting("z").unwrap(), 25);
        assert_eq!(parse_setting("17").unwrap(), 17);
        assert!(parse_setting("?").is_err());
        assert!(parse_setting("AB").is_err());
    }

    #[test]
    fn test_parse_rejects_oversized_document() {
        let input = format!("# {}\nrotors: I II III\nreflector: B", "x".repeat(8192));
        assert!(matches!(
            parse(&input).unwrap_err(),
            EnigmaError::ValidationError(_)
        ));
    }
}
