//! This module defines the core data structures and types used throughout the Enigma
//! machine simulator, including rotor and reflector identifiers, machine configuration,
//! stepping modes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The number of rotor slots required for full-fidelity (classic) stepping.
pub const CLASSIC_ROTOR_COUNT: usize = 3;
/// The number of letters in the machine's alphabet.
pub const ALPHABET_LEN: usize = 26;
/// The maximum allowed size for a settings document in bytes.
pub const MAX_SETTINGS_SIZE: usize = 4096;

/// Identifies one of the five historical Enigma I rotors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotorKind {
    I,
    II,
    III,
    IV,
    V,
}

impl RotorKind {
    /// All rotor kinds, in catalogue order.
    pub const ALL: [RotorKind; 5] = [
        RotorKind::I,
        RotorKind::II,
        RotorKind::III,
        RotorKind::IV,
        RotorKind::V,
    ];
}

impl fmt::Display for RotorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotorKind::I => "I",
            RotorKind::II => "II",
            RotorKind::III => "III",
            RotorKind::IV => "IV",
            RotorKind::V => "V",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for RotorKind {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "I" => Ok(RotorKind::I),
            "II" => Ok(RotorKind::II),
            "III" => Ok(RotorKind::III),
            "IV" => Ok(RotorKind::IV),
            "V" => Ok(RotorKind::V),
            other => Err(EnigmaError::UnknownRotor(other.to_string())),
        }
    }
}

/// Identifies one of the supported reflectors (Umkehrwalze B or C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReflectorKind {
    B,
    C,
}

impl ReflectorKind {
    /// All reflector kinds, in catalogue order.
    pub const ALL: [ReflectorKind; 2] = [ReflectorKind::B, ReflectorKind::C];
}

impl fmt::Display for ReflectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReflectorKind::B => "B",
            ReflectorKind::C => "C",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ReflectorKind {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "B" => Ok(ReflectorKind::B),
            "C" => Ok(ReflectorKind::C),
            other => Err(EnigmaError::UnknownReflector(other.to_string())),
        }
    }
}

/// The stepping mode for a machine.
///
/// Controls how rotor advancement is driven on each keypress:
/// - `Classic` (default): historical Enigma I / M3 stepping with notch turnover
///   and the double-step anomaly. Requires exactly three rotors.
/// - `Basic`: only the rightmost rotor advances, with no notch propagation.
///   Works with any rotor count but sacrifices historical stepping fidelity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stepping {
    /// Full notch-driven stepping, including the double-step anomaly.
    #[default]
    Classic,
    /// Rightmost rotor only; an explicitly degraded mode.
    Basic,
}

impl FromStr for Stepping {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Stepping::Classic),
            "basic" => Ok(Stepping::Basic),
            other => Err(EnigmaError::ParseError(format!(
                "unknown stepping mode '{}' (expected 'classic' or 'basic')",
                other
            ))),
        }
    }
}

/// The configuration of one rotor slot: which rotor sits in it, its starting
/// position, and its ring setting. Both indices are in `0..26` (`0` = `A`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotorSlot {
    pub kind: RotorKind,
    pub position: u8,
    pub ring: u8,
}

impl RotorSlot {
    pub fn new(kind: RotorKind, position: u8, ring: u8) -> Self {
        Self {
            kind,
            position,
            ring,
        }
    }
}

/// The complete configuration of an Enigma machine.
///
/// Rotor slots are ordered left to right: slot 0 is the leftmost (slowest)
/// rotor, the last slot is the rightmost (fastest) rotor, the one driven
/// directly by every keypress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// An optional label for the settings (e.g. the key sheet entry name).
    pub name: String,
    /// Rotor slots, leftmost first.
    pub rotors: Vec<RotorSlot>,
    /// The reflector mounted in the machine.
    pub reflector: ReflectorKind,
    /// The stepping mode.
    pub stepping: Stepping,
}

impl MachineConfig {
    /// Checks that the configuration can be mounted into a machine.
    ///
    /// `Classic` stepping requires exactly [`CLASSIC_ROTOR_COUNT`] rotors;
    /// `Basic` accepts any non-empty rotor bank. Positions and ring settings
    /// outside `0..26` are rejected rather than wrapped, so that out-of-range
    /// values surface as caller bugs instead of silently aliasing.
    pub fn validate(&self) -> Result<(), EnigmaError> {
        match self.stepping {
            Stepping::Classic => {
                if self.rotors.len() != CLASSIC_ROTOR_COUNT {
                    return Err(EnigmaError::UnsupportedRotorCount(self.rotors.len()));
                }
            }
            Stepping::Basic => {
                if self.rotors.is_empty() {
                    return Err(EnigmaError::UnsupportedRotorCount(0));
                }
            }
        }

        for (slot, rotor) in self.rotors.iter().enumerate() {
            if rotor.position as usize >= ALPHABET_LEN {
                return Err(EnigmaError::SettingOutOfRange {
                    slot,
                    setting: "position",
                    value: rotor.position,
                });
            }
            if rotor.ring as usize >= ALPHABET_LEN {
                return Err(EnigmaError::SettingOutOfRange {
                    slot,
                    setting: "ring",
                    value: rotor.ring,
                });
            }
        }

        Ok(())
    }
}

impl Default for MachineConfig {
    /// The original delivery settings: rotors I-II-III left to right, all
    /// positions and ring settings at `A`, reflector B, classic stepping.
    fn default() -> Self {
        Self {
            name: String::new(),
            rotors: vec![
                RotorSlot::new(RotorKind::I, 0, 0),
                RotorSlot::new(RotorKind::II, 0, 0),
                RotorSlot::new(RotorKind::III, 0, 0),
            ],
            reflector: ReflectorKind::B,
            stepping: Stepping::Classic,
        }
    }
}

/// Represents various errors that can occur while configuring an Enigma machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// An unrecognized rotor type identifier.
    #[error("Unknown rotor type: {0}")]
    UnknownRotor(String),
    /// An unrecognized reflector type identifier.
    #[error("Unknown reflector type: {0}")]
    UnknownReflector(String),
    /// The rotor count is incompatible with the selected stepping mode.
    #[error("Unsupported rotor count {0} (classic stepping requires exactly 3 rotors)")]
    UnsupportedRotorCount(usize),
    /// A position or ring setting outside the `0..26` range.
    #[error("Rotor slot {slot}: {setting} index {value} is out of range (expected 0..26)")]
    SettingOutOfRange {
        slot: usize,
        setting: &'static str,
        value: u8,
    },
    /// An error during the parsing of a settings document.
    #[error("Settings parsing error: {0}")]
    ParseError(String),
    /// An error during the validation of a settings document's structure.
    #[error("Settings validation error: {0}")]
    ValidationError(String),
    /// An error related to file system operations while loading settings.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotor_kind_from_str() {
        assert_eq!("I".parse::<RotorKind>().unwrap(), RotorKind::I);
        assert_eq!("iv".parse::<RotorKind>().unwrap(), RotorKind::IV);
        assert_eq!(" V ".parse::<RotorKind>().unwrap(), RotorKind::V);

        let err = "VI".parse::<RotorKind>().unwrap_err();
        assert_eq!(err, EnigmaError::UnknownRotor("VI".to_string()));
    }

    #[test]
    fn test_reflector_kind_from_str() {
        assert_eq!("B".parse::<ReflectorKind>().unwrap(), ReflectorKind::B);
        assert_eq!("c".parse::<ReflectorKind>().unwrap(), ReflectorKind::C);
        assert!("A".parse::<ReflectorKind>().is_err());
    }

    #[test]
    fn test_stepping_from_str() {
        assert_eq!("classic".parse::<Stepping>().unwrap(), Stepping::Classic);
        assert_eq!("Basic".parse::<Stepping>().unwrap(), Stepping::Basic);
        assert!("turbo".parse::<Stepping>().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = MachineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rotors.len(), CLASSIC_ROTOR_COUNT);
        assert_eq!(config.reflector, ReflectorKind::B);
        assert_eq!(config.stepping, Stepping::Classic);
    }

    #[test]
    fn test_classic_rejects_wrong_rotor_count() {
        let mut config = MachineConfig::default();
        config.rotors.push(RotorSlot::new(RotorKind::IV, 0, 0));

        let err = config.validate().unwrap_err();
        assert_eq!(err, EnigmaError::UnsupportedRotorCount(4));
    }

    #[test]
    fn test_basic_rejects_empty_rotor_bank() {
        let config = MachineConfig {
            rotors: Vec::new(),
            stepping: Stepping::Basic,
            ..MachineConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            EnigmaError::UnsupportedRotorCount(0)
        );
    }

    #[test]
    fn test_out_of_range_settings_are_rejected_not_wrapped() {
        let mut config = MachineConfig::default();
        config.rotors[1].position = 26;
        assert_eq!(
            config.validate().unwrap_err(),
            EnigmaError::SettingOutOfRange {
                slot: 1,
                setting: "position",
                value: 26,
            }
        );

        let mut config = MachineConfig::default();
        config.rotors[2].ring = 99;
        assert!(matches!(
            config.validate().unwrap_err(),
            EnigmaError::SettingOutOfRange { slot: 2, .. }
        ));
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = MachineConfig::default();

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MachineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_rotor_kind_display() {
        assert_eq!(RotorKind::III.to_string(), "III");
        assert_eq!(ReflectorKind::C.to_string(), "C");
    }

    #[test]
    fn test_error_display() {
        let error = EnigmaError::UnknownRotor("VIII".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unknown rotor type"));
        assert!(error_msg.contains("VIII"));
    }
}
