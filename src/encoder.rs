//! One-shot encode/decode helpers that construct a fresh machine per message.
//!
//! Rotor positions mutate as a message is processed, so a machine that has
//! already encoded text cannot decode it (or encode another message) without
//! being reset. These helpers make the one-machine-per-message rule the path
//! of least resistance.

use crate::machine::EnigmaMachine;
use crate::types::{EnigmaError, MachineConfig};

/// Encodes a message with a freshly constructed machine.
///
/// # Arguments
///
/// * `config` - The machine configuration, including starting positions.
/// * `text` - The message; non-alphabetic characters pass through unchanged.
///
/// # Returns
///
/// * `Ok(String)` - The ciphertext, same length as the input.
/// * `Err(EnigmaError)` - If the configuration is invalid.
pub fn encode(config: &MachineConfig, text: &str) -> Result<String, EnigmaError> {
    let mut machine = EnigmaMachine::new(config.clone())?;
    Ok(machine.encode_str(text))
}

/// Decodes a message with a freshly constructed machine.
///
/// The machine is reciprocal: decoding is the same transformation as
/// encoding under the same configuration.
pub fn decode(config: &MachineConfig, text: &str) -> Result<String, EnigmaError> {
    encode(config, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let config = MachineConfig::default();
        let plaintext = "MOVEMENTORDERSFOLLOW";

        let ciphertext = encode(&config, plaintext).unwrap();
        assert_ne!(ciphertext, plaintext);
        assert_eq!(decode(&config, &ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_each_call_starts_from_configured_positions() {
        let config = MachineConfig::default();

        let first = encode(&config, "REPEATEDMESSAGE").unwrap();
        let second = encode(&config, "REPEATEDMESSAGE").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_rejects_invalid_config() {
        let mut config = MachineConfig::default();
        config.rotors.pop();
        assert!(encode(&config, "ANYTHING").is_err());
    }
}
