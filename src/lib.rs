//! This crate provides the core logic for an Enigma-style rotor cipher machine
//! simulator. It includes modules for the historical wiring tables, the cipher
//! engine with faithful M3 stepping (double-step anomaly included), a parser
//! and loader for machine settings documents, and one-shot encode/decode helpers.

pub mod encoder;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod types;
pub mod wiring;

/// Re-exports the one-shot encoding functions from the encoder module.
pub use encoder::{decode, encode};
/// Re-exports the `SettingsLoader` struct from the loader module.
pub use loader::SettingsLoader;
/// Re-exports the `EnigmaMachine` struct from the machine module.
pub use machine::EnigmaMachine;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the configuration and error types from the types module.
pub use types::{
    EnigmaError, MachineConfig, ReflectorKind, RotorKind, RotorSlot, Stepping,
    CLASSIC_ROTOR_COUNT, MAX_SETTINGS_SIZE,
};
/// Re-exports the wiring specs and letter/index helpers from the wiring module.
pub use wiring::{index_to_letter, letter_to_index, reflector_spec, rotor_spec, ALPHABET};
