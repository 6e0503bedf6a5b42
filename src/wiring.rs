//! Static wiring data for the supported rotors and reflectors, plus the
//! letter/index mapping used throughout the simulator.
//!
//! The wiring strings are the historical Enigma I tables. Each rotor's inverse
//! wiring is derived once, at first use, and shared by reference across all
//! machine instances; nothing in this module is mutated after initialization.

use crate::types::{ReflectorKind, RotorKind, ALPHABET_LEN};
use std::collections::HashMap;

/// The machine's alphabet, in index order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the substitution alphabet for a rotor kind.
pub fn rotor_wiring(kind: RotorKind) -> &'static str {
    match kind {
        RotorKind::I => "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
        RotorKind::II => "AJDKSIRUXBLHWTMCQGZNPYFVOE",
        RotorKind::III => "BDFHJLCPRTXVZNYEIWGAKMUSQO",
        RotorKind::IV => "ESOVPZJAYQUIRHXLNFTGKDCMWB",
        RotorKind::V => "VZBRGITYUPSDNHLXAWMJQOFECK",
    }
}

/// Returns the notch letter for a rotor kind: the position at which, on the
/// next keypress, the rotor to its left is caused to step.
pub fn rotor_notch(kind: RotorKind) -> char {
    match kind {
        RotorKind::I => 'Q',
        RotorKind::II => 'E',
        RotorKind::III => 'V',
        RotorKind::IV => 'J',
        RotorKind::V => 'Z',
    }
}

/// Returns the substitution alphabet for a reflector kind.
pub fn reflector_wiring(kind: ReflectorKind) -> &'static str {
    match kind {
        ReflectorKind::B => "YRUHQSLDPXNGOKMIEBFZCWVJAT",
        ReflectorKind::C => "FVPJIAOYEDRZXWGCTKUQSBNMHL",
    }
}

/// Maps a letter to its alphabet index, case-insensitively.
/// Returns `None` for anything outside `A..=Z` / `a..=z`.
pub fn letter_to_index(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        'a'..='z' => Some(c as u8 - b'a'),
        _ => None,
    }
}

/// Maps an alphabet index in `0..26` back to its (uppercase) letter.
pub fn index_to_letter(index: u8) -> char {
    debug_assert!((index as usize) < ALPHABET_LEN);
    (b'A' + index) as char
}

/// The resolved wiring of one rotor kind: index-mapped substitution table,
/// its precomputed inverse, and the notch index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorSpec {
    pub kind: RotorKind,
    /// `wiring[i]` is the output index for input index `i` (forward pass).
    pub wiring: [u8; ALPHABET_LEN],
    /// `inverse[wiring[i]] == i` for every index (backward pass).
    pub inverse: [u8; ALPHABET_LEN],
    /// The index of the notch letter.
    pub notch: u8,
}

/// The resolved wiring of one reflector kind. The historical tables are
/// involutive with no fixed points; the simulator relies on that property
/// rather than re-checking it per character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectorSpec {
    pub kind: ReflectorKind,
    pub wiring: [u8; ALPHABET_LEN],
}

fn parse_wiring(wiring: &str) -> [u8; ALPHABET_LEN] {
    let mut table = [0u8; ALPHABET_LEN];
    for (i, c) in wiring.chars().enumerate() {
        table[i] = letter_to_index(c).expect("wiring tables contain only A-Z");
    }
    table
}

fn invert_wiring(wiring: &[u8; ALPHABET_LEN]) -> [u8; ALPHABET_LEN] {
    let mut inverse = [0u8; ALPHABET_LEN];
    for (i, &out) in wiring.iter().enumerate() {
        inverse[out as usize] = i as u8;
    }
    inverse
}

lazy_static::lazy_static! {
    static ref ROTOR_SPECS: HashMap<RotorKind, RotorSpec> = {
        RotorKind::ALL
            .iter()
            .map(|&kind| {
                let wiring = parse_wiring(rotor_wiring(kind));
                let spec = RotorSpec {
                    kind,
                    inverse: invert_wiring(&wiring),
                    wiring,
                    notch: letter_to_index(rotor_notch(kind))
                        .expect("notch letters are A-Z"),
                };
                (kind, spec)
            })
            .collect()
    };

    static ref REFLECTOR_SPECS: HashMap<ReflectorKind, ReflectorSpec> = {
        ReflectorKind::ALL
            .iter()
            .map(|&kind| {
                (
                    kind,
                    ReflectorSpec {
                        kind,
                        wiring: parse_wiring(reflector_wiring(kind)),
                    },
                )
            })
            .collect()
    };
}

/// Returns the resolved spec for a rotor kind.
pub fn rotor_spec(kind: RotorKind) -> &'static RotorSpec {
    &ROTOR_SPECS[&kind]
}

/// Returns the resolved spec for a reflector kind.
pub fn reflector_spec(kind: ReflectorKind) -> &'static ReflectorSpec {
    &REFLECTOR_SPECS[&kind]
}
