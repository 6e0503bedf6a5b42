//! This module defines the `EnigmaMachine` struct, which simulates an Enigma-style
//! rotor cipher machine. It handles rotor stepping (including the double-step
//! anomaly), the forward/reflector/backward signal path, and per-message state.

use crate::types::{EnigmaError, MachineConfig, Stepping, ALPHABET_LEN};
use crate::wiring::{index_to_letter, letter_to_index, reflector_spec, rotor_spec, ReflectorSpec, RotorSpec};

/// The runtime state of one mounted rotor: its resolved wiring plus the
/// mutable rotational position and the fixed ring setting.
#[derive(Debug, Clone)]
struct RotorState {
    spec: &'static RotorSpec,
    position: u8,
    ring: u8,
}

impl RotorState {
    fn at_notch(&self) -> bool {
        self.position == self.spec.notch
    }

    fn advance(&mut self) {
        self.position = (self.position + 1) % ALPHABET_LEN as u8;
    }

    /// Maps a signal index through the rotor on the forward pass (entry side).
    ///
    /// The position/ring offsets are applied around the fixed wiring, modelling
    /// the physical rotor's rotation relative to the stationary contacts.
    fn forward(&self, signal: u8) -> u8 {
        let n = ALPHABET_LEN as u8;
        let shifted = (signal + self.position + n - self.ring) % n;
        let wired = self.spec.wiring[shifted as usize];
        (wired + n + self.ring - self.position) % n
    }

    /// Maps a signal index through the rotor on the backward pass, using the
    /// precomputed inverse wiring. Same offset sandwich as [`forward`].
    fn backward(&self, signal: u8) -> u8 {
        let n = ALPHABET_LEN as u8;
        let shifted = (signal + self.position + n - self.ring) % n;
        let wired = self.spec.inverse[shifted as usize];
        (wired + n + self.ring - self.position) % n
    }
}

/// Represents an Enigma machine instance.
///
/// This struct encapsulates the mounted rotors (leftmost first), the reflector,
/// and the stepping mode. Rotor positions mutate in place as letters are
/// encoded, so one instance must serve exactly one message; construct a fresh
/// machine (or call [`reset`](EnigmaMachine::reset)) for each independent
/// encode or decode run.
#[derive(Debug)]
pub struct EnigmaMachine {
    config: MachineConfig,
    rotors: Vec<RotorState>,
    reflector: &'static ReflectorSpec,
    stepping: Stepping,
    letter_count: usize,
}

impl EnigmaMachine {
    /// Creates a new `EnigmaMachine` from a given `MachineConfig`.
    ///
    /// The configuration is validated first; on any configuration error the
    /// machine is not constructed at all.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration defining rotor order, positions, ring
    ///   settings, reflector, and stepping mode.
    pub fn new(config: MachineConfig) -> Result<Self, EnigmaError> {
        config.validate()?;

        let rotors = config
            .rotors
            .iter()
            .map(|slot| RotorState {
                spec: rotor_spec(slot.kind),
                position: slot.position,
                ring: slot.ring,
            })
            .collect();

        Ok(Self {
            rotors,
            reflector: reflector_spec(config.reflector),
            stepping: config.stepping,
            letter_count: 0,
            config,
        })
    }

    /// Advances the rotors for one keypress.
    ///
    /// Classic stepping evaluates both notch conditions before any rotor
    /// moves: if the middle rotor sits at its own notch it advances the left
    /// rotor AND itself (the double-step anomaly); otherwise, if the right
    /// rotor sits at its notch, the middle rotor advances. The right rotor
    /// advances unconditionally.
    fn step_rotors(&mut self) {
        match self.stepping {
            Stepping::Classic => {
                // Notch conditions are sampled before any movement this keypress.
                let middle_at_notch = self.rotors[1].at_notch();
                let right_at_notch = self.rotors[2].at_notch();

                if middle_at_notch {
                    self.rotors[0].advance();
                    self.rotors[1].advance();
                } else if right_at_notch {
                    self.rotors[1].advance();
                }
                self.rotors[2].advance();
            }
            Stepping::Basic => {
                if let Some(rotor) = self.rotors.last_mut() {
                    rotor.advance();
                }
            }
        }
    }

    /// Encodes a single character, mutating rotor positions as a side effect.
    ///
    /// Alphabetic input (either case) steps the rotors first, then travels the
    /// signal path: forward through the rotors from rightmost to leftmost,
    /// through the reflector once, then backward from leftmost to rightmost
    /// via the inverse wirings. Output is always uppercase. Any non-alphabetic
    /// character is returned unchanged and does not step the rotors.
    pub fn encode_char(&mut self, c: char) -> char {
        let Some(mut signal) = letter_to_index(c) else {
            return c;
        };

        self.step_rotors();

        for rotor in self.rotors.iter().rev() {
            signal = rotor.forward(signal);
        }

        signal = self.reflector.wiring[signal as usize];

        for rotor in self.rotors.iter() {
            signal = rotor.backward(signal);
        }

        self.letter_count += 1;
        index_to_letter(signal)
    }

    /// Encodes a string character by character, accumulating rotor state
    /// across the whole input. The output has the same length as the input.
    pub fn encode_str(&mut self, text: &str) -> String {
        text.chars().map(|c| self.encode_char(c)).collect()
    }

    /// Resets the machine to its configured starting positions and zeroes the
    /// processed-letter count. This is the supported way to reuse one machine
    /// value for a new, independent message.
    pub fn reset(&mut self) {
        for (state, slot) in self.rotors.iter_mut().zip(self.config.rotors.iter()) {
            state.position = slot.position;
        }
        self.letter_count = 0;
    }

    /// Returns the current rotor positions as indices, leftmost first.
    pub fn positions(&self) -> Vec<u8> {
        self.rotors.iter().map(|r| r.position).collect()
    }

    /// Returns the current rotor positions as a letter string, leftmost first,
    /// the way the machine's windows would display them.
    pub fn position_letters(&self) -> String {
        self.rotors
            .iter()
            .map(|r| index_to_letter(r.position))
            .collect()
    }

    /// Returns the number of alphabetic characters processed so far.
    /// Pass-through characters are not counted.
    pub fn letter_count(&self) -> usize {
        self.letter_count
    }

    /// Returns the configuration this machine was constructed from.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}
