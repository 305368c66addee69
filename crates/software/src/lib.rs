//! This crate contains architecture-agnostic logic for the ChromaPad, a 16-key pad controller
//! which plays the chromatic scale from Middle C over a [MIDI](https://midi.org/midi-1-0) DIN
//! line. It covers the debouncing and edge detection of the 4x4 button matrix, the static
//! key-to-note table, the single-key state machine which turns scan results into Note On/Off
//! events, the 3-byte wire framing of those events, and the rendering of device status to the
//! pad's little screen.
//!
//! Nothing here touches hardware, so the whole crate is unit-tested on the host. The firmware
//! crate binds these pieces to the board's peripherals.

#![deny(missing_docs)]
#![no_std]

pub mod keymap;

pub mod midi_out;

pub mod scan;

pub mod screen;

pub mod tracker;
