//! Wire framing for the note events the device emits.
//!
//! Every event is a raw 3-byte channel-voice message. There is no running status and no framing
//! beyond the MIDI byte stream itself; the transport sends the bytes as-is.

use crate::tracker::NoteEvent;
use wmidi::{Channel, MidiMessage, Note, U7};

/// The fixed channel the device transmits on (status nibble 0).
pub const CHANNEL: Channel = Channel::Ch1;

/// Every press sounds at full velocity; the pad has no velocity sensing.
pub const PRESS_VELOCITY: U7 = U7::MAX;

/// Released notes carry the conventional zero velocity.
pub const RELEASE_VELOCITY: U7 = U7::MIN;

/// Frames a note event as its 3-byte wire message.
pub fn frame(event: NoteEvent) -> [u8; 3] {
    let message = match event {
        NoteEvent::On(note) => MidiMessage::NoteOn(CHANNEL, note, PRESS_VELOCITY),
        NoteEvent::Off(note) => MidiMessage::NoteOff(CHANNEL, note, RELEASE_VELOCITY),
    };

    let mut bytes = [0_u8; 3];
    message
        .copy_to_slice(&mut bytes)
        .expect("a channel-voice note message is always three bytes");
    bytes
}

/// Frames a Note On for a note. See [`frame`].
pub fn note_on_bytes(note: Note) -> [u8; 3] {
    frame(NoteEvent::On(note))
}

/// Frames a Note Off for a note. See [`frame`].
pub fn note_off_bytes(note: Note) -> [u8; 3] {
    frame(NoteEvent::Off(note))
}
