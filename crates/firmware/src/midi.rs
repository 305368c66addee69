//! The DIN MIDI transmitter.

use chromapad_lib::midi_out;
use chromapad_lib::tracker::NoteEvent;
use defmt::debug;
use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::UartTx;

/// MIDI's electrical standard fixes the line rate.
pub const MIDI_BAUD: u32 = 31_250;

/// Writes framed note events to the serial line.
///
/// The line gives no acknowledgement and no backpressure; writes are fire-and-forget and
/// failures are neither detected nor retried.
pub struct MidiOut {
    tx: UartTx<'static, Blocking>,
}

impl MidiOut {
    /// Wraps a transmitter already configured for the MIDI line rate.
    pub fn new(tx: UartTx<'static, Blocking>) -> Self {
        Self { tx }
    }

    /// Frames and sends one note event.
    pub fn send(&mut self, event: NoteEvent) {
        let bytes = midi_out::frame(event);
        debug!("MIDI out: {:x}", bytes);
        let _ = self.tx.blocking_write(&bytes);
    }
}
