//! The single-key state machine which turns poll results into note events.

use crate::keymap::Key;
use crate::scan::KeyState;
use wmidi::Note;

/// A note event ready for wire framing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteEvent {
    /// The note begins sounding.
    On(Note),
    /// The note stops sounding.
    Off(Note),
}

// wmidi's Note doesn't implement Format, so the derive can't be used here
#[cfg(feature = "defmt")]
impl defmt::Format for NoteEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            NoteEvent::On(note) => defmt::write!(fmt, "NoteEvent::On({=str})", note.to_str()),
            NoteEvent::Off(note) => defmt::write!(fmt, "NoteEvent::Off({=str})", note.to_str()),
        }
    }
}

/// Tracks the one key most recently seen down and emits note events on edges.
///
/// The tracked key is a scalar, not a set. When two keys are physically down at once only the
/// most recent press is tracked, so the earlier key's release can go unreported; the pad is
/// monophonic and this is a documented limitation of the device, not something to patch over
/// here.
///
/// Besides the press and release edges, the tracker provides a safety-net release: if a poll
/// reports no key while one was still recorded as sounding, the recorded key's note is turned
/// off. A missed release edge therefore cannot leave a note stuck on.
#[derive(Debug, Default, PartialEq)]
pub struct KeyTracker {
    /// The most recently observed key, `None` once its note has been released.
    last_key: Option<Key>,
}

impl KeyTracker {
    /// Constructs a tracker with no key observed yet.
    pub const fn new() -> Self {
        Self { last_key: None }
    }

    /// Feeds one poll result through the state machine.
    ///
    /// Keys outside the note table produce no event in any position; their edges are dropped
    /// silently.
    pub fn update(&mut self, key: Option<Key>, state: KeyState) -> Option<NoteEvent> {
        match (key, state) {
            (Some(key), KeyState::Pressed) => {
                self.last_key = Some(key);
                let note = key.note();
                #[cfg(feature = "defmt")]
                if note.is_none() {
                    defmt::debug!("ignoring key outside the note table: {}", key);
                }
                note.map(NoteEvent::On)
            }
            (Some(key), KeyState::Released) => {
                // the released key no longer sounds; forgetting it keeps the sentinel poll
                // below from turning the same note off twice
                self.last_key = None;
                key.note().map(NoteEvent::Off)
            }
            (Some(key), _) => {
                self.last_key = Some(key);
                None
            }
            (None, _) => self.last_key.take().and_then(Key::note).map(NoteEvent::Off),
        }
    }
}
