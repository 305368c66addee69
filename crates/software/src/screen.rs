//! Status rendering for the pad's little screen.
//!
//! The screen is a pure output collaborator: the [`Screen`] trait is fire-and-forget with no
//! error reporting, and nothing drawn here feeds back into the translator. The firmware
//! implements the trait for the TFT; the tests implement it with a recorder.

use core::fmt::Write as _;
use heapless::String;
use wmidi::Note;

/// Text size used for prompts and labels.
const LABEL_TEXT_SIZE: u8 = 2;

/// Text size used for the big note number.
const NOTE_TEXT_SIZE: u8 = 4;

/// A minimal character screen: a cursor, a text size, and a way to put text down.
pub trait Screen {
    /// Blanks the whole screen.
    fn clear(&mut self);

    /// Moves the cursor to a pixel position.
    fn set_cursor(&mut self, x: u16, y: u16);

    /// Selects the text size for subsequent prints.
    fn set_text_size(&mut self, size: u8);

    /// Draws text at the cursor.
    fn print(&mut self, text: &str);
}

/// Renders the startup prompt.
pub fn show_startup(screen: &mut impl Screen) {
    screen.clear();
    screen.set_cursor(0, 0);
    screen.set_text_size(LABEL_TEXT_SIZE);
    screen.print("Press a key:");
}

/// Renders the sounding note: a label, the note number writ large, and the note's name.
pub fn show_note(screen: &mut impl Screen, note: Note) {
    screen.clear();
    screen.set_cursor(0, 0);
    screen.set_text_size(LABEL_TEXT_SIZE);
    screen.print("MIDI Note:");

    // a note number is at most three digits
    let mut number: String<3> = String::new();
    let _ = write!(number, "{}", note as u8);
    screen.set_cursor(0, 60);
    screen.set_text_size(NOTE_TEXT_SIZE);
    screen.print(&number);

    screen.set_cursor(0, 110);
    screen.set_text_size(LABEL_TEXT_SIZE);
    screen.print(note.to_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Clear,
        Cursor(u16, u16),
        TextSize(u8),
        Print(String<16>),
    }

    fn print(text: &str) -> Call {
        let mut owned = String::new();
        owned.push_str(text).unwrap();
        Call::Print(owned)
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call, 16>,
    }

    impl Screen for Recorder {
        fn clear(&mut self) {
            self.calls.push(Call::Clear).unwrap();
        }

        fn set_cursor(&mut self, x: u16, y: u16) {
            self.calls.push(Call::Cursor(x, y)).unwrap();
        }

        fn set_text_size(&mut self, size: u8) {
            self.calls.push(Call::TextSize(size)).unwrap();
        }

        fn print(&mut self, text: &str) {
            let mut owned = String::new();
            owned.push_str(text).unwrap();
            self.calls.push(Call::Print(owned)).unwrap();
        }
    }

    #[test]
    fn startup_prompt() {
        let mut recorder = Recorder::default();
        show_startup(&mut recorder);

        let expected = [
            Call::Clear,
            Call::Cursor(0, 0),
            Call::TextSize(2),
            print("Press a key:"),
        ];
        assert_eq!(expected[..], recorder.calls[..], "Expected left but got right");
    }

    #[test]
    fn note_screen_shows_number_and_name() {
        let mut recorder = Recorder::default();
        show_note(&mut recorder, Note::C4);

        let expected = [
            Call::Clear,
            Call::Cursor(0, 0),
            Call::TextSize(2),
            print("MIDI Note:"),
            Call::Cursor(0, 60),
            Call::TextSize(4),
            print("60"),
            Call::Cursor(0, 110),
            Call::TextSize(2),
            print(Note::C4.to_str()),
        ];
        assert_eq!(expected[..], recorder.calls[..], "Expected left but got right");
    }

    #[test]
    fn highest_key_renders_its_number() {
        let mut recorder = Recorder::default();
        show_note(&mut recorder, Note::Eb5);

        assert!(
            recorder.calls.contains(&print("75")),
            "The note number should be printed in decimal"
        );
    }
}
