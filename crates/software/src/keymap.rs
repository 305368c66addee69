//! The matrix legend and the static key-to-note table.

use wmidi::Note;

/// Number of rows in the button matrix.
pub const ROWS: usize = 4;

/// Number of columns in the button matrix.
pub const COLS: usize = 4;

/// The legend silkscreened onto the 4x4 matrix, row-major as wired.
///
/// The electrical layout puts the lowest notes on the bottom row, so a performer reading the
/// pad left-to-right, bottom-to-top walks up the scale.
pub const LEGEND: [[char; COLS]; ROWS] = [
    ['D', 'E', 'F', 'G'],
    ['9', 'A', 'B', 'C'],
    ['5', '6', '7', '8'],
    ['1', '2', '3', '4'],
];

/// The logical identity of one key of the matrix, independent of row/column wiring.
///
/// A `Key` carries the legend character the scanner reported. Only the sixteen legend symbols
/// map to a note; any other character is outside the table and never produces MIDI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key(char);

#[cfg(feature = "defmt")]
impl defmt::Format for Key {
    fn format(&self, fmt: defmt::Formatter) {
        let mut buf = [0_u8; 4];
        defmt::write!(fmt, "Key({=str})", self.0.encode_utf8(&mut buf));
    }
}

impl Key {
    /// Wraps a legend character. Out-of-legend characters are accepted; they simply map to no
    /// note.
    pub const fn new(symbol: char) -> Self {
        Self(symbol)
    }

    /// Returns the key at a matrix position.
    pub const fn at(row: usize, col: usize) -> Self {
        Self(LEGEND[row][col])
    }

    /// The legend character of this key.
    pub const fn symbol(self) -> char {
        self.0
    }

    /// Maps the key to its MIDI note.
    ///
    /// The table is a fixed bijection from the sixteen legend symbols onto the chromatic scale
    /// starting at Middle C (note numbers 60 through 75). Out-of-table symbols return `None`.
    pub fn note(self) -> Option<Note> {
        match self.0 {
            '1' => Some(Note::C4),
            '2' => Some(Note::Db4),
            '3' => Some(Note::D4),
            '4' => Some(Note::Eb4),
            '5' => Some(Note::E4),
            '6' => Some(Note::F4),
            '7' => Some(Note::Gb4),
            '8' => Some(Note::G4),
            '9' => Some(Note::Ab4),
            'A' => Some(Note::A4),
            'B' => Some(Note::Bb4),
            'C' => Some(Note::B4),
            'D' => Some(Note::C5),
            'E' => Some(Note::Db5),
            'F' => Some(Note::D5),
            'G' => Some(Note::Eb5),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_legend_key_has_a_note() {
        for row in LEGEND {
            for symbol in row {
                assert!(
                    Key::new(symbol).note().is_some(),
                    "Legend symbol {symbol} should map to a note"
                );
            }
        }
    }

    #[test]
    fn table_is_a_bijection_onto_the_chromatic_range() {
        let mut seen = [false; 16];
        for row in LEGEND {
            for symbol in row {
                let note = Key::new(symbol).note().unwrap() as u8;
                assert!(
                    (60..=75).contains(&note),
                    "Note {note} for {symbol} should be within 60..=75"
                );
                let slot = &mut seen[usize::from(note - 60)];
                assert!(!*slot, "Note {note} should be produced by exactly one key");
                *slot = true;
            }
        }
        assert!(seen.iter().all(|&hit| hit), "All sixteen notes should be covered");
    }

    #[test]
    fn scale_starts_at_middle_c() {
        assert_eq!(Some(Note::C4), Key::new('1').note(), "Expected left but got right");
        assert_eq!(Some(Note::Eb5), Key::new('G').note(), "Expected left but got right");
    }

    #[test]
    fn out_of_table_symbols_have_no_note() {
        for symbol in ['0', 'H', 'a', '*', '\0'] {
            assert_eq!(None, Key::new(symbol).note(), "Expected left but got right");
        }
    }

    #[test]
    fn position_lookup_matches_legend() {
        assert_eq!(Key::new('1'), Key::at(3, 0), "Expected left but got right");
        assert_eq!(Key::new('G'), Key::at(0, 3), "Expected left but got right");
    }
}
