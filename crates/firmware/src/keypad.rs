//! GPIO sampling of the 4x4 switch matrix.

use chromapad_lib::keymap::{COLS, ROWS};
use chromapad_lib::scan::Snapshot;
use cortex_m::asm;
use embassy_stm32::gpio::{Input, Output};

/// Cycles to let the column lines settle after a row is driven.
const SETTLE_CYCLES: u32 = 40;

/// The matrix pins: rows are driven low one at a time, columns read through pull-ups.
pub struct Keypad {
    rows: [Output<'static>; ROWS],
    cols: [Input<'static>; COLS],
}

impl Keypad {
    /// Takes ownership of the matrix pins. Row outputs must be initialized high (inactive).
    pub fn new(rows: [Output<'static>; ROWS], cols: [Input<'static>; COLS]) -> Self {
        Self { rows, cols }
    }

    /// Samples every switch once. A closed switch pulls its column line low while its row is
    /// driven.
    pub fn sample(&mut self) -> Snapshot {
        let mut snapshot = [[false; COLS]; ROWS];
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_low();
            asm::delay(SETTLE_CYCLES);
            for (c, col) in self.cols.iter().enumerate() {
                snapshot[r][c] = col.is_low();
            }
            row.set_high();
        }
        snapshot
    }
}
