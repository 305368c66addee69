//! Debounce and edge detection for the button matrix.
//!
//! The firmware samples the raw switch matrix once per tick and hands each snapshot to
//! [`KeyScanner::scan`], which debounces it and reports at most one key per poll together with
//! its [`KeyState`]. Press and release are reported exactly once per edge; the steady states in
//! between are [`KeyState::Held`] and [`KeyState::Idle`].

use crate::keymap::{COLS, Key, LEGEND, ROWS};
use tinyvec::{ArrayVec, array_vec};

/// One full sample of the switch matrix, row-major, `true` for a closed switch.
pub type Snapshot = [[bool; COLS]; ROWS];

const KEY_COUNT: usize = ROWS * COLS;

/// Scan ticks a released switch keeps reading as closed before the release is believed.
///
/// Presses register eagerly; only the release side is stretched, which also swallows contact
/// chatter while the switch settles.
const DEBOUNCE_TICKS: u8 = 4;

/// A tick-based, allocation-free debouncer for the whole matrix.
///
/// Each switch holds an expiration counter which is reloaded while the switch reads closed and
/// decays once per tick after it opens. The switch reads as released only once the counter has
/// run out.
#[derive(Debug, Default)]
struct Debounce {
    counters: [[u8; COLS]; ROWS],
}

impl Debounce {
    fn tick(&mut self, raw: &Snapshot) -> Snapshot {
        let mut settled = [[false; COLS]; ROWS];
        for row in 0..ROWS {
            for col in 0..COLS {
                let counter = &mut self.counters[row][col];
                *counter = match (raw[row][col], *counter) {
                    (true, _) => DEBOUNCE_TICKS,
                    (false, 0) => 0,
                    (false, remaining) => remaining - 1,
                };
                settled[row][col] = *counter != 0;
            }
        }
        settled
    }
}

/// The state reported alongside a key on each poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// The key went down this poll.
    Pressed,
    /// The key came up this poll.
    Released,
    /// The key has been down since an earlier poll.
    Held,
    /// No key is tracked.
    Idle,
}

/// Debounces raw matrix samples and tracks a single current key.
///
/// The matrix can close several switches at once, but the scanner follows the rest of the
/// device in tracking one key at a time: the most recent press takes over the slot, and a
/// `Released` edge is reported only for the tracked key. An older key still held when the
/// tracked key is released goes back to being invisible rather than retriggering.
#[derive(Debug, Default)]
pub struct KeyScanner {
    debounce: Debounce,
    previous: Snapshot,
    current: Option<Key>,
}

impl KeyScanner {
    /// Constructs an idle scanner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Debounces one raw matrix sample and reports the current key and its state.
    pub fn scan(&mut self, raw: &Snapshot) -> (Option<Key>, KeyState) {
        let settled = self.debounce.tick(raw);

        // Switches that closed since the last tick, in scan order. tinyvec requires its items
        // to implement Default, which Key doesn't; the legend character is collected instead
        // and wrapped at the interface.
        let mut new_presses: ArrayVec<[char; KEY_COUNT]> = array_vec!();
        for row in 0..ROWS {
            for col in 0..COLS {
                if settled[row][col] && !self.previous[row][col] {
                    new_presses.push(LEGEND[row][col]);
                }
            }
        }

        let current_still_down = self
            .current
            .map_or(false, |key| is_down(&settled, key));
        self.previous = settled;

        // Simultaneous same-tick presses resolve in scan order.
        if let Some(&symbol) = new_presses.first() {
            let key = Key::new(symbol);
            self.current = Some(key);
            return (Some(key), KeyState::Pressed);
        }

        match self.current {
            Some(key) if current_still_down => (Some(key), KeyState::Held),
            Some(key) => {
                self.current = None;
                (Some(key), KeyState::Released)
            }
            None => (None, KeyState::Idle),
        }
    }
}

fn is_down(settled: &Snapshot, key: Key) -> bool {
    for row in 0..ROWS {
        for col in 0..COLS {
            if LEGEND[row][col] == key.symbol() {
                return settled[row][col];
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CONTACT: Snapshot = [[false; COLS]; ROWS];

    fn pressing(symbol: char) -> Snapshot {
        let mut snapshot = NO_CONTACT;
        for row in 0..ROWS {
            for col in 0..COLS {
                if LEGEND[row][col] == symbol {
                    snapshot[row][col] = true;
                }
            }
        }
        snapshot
    }

    fn both(a: &Snapshot, b: &Snapshot) -> Snapshot {
        let mut snapshot = NO_CONTACT;
        for row in 0..ROWS {
            for col in 0..COLS {
                snapshot[row][col] = a[row][col] || b[row][col];
            }
        }
        snapshot
    }

    /// Runs a released switch through the debounce tail until the scanner reports the edge.
    fn drain_release(scanner: &mut KeyScanner, key: Key) {
        for _ in 1..DEBOUNCE_TICKS {
            assert_eq!(
                (Some(key), KeyState::Held),
                scanner.scan(&NO_CONTACT),
                "The release should be held back while the debounce counter drains"
            );
        }
        assert_eq!(
            (Some(key), KeyState::Released),
            scanner.scan(&NO_CONTACT),
            "Expected left but got right"
        );
    }

    #[test]
    fn idle_matrix_reports_idle() {
        let mut scanner = KeyScanner::new();
        assert_eq!(
            (None, KeyState::Idle),
            scanner.scan(&NO_CONTACT),
            "Expected left but got right"
        );
    }

    #[test]
    fn press_is_a_single_edge() {
        let mut scanner = KeyScanner::new();
        let one = pressing('1');

        assert_eq!(
            (Some(Key::new('1')), KeyState::Pressed),
            scanner.scan(&one),
            "Expected left but got right"
        );
        assert_eq!(
            (Some(Key::new('1')), KeyState::Held),
            scanner.scan(&one),
            "A continuing press should read as held, not as another edge"
        );
    }

    #[test]
    fn release_is_a_single_edge_then_idle() {
        let mut scanner = KeyScanner::new();
        scanner.scan(&pressing('1'));

        drain_release(&mut scanner, Key::new('1'));
        assert_eq!(
            (None, KeyState::Idle),
            scanner.scan(&NO_CONTACT),
            "Expected left but got right"
        );
    }

    #[test]
    fn chatter_within_the_debounce_window_is_swallowed() {
        let mut scanner = KeyScanner::new();
        let one = pressing('1');

        assert_eq!((Some(Key::new('1')), KeyState::Pressed), scanner.scan(&one));
        // the contact bounces open for a tick and closes again
        assert_eq!(
            (Some(Key::new('1')), KeyState::Held),
            scanner.scan(&NO_CONTACT),
            "A bounce should not produce a release"
        );
        assert_eq!(
            (Some(Key::new('1')), KeyState::Held),
            scanner.scan(&one),
            "Re-closing within the window should not produce another press"
        );
    }

    #[test]
    fn newest_press_takes_over_the_slot() {
        let mut scanner = KeyScanner::new();
        let first = pressing('1');
        let chord = both(&pressing('1'), &pressing('2'));

        assert_eq!((Some(Key::new('1')), KeyState::Pressed), scanner.scan(&first));
        assert_eq!(
            (Some(Key::new('2')), KeyState::Pressed),
            scanner.scan(&chord),
            "The newer key should win the single tracked slot"
        );
        assert_eq!(
            (Some(Key::new('2')), KeyState::Held),
            scanner.scan(&chord),
            "The older key should not steal the slot back"
        );
    }

    #[test]
    fn older_key_does_not_retrigger_after_tracked_release() {
        let mut scanner = KeyScanner::new();
        let first = pressing('1');
        let chord = both(&pressing('1'), &pressing('2'));

        scanner.scan(&first);
        scanner.scan(&chord);
        // '2' comes up while '1' stays held
        for _ in 1..DEBOUNCE_TICKS {
            assert_eq!((Some(Key::new('2')), KeyState::Held), scanner.scan(&first));
        }
        assert_eq!(
            (Some(Key::new('2')), KeyState::Released),
            scanner.scan(&first),
            "Expected left but got right"
        );
        assert_eq!(
            (None, KeyState::Idle),
            scanner.scan(&first),
            "A key held since before the tracked release stays invisible"
        );
    }
}
