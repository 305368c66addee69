//! ChromaPad is [Embassy](https://embassy.dev)-based firmware for a 16-key chromatic MIDI pad.
//! A 4x4 button matrix is scanned continuously; presses become MIDI Note On/Off messages on a
//! DIN serial line, and a small TFT mirrors the note being played. The firmware runs on the
//! [Nucleo-F767ZI development board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html),
//! which is powered by an F7-series STM32 microcontroller.
//!
//! Everything with edge cases lives in [`chromapad_lib`] and is unit-tested on the host; this
//! crate binds that logic to the board.
//!
//! Hardware hookup:
//! - Button matrix: rows PE7/PE8/PE10/PE12 (driven low one at a time),
//!   columns PE14/PE15/PB10/PB11 (inputs with pull-ups)
//! - MIDI DIN jack: USART6 TX on PG14, 31250 baud 8N1
//! - 128x160 TFT (ST7735): SPI1 SCK PA5, MOSI PA7, CS PD14, DC PF12, RST PF13
//! - User LED (blue, PB7): lit while a note sounds

#![no_std]
#![no_main]

mod display;
mod keypad;
mod midi;

use crate::{display::TftScreen, keypad::Keypad, midi::MidiOut};
use chromapad_lib::screen::{show_note, show_startup};
use chromapad_lib::scan::KeyScanner;
use chromapad_lib::tracker::{KeyTracker, NoteEvent};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_stm32::{
    Config,
    gpio::{Input, Level, Output, Pull, Speed},
    spi::{self, Spi},
    time::Hertz,
    usart::{self, UartTx},
};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    watch::{Receiver, Sender, Watch},
};
use embassy_time::{Duration, Timer};
use wmidi::Note;

use {defmt_rtt as _, panic_probe as _};

/// How often the matrix is sampled. Debounce windows in the library are counted in these ticks.
const SCAN_PERIOD: Duration = Duration::from_millis(5);

const SOUNDING_RECEIVER_CNT: usize = 1;
type SoundingSync = Watch<CriticalSectionRawMutex, Option<Note>, SOUNDING_RECEIVER_CNT>;
type SoundingSender<'a> = Sender<'a, CriticalSectionRawMutex, Option<Note>, SOUNDING_RECEIVER_CNT>;
type SoundingReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, Option<Note>, SOUNDING_RECEIVER_CNT>;

/// Mirrors the note currently sounding (if any) for the LED task. Observability only; nothing
/// here feeds back into the polling loop.
static SOUNDING: SoundingSync = Watch::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Initializing ChromaPad");

    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            divq: None,
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
    }
    let p = embassy_stm32::init(config);

    let rows = [
        Output::new(p.PE7, Level::High, Speed::Low),
        Output::new(p.PE8, Level::High, Speed::Low),
        Output::new(p.PE10, Level::High, Speed::Low),
        Output::new(p.PE12, Level::High, Speed::Low),
    ];
    let cols = [
        Input::new(p.PE14, Pull::Up),
        Input::new(p.PE15, Pull::Up),
        Input::new(p.PB10, Pull::Up),
        Input::new(p.PB11, Pull::Up),
    ];
    let keypad = Keypad::new(rows, cols);

    let mut uart_config = usart::Config::default();
    uart_config.baudrate = midi::MIDI_BAUD;
    let tx = unwrap!(UartTx::new_blocking(p.USART6, p.PG14, uart_config));
    let midi = MidiOut::new(tx);

    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(15_000_000);
    let tft_spi = Spi::new_blocking_txonly(p.SPI1, p.PA5, p.PA7, spi_config);
    let tft_cs = Output::new(p.PD14, Level::High, Speed::VeryHigh);
    let tft_dc = Output::new(p.PF12, Level::Low, Speed::VeryHigh);
    let tft_rst = Output::new(p.PF13, Level::High, Speed::VeryHigh);
    let screen = TftScreen::new(tft_spi, tft_cs, tft_dc, tft_rst);

    unwrap!(spawner.spawn(translate(keypad, midi, screen, SOUNDING.sender())));

    let blue_led = Output::new(p.PB7, Level::Low, Speed::Low);
    let sounding = SOUNDING
        .receiver()
        .expect("The sounding-note synchronizer should have a receiver available");
    unwrap!(spawner.spawn(note_led(blue_led, sounding)));
}

/// The device's one logical thread of control: sample, translate, emit, sleep, repeat.
///
/// Each iteration synchronously samples the matrix, feeds the poll result through the tracker,
/// writes MIDI bytes and repaints the screen when an edge produced an event, then sleeps until
/// the next tick.
#[embassy_executor::task]
async fn translate(
    mut keypad: Keypad,
    mut midi: MidiOut,
    mut tft: TftScreen,
    sounding: SoundingSender<'static>,
) -> ! {
    let mut scanner = KeyScanner::new();
    let mut tracker = KeyTracker::new();

    show_startup(&mut tft);
    sounding.send(None);

    loop {
        let sample = keypad.sample();
        let (key, state) = scanner.scan(&sample);

        match tracker.update(key, state) {
            Some(NoteEvent::On(note)) => {
                midi.send(NoteEvent::On(note));
                show_note(&mut tft, note);
                sounding.send(Some(note));
                info!("Note on: {}", note.to_str());
            }
            Some(NoteEvent::Off(note)) => {
                midi.send(NoteEvent::Off(note));
                sounding.send(None);
                info!("Note off: {}", note.to_str());
            }
            None => {}
        }

        Timer::after(SCAN_PERIOD).await;
    }
}

/// Lights the user LED while a note sounds. Status indication only; nothing reads it back.
#[embassy_executor::task]
async fn note_led(mut led: Output<'static>, mut sounding: SoundingReceiver<'static>) -> ! {
    loop {
        match sounding.changed().await {
            Some(_) => led.set_high(),
            None => led.set_low(),
        }
    }
}
