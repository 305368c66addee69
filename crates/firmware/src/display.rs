//! The 128x160 TFT behind the [`Screen`] trait.
//!
//! Rendering is fire-and-forget: the panel is pure output, so draw errors are swallowed rather
//! than propagated into the polling loop.

use chromapad_lib::screen::Screen;
use defmt::info;
use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;
use embassy_time::Delay;
use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii},
    pixelcolor::Rgb565,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::{
    Builder, Display,
    interface::SpiInterface,
    models::ST7735s,
    options::{Orientation, Rotation},
};
use static_cell::StaticCell;

/// Panel resolution in its native portrait orientation.
const PANEL_WIDTH: u16 = 128;
const PANEL_HEIGHT: u16 = 160;

type TftDevice = ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, Delay>;
type TftInterface = SpiInterface<'static, TftDevice, Output<'static>>;
type Tft = Display<TftInterface, ST7735s, Output<'static>>;

/// The TFT with the cursor/text-size state the [`Screen`] trait expects.
pub struct TftScreen {
    tft: Tft,
    cursor: Point,
    font: &'static MonoFont<'static>,
}

impl TftScreen {
    /// Brings up the panel, landscape-rotated, blanked to black.
    ///
    /// Panics on initialization failure; a pad without its screen is not worth booting.
    pub fn new(
        spi: Spi<'static, Blocking>,
        cs: Output<'static>,
        dc: Output<'static>,
        rst: Output<'static>,
    ) -> Self {
        static COMMAND_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

        let device = ExclusiveDevice::new(spi, cs, Delay)
            .expect("Chip-select for the TFT should be drivable");
        let interface = SpiInterface::new(device, dc, COMMAND_BUFFER.init([0; 512]));

        let mut tft = Builder::new(ST7735s, interface)
            .reset_pin(rst)
            .display_size(PANEL_WIDTH, PANEL_HEIGHT)
            .orientation(Orientation::new().rotate(Rotation::Deg90))
            .init(&mut Delay)
            .expect("The TFT should come up over SPI");
        let _ = tft.clear(Rgb565::BLACK);
        info!("TFT initialized");

        Self {
            tft,
            cursor: Point::zero(),
            font: &ascii::FONT_9X18_BOLD,
        }
    }
}

impl Screen for TftScreen {
    fn clear(&mut self) {
        let _ = self.tft.clear(Rgb565::BLACK);
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Point::new(i32::from(x), i32::from(y));
    }

    fn set_text_size(&mut self, size: u8) {
        // the panel draws fixed mono fonts; sizes pick the nearest one
        self.font = match size {
            0 | 1 => &ascii::FONT_6X13,
            2 | 3 => &ascii::FONT_9X18_BOLD,
            _ => &ascii::FONT_10X20,
        };
    }

    fn print(&mut self, text: &str) {
        let style = MonoTextStyle::new(self.font, Rgb565::WHITE);
        let _ = Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.tft);
    }
}
