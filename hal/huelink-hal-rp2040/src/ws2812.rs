//! WS2812 strip on PIO with DMA
//!
//! Wraps embassy-rp's `PioWs2812` program as a blocking `smart-leds`
//! writer. The strip length is a const generic because the PIO driver
//! transmits fixed-size arrays.

use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::pio::{Common, Instance, PioPin, StateMachine};
use embassy_rp::pio_programs::ws2812::{Grb, PioWs2812, PioWs2812Program};
use embassy_rp::Peri;
use smart_leds::{SmartLedsWrite, RGB8};

/// Errors from [`Ws2812Strip`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ws2812Error {
    /// Frame did not have exactly N colors
    FrameLength,
}

/// WS2812 strip of `N` pixels on state machine `S` of a PIO block
///
/// Colors go out in the GRB order WS2812B parts expect.
pub struct Ws2812Strip<'d, P: Instance, const S: usize, const N: usize> {
    driver: PioWs2812<'d, P, S, N, Grb>,
    frame: [RGB8; N],
}

impl<'d, P: Instance, const S: usize, const N: usize> Ws2812Strip<'d, P, S, N> {
    /// Load the WS2812 program and claim the state machine, DMA channel and pin
    pub fn new(
        common: &mut Common<'d, P>,
        sm: StateMachine<'d, P, S>,
        dma: Peri<'d, impl Channel>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        let program = PioWs2812Program::new(common);
        Self {
            driver: PioWs2812::new(common, sm, dma, pin, &program),
            frame: [RGB8::default(); N],
        }
    }
}

impl<P: Instance, const S: usize, const N: usize> SmartLedsWrite for Ws2812Strip<'_, P, S, N> {
    type Error = Ws2812Error;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let mut count = 0;
        for color in iterator {
            let slot = self.frame.get_mut(count).ok_or(Ws2812Error::FrameLength)?;
            *slot = color.into();
            count += 1;
        }
        if count != N {
            return Err(Ws2812Error::FrameLength);
        }

        block_on(self.driver.write(&self.frame));
        Ok(())
    }
}
