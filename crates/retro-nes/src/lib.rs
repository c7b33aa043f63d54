//! NES emulator core (NROM cartridges).
//!
//! The CPU runs instruction-batched against the bus; after each
//! instruction the PPU advances three ticks per CPU cycle. The PPU renders
//! one scanline at a time into a 256×240 ARGB framebuffer and raises NMI
//! at the start of VBlank. A frame is complete when the PPU's frame
//! counter advances.

mod apu;
mod bus;
pub mod capture;
mod cartridge;
mod controller;
pub mod input;
mod nes;
mod palette;
pub mod ppu;

pub use bus::NesBus;
pub use cartridge::{Cartridge, Mirroring};
pub use controller::Controller;
pub use input::{Button, InputScript};
pub use nes::Nes;
