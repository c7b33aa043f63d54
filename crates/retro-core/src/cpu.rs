//! CPU core trait.

use crate::Bus;

/// A CPU core driven over a [`Bus`].
///
/// `step` executes one instruction and returns the cycles it consumed.
/// Interrupt entry points run their full entry sequence against the bus
/// before returning.
pub trait Cpu<B: Bus> {
    /// Execute one instruction. Returns the number of cycles consumed.
    fn step(&mut self, bus: &mut B) -> u32;

    /// Hardware reset: load PC from the reset vector, reinitialize the
    /// stack pointer and status register.
    fn reset(&mut self, bus: &mut B);

    /// Maskable interrupt request. Ignored while the interrupt-disable
    /// flag is set.
    fn irq(&mut self, bus: &mut B);

    /// Non-maskable interrupt. Always taken.
    fn nmi(&mut self, bus: &mut B);

    /// Current program counter.
    fn pc(&self) -> u16;

    /// True once the CPU has trapped and will execute no further
    /// instructions.
    fn is_halted(&self) -> bool;
}
