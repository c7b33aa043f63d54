//! Top-level NES system.
//!
//! Drives the CPU and PPU at the NTSC 3:1 PPU:CPU ratio, instruction
//! batched: one CPU instruction executes, then the PPU runs three ticks
//! per cycle the instruction took, with any VBlank NMI delivered inline
//! before the next instruction. One frame is ~29 780 CPU cycles
//! (89 342 PPU cycles).

use cpu_6502::Mos6502;
use retro_core::{Bus, Cpu};

use crate::bus::NesBus;
use crate::cartridge::Cartridge;
use crate::input::InputScript;

/// PPU ticks per CPU cycle.
const PPU_TICKS_PER_CPU_CYCLE: u32 = 3;
/// CPU cycles consumed by an OAM DMA transfer.
const OAM_DMA_CPU_CYCLES: u64 = 514;
/// PPU ticks elapsing during an OAM DMA transfer.
const OAM_DMA_PPU_TICKS: u32 = 1542;

/// NES system: CPU, bus (RAM, PPU, APU, cartridge, controllers), and the
/// frame-scripted input schedule.
pub struct Nes {
    cpu: Mos6502,
    bus: NesBus,
    input_script: InputScript,
}

impl Nes {
    /// Build a system from an iNES image and run the CPU reset sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the ROM image is not a valid mapper-0 iNES
    /// file.
    pub fn new(rom: &[u8]) -> Result<Self, String> {
        let cartridge = Cartridge::from_ines(rom)?;
        Ok(Self::with_cartridge(cartridge))
    }

    /// Build a system from a pre-built cartridge.
    #[must_use]
    pub fn with_cartridge(cartridge: Cartridge) -> Self {
        let mut bus = NesBus::new(cartridge);
        let mut cpu = Mos6502::new();
        cpu.reset(&mut bus);
        Self {
            cpu,
            bus,
            input_script: InputScript::new(),
        }
    }

    /// Run emulation until the PPU finishes the current frame.
    ///
    /// Applies scheduled input changes first. Returns early if the CPU
    /// halts (illegal opcode); callers observe [`Self::is_halted`].
    pub fn step_frame(&mut self) {
        self.input_script
            .apply(self.bus.ppu.frame(), &mut self.bus.controller1);

        let start_frame = self.bus.ppu.frame();
        while self.bus.ppu.frame() == start_frame {
            if self.cpu.is_halted() {
                break;
            }

            if self.bus.oam_dma_page.is_some() {
                self.run_oam_dma();
            } else {
                let cycles = self.cpu.step(&mut self.bus);
                self.run_ppu(cycles * PPU_TICKS_PER_CPU_CYCLE);
            }
        }
    }

    /// OAM DMA: copy 256 bytes from the selected CPU page into OAM
    /// through the live bus, then charge the DMA stall to both clocks.
    fn run_oam_dma(&mut self) {
        let page = self.bus.oam_dma_page.take().unwrap_or(0);
        let base = u16::from(page) << 8;
        for i in 0..256u16 {
            let byte = self.bus.read(base | i);
            self.bus.ppu.write_oam(i as u8, byte);
        }
        self.run_ppu(OAM_DMA_PPU_TICKS);
        self.cpu.add_cycles(OAM_DMA_CPU_CYCLES);
    }

    /// Advance the PPU, delivering NMIs to the CPU inline.
    fn run_ppu(&mut self, ticks: u32) {
        for _ in 0..ticks {
            if self.bus.ppu.tick(&self.bus.cartridge) {
                self.cpu.nmi(&mut self.bus);
            }
        }
    }

    /// Set the live button byte for a controller port (0 or 1).
    /// Bit layout: A=$01, B=$02, Select=$04, Start=$08, Up=$10, Down=$20,
    /// Left=$40, Right=$80.
    pub fn set_controller(&mut self, port: usize, buttons: u8) {
        match port {
            0 => self.bus.controller1.set_buttons(buttons),
            1 => self.bus.controller2.set_buttons(buttons),
            _ => {}
        }
    }

    /// The input script (changes apply to controller 1).
    pub fn input_script(&mut self) -> &mut InputScript {
        &mut self.input_script
    }

    /// The 256×240 ARGB framebuffer, complete for the last finished
    /// frame.
    #[must_use]
    pub fn framebuffer(&self) -> &[u32] {
        self.bus.ppu.framebuffer()
    }

    /// Completed frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu.frame()
    }

    /// True once the CPU has trapped on an illegal opcode.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }

    #[must_use]
    pub fn cpu(&self) -> &Mos6502 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Mos6502 {
        &mut self.cpu
    }

    #[must_use]
    pub fn bus(&self) -> &NesBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut NesBus {
        &mut self.bus
    }
}
