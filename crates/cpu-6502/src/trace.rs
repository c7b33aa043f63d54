//! Per-instruction trace formatting.
//!
//! Produces nestest.log-compatible lines:
//!
//! ```text
//! C000  4C F5 C5  JMP                         A:00 X:00 Y:00 P:24 SP:FD CYC:7
//! ```
//!
//! Register state is sampled BEFORE the instruction executes. Instruction
//! length and mnemonic come from per-opcode tables, so the operand bytes
//! shown always match what the instruction will consume.

use crate::Mos6502;
use retro_core::Bus;

/// Mnemonic per opcode. Illegal encodings render as `???`.
pub const MNEMONICS: [&str; 256] = [
    /* 0x00 */ "BRK", "ORA", "???", "???", "???", "ORA", "ASL", "???",
    /* 0x08 */ "PHP", "ORA", "ASL", "???", "???", "ORA", "ASL", "???",
    /* 0x10 */ "BPL", "ORA", "???", "???", "???", "ORA", "ASL", "???",
    /* 0x18 */ "CLC", "ORA", "???", "???", "???", "ORA", "ASL", "???",
    /* 0x20 */ "JSR", "AND", "???", "???", "BIT", "AND", "ROL", "???",
    /* 0x28 */ "PLP", "AND", "ROL", "???", "BIT", "AND", "ROL", "???",
    /* 0x30 */ "BMI", "AND", "???", "???", "???", "AND", "ROL", "???",
    /* 0x38 */ "SEC", "AND", "???", "???", "???", "AND", "ROL", "???",
    /* 0x40 */ "RTI", "EOR", "???", "???", "???", "EOR", "LSR", "???",
    /* 0x48 */ "PHA", "EOR", "LSR", "???", "JMP", "EOR", "LSR", "???",
    /* 0x50 */ "BVC", "EOR", "???", "???", "???", "EOR", "LSR", "???",
    /* 0x58 */ "CLI", "EOR", "???", "???", "???", "EOR", "LSR", "???",
    /* 0x60 */ "RTS", "ADC", "???", "???", "???", "ADC", "ROR", "???",
    /* 0x68 */ "PLA", "ADC", "ROR", "???", "JMP", "ADC", "ROR", "???",
    /* 0x70 */ "BVS", "ADC", "???", "???", "???", "ADC", "ROR", "???",
    /* 0x78 */ "SEI", "ADC", "???", "???", "???", "ADC", "ROR", "???",
    /* 0x80 */ "???", "STA", "???", "???", "STY", "STA", "STX", "???",
    /* 0x88 */ "DEY", "???", "TXA", "???", "STY", "STA", "STX", "???",
    /* 0x90 */ "BCC", "STA", "???", "???", "STY", "STA", "STX", "???",
    /* 0x98 */ "TYA", "STA", "TXS", "???", "???", "STA", "???", "???",
    /* 0xA0 */ "LDY", "LDA", "LDX", "???", "LDY", "LDA", "LDX", "???",
    /* 0xA8 */ "TAY", "LDA", "TAX", "???", "LDY", "LDA", "LDX", "???",
    /* 0xB0 */ "BCS", "LDA", "???", "???", "LDY", "LDA", "LDX", "???",
    /* 0xB8 */ "CLV", "LDA", "TSX", "???", "LDY", "LDA", "LDX", "???",
    /* 0xC0 */ "CPY", "CMP", "???", "???", "CPY", "CMP", "DEC", "???",
    /* 0xC8 */ "INY", "CMP", "DEX", "???", "CPY", "CMP", "DEC", "???",
    /* 0xD0 */ "BNE", "CMP", "???", "???", "???", "CMP", "DEC", "???",
    /* 0xD8 */ "CLD", "CMP", "???", "???", "???", "CMP", "DEC", "???",
    /* 0xE0 */ "CPX", "SBC", "???", "???", "CPX", "SBC", "INC", "???",
    /* 0xE8 */ "INX", "SBC", "NOP", "???", "CPX", "SBC", "INC", "???",
    /* 0xF0 */ "BEQ", "SBC", "???", "???", "???", "SBC", "INC", "???",
    /* 0xF8 */ "SED", "SBC", "???", "???", "???", "SBC", "INC", "???",
];

/// Encoded instruction length in bytes per opcode (1-3). BRK is shown as
/// one byte; its padding byte is an execution detail, not an operand.
/// Illegal encodings are listed as 1.
pub const LENGTHS: [u8; 256] = [
    /* 0x00 */ 1, 2, 1, 1, 1, 2, 2, 1, 1, 2, 1, 1, 1, 3, 3, 1,
    /* 0x10 */ 2, 2, 1, 1, 1, 2, 2, 1, 1, 3, 1, 1, 1, 3, 3, 1,
    /* 0x20 */ 3, 2, 1, 1, 2, 2, 2, 1, 1, 2, 1, 1, 3, 3, 3, 1,
    /* 0x30 */ 2, 2, 1, 1, 1, 2, 2, 1, 1, 3, 1, 1, 1, 3, 3, 1,
    /* 0x40 */ 1, 2, 1, 1, 1, 2, 2, 1, 1, 2, 1, 1, 3, 3, 3, 1,
    /* 0x50 */ 2, 2, 1, 1, 1, 2, 2, 1, 1, 3, 1, 1, 1, 3, 3, 1,
    /* 0x60 */ 1, 2, 1, 1, 1, 2, 2, 1, 1, 2, 1, 1, 3, 3, 3, 1,
    /* 0x70 */ 2, 2, 1, 1, 1, 2, 2, 1, 1, 3, 1, 1, 1, 3, 3, 1,
    /* 0x80 */ 1, 2, 1, 1, 2, 2, 2, 1, 1, 1, 1, 1, 3, 3, 3, 1,
    /* 0x90 */ 2, 2, 1, 1, 2, 2, 2, 1, 1, 3, 1, 1, 1, 3, 1, 1,
    /* 0xA0 */ 2, 2, 2, 1, 2, 2, 2, 1, 1, 2, 1, 1, 3, 3, 3, 1,
    /* 0xB0 */ 2, 2, 1, 1, 2, 2, 2, 1, 1, 3, 1, 1, 3, 3, 3, 1,
    /* 0xC0 */ 2, 2, 1, 1, 2, 2, 2, 1, 1, 2, 1, 1, 3, 3, 3, 1,
    /* 0xD0 */ 2, 2, 1, 1, 1, 2, 2, 1, 1, 3, 1, 1, 1, 3, 3, 1,
    /* 0xE0 */ 2, 2, 1, 1, 2, 2, 2, 1, 1, 2, 1, 1, 3, 3, 3, 1,
    /* 0xF0 */ 2, 2, 1, 1, 1, 2, 2, 1, 1, 3, 1, 1, 1, 3, 3, 1,
];

/// Format one trace line for the instruction at the current PC.
///
/// Reads up to two operand bytes through the bus; on a flat RAM bus this
/// has no side effects.
pub fn format_line<B: Bus>(cpu: &Mos6502, bus: &mut B) -> String {
    let pc = cpu.pc();
    let opcode = bus.read(pc);
    let name = MNEMONICS[opcode as usize];
    let len = LENGTHS[opcode as usize];

    let operands = match len {
        2 => format!(" {:02X}    ", bus.read(pc.wrapping_add(1))),
        3 => format!(
            " {:02X} {:02X} ",
            bus.read(pc.wrapping_add(1)),
            bus.read(pc.wrapping_add(2))
        ),
        _ => "       ".to_string(),
    };

    format!(
        "{pc:04X}  {opcode:02X}{operands} {name:<28}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.status(),
        cpu.sp(),
        cpu.cycles()
    )
}
