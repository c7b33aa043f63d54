//! Whole-system tests over hand-assembled NROM images.
//!
//! Each test builds an iNES byte array in memory (header + 32K PRG + 8K
//! CHR), boots it through the reset vector, and asserts on CPU state and
//! framebuffer contents after a few frames.

use retro_nes::Nes;

const PRG_SIZE: usize = 32 * 1024;
const CHR_SIZE: usize = 8 * 1024;

/// Wrap 32K of PRG and 8K of CHR in an iNES container (mapper 0,
/// horizontal mirroring), with vectors patched in.
fn build_rom(code: &[u8], chr_tiles: &[[u8; 8]], nmi_handler: Option<u16>) -> Vec<u8> {
    let mut rom = vec![0u8; 16 + PRG_SIZE + CHR_SIZE];
    rom[0..4].copy_from_slice(b"NES\x1a");
    rom[4] = 2; // 2 x 16K PRG
    rom[5] = 1; // 1 x 8K CHR
    rom[6] = 0;
    rom[7] = 0;

    // Code at $8000 (start of PRG)
    rom[16..16 + code.len()].copy_from_slice(code);

    // Vectors: reset → $8000; NMI/IRQ → handler or an RTI stashed at $9000
    let rti_addr: u16 = match nmi_handler {
        Some(addr) => addr,
        None => {
            rom[16 + 0x1000] = 0x40; // RTI at $9000
            0x9000
        }
    };
    rom[16 + 0x7FFC] = 0x00;
    rom[16 + 0x7FFD] = 0x80;
    rom[16 + 0x7FFA] = rti_addr as u8;
    rom[16 + 0x7FFB] = (rti_addr >> 8) as u8;
    rom[16 + 0x7FFE] = rti_addr as u8;
    rom[16 + 0x7FFF] = (rti_addr >> 8) as u8;

    // CHR tiles: 8 bytes of bitplane 0 each, bitplane 1 left zero, so set
    // pixels use color index 1
    for (i, tile) in chr_tiles.iter().enumerate() {
        let base = 16 + PRG_SIZE + i * 16;
        rom[base..base + 8].copy_from_slice(tile);
    }

    rom
}

#[test]
fn boots_and_polls_vblank() {
    // Standard init: SEI/CLD/stack setup, two VBlank waits, then an idle
    // loop. Reaching the idle loop proves the reset vector, $2002
    // polling, and NMI-less frame progression all work.
    let code: &[u8] = &[
        0x78, // SEI
        0xD8, // CLD
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        // VBlank wait 1
        0xAD, 0x02, 0x20, // $8005: LDA $2002
        0x10, 0xFB, //       BPL $8005
        // VBlank wait 2
        0xAD, 0x02, 0x20, // $800A: LDA $2002
        0x10, 0xFB, //       BPL $800A
        // Idle
        0x4C, 0x0F, 0x80, // $800F: JMP $800F
    ];
    let rom = build_rom(code, &[], None);
    let mut nes = Nes::new(&rom).expect("ROM should parse");

    assert_eq!(nes.cpu().pc(), 0x8000, "reset vector should point to $8000");

    for _ in 0..5 {
        nes.step_frame();
        if nes.cpu().pc() == 0x800F {
            break;
        }
    }
    assert!(!nes.is_halted());
    // The idle JMP is 3 bytes; PC may be sampled mid-instruction
    let pc = nes.cpu().pc();
    assert!(
        (0x800F..=0x8011).contains(&pc),
        "did not reach idle loop, PC=${pc:04X}"
    );
}

#[test]
fn renders_background_tiles() {
    // Init → wait for VBlank → write palette ($3F00) and one nametable
    // tile ($2000) through $2006/$2007 → reset scroll → enable rendering
    // → idle. Then inspect the framebuffer.
    let code: &[u8] = &[
        0x78, // SEI
        0xD8, // CLD
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        // Rendering off during setup
        0xA9, 0x00, // LDA #$00
        0x8D, 0x01, 0x20, // STA $2001
        // VBlank wait x2
        0xAD, 0x02, 0x20, // $800A: LDA $2002
        0x10, 0xFB, //       BPL $800A
        0xAD, 0x02, 0x20, // $800F: LDA $2002
        0x10, 0xFB, //       BPL $800F
        // Palette at $3F00: universal = $0F, color 1 = $30
        0xAD, 0x02, 0x20, // LDA $2002 (reset address latch)
        0xA9, 0x3F, // LDA #$3F
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x00, // LDA #$00
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x0F, // LDA #$0F
        0x8D, 0x07, 0x20, // STA $2007
        0xA9, 0x30, // LDA #$30
        0x8D, 0x07, 0x20, // STA $2007
        // Nametable (0,0) = tile 1
        0xA9, 0x20, // LDA #$20
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x00, // LDA #$00
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x01, // LDA #$01
        0x8D, 0x07, 0x20, // STA $2007
        // Scroll = (0, 0)
        0xA9, 0x00, // LDA #$00
        0x8D, 0x05, 0x20, // STA $2005
        0x8D, 0x05, 0x20, // STA $2005
        // Enable BG + sprites, no left clipping
        0xA9, 0x1E, // LDA #$1E
        0x8D, 0x01, 0x20, // STA $2001
        // Idle
        0x4C, 0x47, 0x80, // $8047: JMP $8047
    ];

    // Tile 0 blank; tile 1 solid (all bitplane-0 bits set)
    let tiles = [[0u8; 8], [0xFFu8; 8]];
    let rom = build_rom(code, &tiles, None);
    let mut nes = Nes::new(&rom).expect("ROM should parse");

    for _ in 0..6 {
        nes.step_frame();
    }
    assert!(!nes.is_halted());

    let fb = nes.framebuffer();
    // Tile (0,0) is solid color 1 → palette $30 (white-ish)
    assert_eq!(fb[0], 0xFFFF_FFFF, "tile pixel: got {:08X}", fb[0]);
    assert_eq!(fb[7], 0xFFFF_FFFF);
    // Tile (1,0) is blank → universal background $0F (black)
    assert_eq!(fb[8], 0xFF00_0000, "background pixel: got {:08X}", fb[8]);
    // Row 8 is below the tile → background
    assert_eq!(fb[8 * 256], 0xFF00_0000);
}

#[test]
fn nmi_handler_runs_when_enabled() {
    // Init → enable NMI (PPUCTRL bit 7) → idle. The NMI handler
    // increments $0010 and returns; after a few frames the counter
    // proves VBlank NMIs are delivered once per frame.
    let code: &[u8] = &[
        0x78, // SEI
        0xD8, // CLD
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        0xA9, 0x00, // LDA #$00
        0x85, 0x10, // STA $10
        0xA9, 0x80, // LDA #$80
        0x8D, 0x00, 0x20, // STA $2000 (NMI on)
        0x4C, 0x0E, 0x80, // $800E: JMP $800E
    ];

    // NMI handler at $8100: INC $10, RTI
    let mut full_code = vec![0u8; 0x110];
    full_code[..code.len()].copy_from_slice(code);
    full_code[0x100] = 0xE6; // INC $10
    full_code[0x101] = 0x10;
    full_code[0x102] = 0x40; // RTI

    let rom = build_rom(&full_code, &[], Some(0x8100));
    let mut nes = Nes::new(&rom).expect("ROM should parse");

    for _ in 0..4 {
        nes.step_frame();
    }
    assert!(!nes.is_halted());

    let count = nes.bus().peek_ram(0x0010);
    // Four frames → four VBlanks; the first may land before NMI is
    // enabled
    assert!((3..=4).contains(&count), "NMI count: {count}");
}

#[test]
fn rejects_non_ines_data() {
    assert!(Nes::new(b"definitely not a rom").is_err());
}
