//! Standalone 6502 driver.
//!
//! Loads a raw 6502 binary into a flat 64 KiB RAM, resets the CPU, and
//! runs until the CPU halts, traps (an instruction leaves PC unchanged,
//! e.g. `JMP *`), or the cycle limit is reached. Useful for running CPU
//! test suites such as Klaus Dormann's functional tests.
//!
//! Usage: `run6502 [-v] <binary> [base_addr] [start_addr]`
//! with addresses in hex. `-v` prints a per-instruction trace.

use std::process;

use cpu_6502::{trace, Mos6502};
use retro_core::{Cpu, FlatBus};

const CYCLE_LIMIT: u64 = 100_000_000;

struct Args {
    verbose: bool,
    binary_path: String,
    base_addr: u16,
    start_addr: Option<u16>,
}

fn print_usage(prog: &str) {
    eprintln!(
        "Usage: {prog} [-v] <binary> [base_addr] [start_addr]\n\
         \x20 binary      Path to 6502 binary file\n\
         \x20 base_addr   Load address in hex (default: 0000)\n\
         \x20 start_addr  Override PC in hex (default: read reset vector)\n\
         \x20 -v          Verbose per-instruction trace"
    );
}

fn parse_hex_addr(s: &str) -> Result<u16, String> {
    let value =
        u32::from_str_radix(s, 16).map_err(|_| format!("'{s}' is not a hex address"))?;
    if value > 0xFFFF {
        return Err(format!("address {value:X} exceeds 16-bit range"));
    }
    Ok(value as u16)
}

fn parse_args() -> Result<Args, String> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let verbose = args.first().is_some_and(|a| a == "-v");
    if verbose {
        args.remove(0);
    }

    if args.is_empty() || args.len() > 3 {
        return Err(String::new());
    }

    let binary_path = args[0].clone();
    let base_addr = match args.get(1) {
        Some(s) => parse_hex_addr(s)?,
        None => 0x0000,
    };
    let start_addr = match args.get(2) {
        Some(s) => Some(parse_hex_addr(s)?),
        None => None,
    };

    Ok(Args {
        verbose,
        binary_path,
        base_addr,
        start_addr,
    })
}

/// Register dump with a readable flag field, e.g. `[Nv-bdIzC]`.
fn print_registers(cpu: &Mos6502) {
    let p = cpu.status();
    let flag = |bit: u8, ch: char| {
        if p & (1 << bit) != 0 {
            ch.to_ascii_uppercase()
        } else {
            ch
        }
    };
    println!(
        "A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} PC:{:04X} P:{:02X} [{}{}-{}{}{}{}{}] CYC:{}",
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.pc(),
        p,
        flag(7, 'n'),
        flag(6, 'v'),
        flag(4, 'b'),
        flag(3, 'd'),
        flag(2, 'i'),
        flag(1, 'z'),
        flag(0, 'c'),
        cpu.cycles()
    );
}

fn main() {
    let prog = std::env::args().next().unwrap_or_else(|| "run6502".into());
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("Error: {msg}");
            }
            print_usage(&prog);
            process::exit(1);
        }
    };

    let data = match std::fs::read(&args.binary_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("cannot open '{}': {e}", args.binary_path);
            process::exit(1);
        }
    };

    let mut bus = FlatBus::new();
    if let Err(e) = bus.load(args.base_addr, &data) {
        eprintln!("cannot load '{}': {e}", args.binary_path);
        process::exit(1);
    }

    let mut cpu = Mos6502::new();
    cpu.reset(&mut bus);
    if let Some(start) = args.start_addr {
        cpu.set_pc(start);
    }

    println!(
        "Loaded '{}' at ${:04X}, PC=${:04X}",
        args.binary_path,
        args.base_addr,
        cpu.pc()
    );

    while !cpu.is_halted() && cpu.cycles() < CYCLE_LIMIT {
        let prev_pc = cpu.pc();

        if args.verbose {
            println!("{}", trace::format_line(&cpu, &mut bus));
        }

        cpu.step(&mut bus);

        // Trap: the instruction jumped to itself
        if cpu.pc() == prev_pc {
            println!("Trap detected at ${:04X}", cpu.pc());
            break;
        }
    }

    if cpu.cycles() >= CYCLE_LIMIT {
        println!("Cycle limit reached ({CYCLE_LIMIT} cycles)");
    }
    if cpu.is_halted() {
        println!("CPU halted");
    }

    println!("\nFinal state:");
    print_registers(&cpu);
}
