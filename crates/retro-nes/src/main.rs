//! Headless NES runner.
//!
//! Loads an iNES ROM, runs a number of frames, and optionally writes the
//! final framebuffer (or every frame) as PNG. This is the framebuffer
//! sink for scripted runs and regression captures; interactive frontends
//! live elsewhere.

use std::path::PathBuf;
use std::process;

use retro_nes::{capture, Nes};

struct CliArgs {
    rom_path: Option<PathBuf>,
    frames: u32,
    screenshot_path: Option<PathBuf>,
    record_dir: Option<PathBuf>,
}

fn print_usage() {
    eprintln!(
        "Usage: retro-nes --rom <file.nes> [--frames N] [--screenshot out.png] [--record dir]\n\
         \x20 --rom <file.nes>      iNES ROM to run (mapper 0)\n\
         \x20 --frames N            Frames to emulate (default: 60)\n\
         \x20 --screenshot out.png  Write the final framebuffer as PNG\n\
         \x20 --record dir          Write every frame under dir/frames/"
    );
}

fn parse_args() -> Option<CliArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        rom_path: None,
        frames: 60,
        screenshot_path: None,
        record_dir: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rom" => {
                i += 1;
                cli.rom_path = args.get(i).map(PathBuf::from);
            }
            "--frames" => {
                i += 1;
                cli.frames = args.get(i)?.parse().ok()?;
            }
            "--screenshot" => {
                i += 1;
                cli.screenshot_path = args.get(i).map(PathBuf::from);
            }
            "--record" => {
                i += 1;
                cli.record_dir = args.get(i).map(PathBuf::from);
            }
            _ => return None,
        }
        i += 1;
    }

    Some(cli)
}

fn main() {
    let Some(cli) = parse_args() else {
        print_usage();
        process::exit(1);
    };
    let Some(rom_path) = cli.rom_path else {
        print_usage();
        process::exit(1);
    };

    let rom_data = match std::fs::read(&rom_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("cannot open '{}': {e}", rom_path.display());
            process::exit(1);
        }
    };

    let mut nes = match Nes::new(&rom_data) {
        Ok(nes) => nes,
        Err(e) => {
            eprintln!("cannot load '{}': {e}", rom_path.display());
            process::exit(1);
        }
    };

    if let Some(dir) = cli.record_dir {
        if let Err(e) = capture::record(&mut nes, &dir, cli.frames) {
            eprintln!("recording failed: {e}");
            process::exit(1);
        }
    } else {
        for _ in 0..cli.frames {
            nes.step_frame();
            if nes.is_halted() {
                eprintln!(
                    "CPU halted at ${:04X} after frame {}",
                    nes.cpu().pc(),
                    nes.frame_count()
                );
                break;
            }
        }
    }

    if let Some(path) = cli.screenshot_path {
        if let Err(e) = capture::save_screenshot(&nes, &path) {
            eprintln!("screenshot failed: {e}");
            process::exit(1);
        }
        println!("screenshot written to {}", path.display());
    }

    println!(
        "ran {} frames, CPU at ${:04X} after {} cycles",
        nes.frame_count(),
        nes.cpu().pc(),
        nes.cpu().cycles()
    );
}
