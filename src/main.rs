//! # SLVM
//!
//! Command-line runner for the SLVM virtual machine.

use ansi_term::Style;
use clap::Parser;
use slvm::lang::load;
use slvm::mach::{Event, Halt, Runtime, DEFAULT_CAPACITY};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "slvm", version, about = "A bytecode virtual machine for the SLVM instruction set")]
struct Args {
    /// Program text, one instruction or operand token per line
    input: PathBuf,

    /// Print the decoded instruction tape and exit
    #[arg(short, long)]
    dump: bool,

    /// Print drained graphics commands after the program halts
    #[arg(short, long)]
    graphics: bool,

    /// Arena capacity in cells
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    memory: usize,
}

fn main() {
    let args = Args::parse();
    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Could not open file: {}: {}", args.input.display(), error);
            std::process::exit(1);
        }
    };
    let tape = load(&source);
    if args.dump {
        print!("{}", tape);
        return;
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let mut runtime = Runtime::with_capacity(tape, args.memory);
    let mut stdout = std::io::stdout();
    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        }
        match runtime.execute(5000) {
            Event::Stopped => break,
            Event::Running => {}
            Event::Print(s) => {
                let _ = stdout.write_all(s.as_bytes());
                let _ = stdout.flush();
            }
            Event::Sleep(duration) => std::thread::sleep(duration),
            Event::Errors(errors) => {
                for error in errors.iter() {
                    eprintln!("{}", Style::new().bold().paint(error.to_string()));
                }
            }
        }
    }

    if args.graphics {
        while let Some(command) = runtime.graphics_mut().pop() {
            println!("{}", command);
        }
    }

    match runtime.halt() {
        Some(Halt::Completed) => {}
        _ => std::process::exit(1),
    }
}
