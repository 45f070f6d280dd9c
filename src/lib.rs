//! # SLVM
//!
//! A virtual machine for the SLVM bytecode: a flat instruction tape
//! executed by a single accumulator-centric engine that owns a fixed
//! address space of tagged value cells, a first-fit allocator over that
//! space, a call stack, and a queue of drawing commands for an external
//! renderer.
//!
//! Run a program with the `slvm` binary:
//! ```text
//! slvm program.slvm.txt
//! ```
//!
//! Or embed the engine:
//! ```no_run
//! use slvm::lang::load;
//! use slvm::mach::{Event, Runtime};
//!
//! let mut runtime = Runtime::new(load("ldi\nhello\nprintln\ndone"));
//! loop {
//!     match runtime.execute(5000) {
//!         Event::Stopped => break,
//!         Event::Print(s) => print!("{}", s),
//!         Event::Sleep(d) => std::thread::sleep(d),
//!         Event::Errors(errors) => {
//!             for error in errors.iter() {
//!                 eprintln!("{}", error);
//!             }
//!         }
//!         Event::Running => {}
//!     }
//! }
//! ```

pub mod lang;
pub mod mach;
