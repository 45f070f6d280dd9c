/*!
# Rust Language Module

This Rust module turns SLVM program text into the instruction tape
consumed by the machine module, and defines the error type shared by
the loader and the virtual machine.

*/

#[macro_use]
mod error;
mod load;

pub use error::Error;
pub use error::ErrorCode;
pub use load::load;
