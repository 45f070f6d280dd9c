/*!
## Rust Machine Module

This Rust module is the SLVM virtual machine: the instruction catalog,
the cell arena with its first-fit allocator, the variable table, the
graphics command queue, and the accumulator engine that executes an
instruction tape.

*/

pub type Address = usize;

mod arena;
mod graphics;
mod opcode;
mod runtime;
mod stack;
mod tape;
mod val;
mod var;

#[cfg(test)]
mod tests;

pub use arena::Arena;
pub use arena::Extent;
pub use graphics::Graphics;
pub use graphics::GraphicsCommand;
pub use opcode::Opcode;
pub use runtime::Event;
pub use runtime::Halt;
pub use runtime::Runtime;
pub use runtime::DEFAULT_CAPACITY;
pub use stack::Stack;
pub use tape::Tape;
pub use val::Val;
pub use var::Var;
