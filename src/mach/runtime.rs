use super::{Address, Arena, Graphics, GraphicsCommand, Opcode, Stack, Tape, Val, Var};
use crate::error;
use crate::lang::Error;
use std::rc::Rc;
use std::time::Duration;

type Result<T> = std::result::Result<T, Error>;

/// Arena capacity, in cells, when none is given.
pub const DEFAULT_CAPACITY: usize = 0x10000;

/// Why the machine stopped. Every reason is fatal to the instance:
/// the machine halts and reports, it never unwinds past a step and
/// never retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// Tape exhausted, explicit `done`, or operator interrupt.
    Completed,
    /// The slot's token decoded to no catalog entry.
    UnknownOpcode,
    /// The catalog entry has no semantics.
    UnimplementedOpcode,
    /// The allocator could not satisfy a request.
    OutOfMemory,
    /// `ret` with no matching `jts`.
    CallStackUnderflow,
    /// A computed cell address left the arena.
    AddressOutOfRange,
    /// Truncated operand list or an impossible state.
    InternalError,
}

impl From<&Error> for Halt {
    fn from(error: &Error) -> Halt {
        use crate::lang::ErrorCode::*;
        match error.code() {
            c if c == UnknownOpcode as u16 => Halt::UnknownOpcode,
            c if c == UnimplementedOpcode as u16 => Halt::UnimplementedOpcode,
            c if c == OutOfMemory as u16 => Halt::OutOfMemory,
            c if c == CallStackUnderflow as u16 => Halt::CallStackUnderflow,
            c if c == AddressOutOfRange as u16 => Halt::AddressOutOfRange,
            _ => Halt::InternalError,
        }
    }
}

/// What the driver loop gets back from a burst of execution.
#[derive(Debug)]
pub enum Event {
    /// Cycle budget exhausted; call `execute` again.
    Running,
    /// The machine has halted; see [`Runtime::halt`].
    Stopped,
    /// Text for the line-oriented sink. `println` output carries its
    /// own terminator.
    Print(String),
    /// The program asked for a blocking wait. The driver performs it;
    /// nothing else proceeds meanwhile.
    Sleep(Duration),
    /// Fatal halt with diagnostics.
    Errors(Vec<Error>),
}

fn truth(n: f64) -> bool {
    n != 0.0
}

/// ## The SLVM machine
///
/// Owns the instruction pointer, the accumulator cell, the cell arena,
/// the variable table, the call stack, the (reserved) data stack, and
/// the graphics queue. One `Runtime` instance, one program: nothing
/// outside the machine mutates this state and no step is preempted.
pub struct Runtime {
    tape: Tape,
    ip: Address,
    acc: Val,
    arena: Arena,
    vars: Var,
    call_stack: Stack<Address>,
    /// Reserved for the stack-arithmetic catalog entries.
    #[allow(dead_code)]
    data_stack: Stack<Val>,
    graphics: Graphics,
    halt: Option<Halt>,
}

impl Runtime {
    pub fn new(tape: Tape) -> Runtime {
        Runtime::with_capacity(tape, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(tape: Tape, capacity: usize) -> Runtime {
        Runtime {
            tape,
            ip: 0,
            acc: Val::default(),
            arena: Arena::new(capacity),
            vars: Var::new(),
            call_stack: Stack::new("CALL STACK OVERFLOW"),
            data_stack: Stack::new("DATA STACK OVERFLOW"),
            graphics: Graphics::new(),
            halt: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.halt.is_none()
    }

    pub fn halt(&self) -> Option<Halt> {
        self.halt
    }

    pub fn accumulator(&self) -> &Val {
        &self.acc
    }

    pub fn graphics(&self) -> &Graphics {
        &self.graphics
    }

    /// Consumer side of the command queue, for the external renderer.
    pub fn graphics_mut(&mut self) -> &mut Graphics {
        &mut self.graphics
    }

    /// Operator break. The machine reports `Completed` on the next
    /// `execute` call.
    pub fn interrupt(&mut self) {
        self.halt = Some(Halt::Completed);
    }

    /// Run up to `cycles` fetch-decode-execute steps. Returns early
    /// with the first event the program produces.
    pub fn execute(&mut self, cycles: usize) -> Event {
        for _ in 0..cycles {
            if self.halt.is_some() {
                return Event::Stopped;
            }
            match self.step() {
                Ok(Some(event)) => return event,
                Ok(None) => {}
                Err(error) => {
                    self.halt = Some(Halt::from(&error));
                    return Event::Errors(vec![error]);
                }
            }
        }
        Event::Running
    }

    fn step(&mut self) -> Result<Option<Event>> {
        if self.ip >= self.tape.len() {
            self.halt = Some(Halt::Completed);
            return Ok(Some(Event::Stopped));
        }
        let token = self.token(self.ip)?;
        let opcode = match self.tape.opcode(self.ip) {
            Some(opcode) => opcode,
            None => return Err(error!(UnknownOpcode, self.ip, ..&token)),
        };
        if !opcode.is_implemented() {
            return Err(
                error!(UnimplementedOpcode, self.ip, ..&token; "CATALOG ENTRY HAS NO SEMANTICS"),
            );
        }
        let (next, event) = self.exec(opcode)?;
        self.ip = next;
        Ok(event)
    }

    /// One handler per opcode. Every arm returns the index of the next
    /// instruction to execute; the engine applies no increment of its
    /// own, so control transfers and operand consumption are explicit
    /// here and nowhere else.
    fn exec(&mut self, opcode: Opcode) -> Result<(Address, Option<Event>)> {
        use Opcode::*;
        let ip = self.ip;
        match opcode {
            Ldi => {
                let token = self.operand(1)?;
                self.acc = Val::Text(token.to_string());
                Ok((ip + 2, None))
            }
            LoadAtVar => {
                let addr = self.operand_address(1)?;
                self.acc = self.arena.fetch(addr)?;
                Ok((ip + 2, None))
            }
            StoreAtVar => {
                let addr = self.operand_address(1)?;
                self.arena.store(addr, self.acc.clone())?;
                Ok((ip + 2, None))
            }
            Jts => {
                let target = self.target(1)?;
                self.call_stack.push(ip + 2)?;
                Ok((target, None))
            }
            Ret => {
                if self.call_stack.is_empty() {
                    return Err(error!(CallStackUnderflow, ip));
                }
                Ok((self.call_stack.pop()?, None))
            }

            AddWithVar => self.arith(|l, r| l + r),
            SubWithVar => self.arith(|l, r| l - r),
            MulWithVar => self.arith(|l, r| l * r),
            DivWithVar => self.arith(|l, r| l / r),
            BitwiseLsfWithVar => self.arith_int(|l, r| l.wrapping_shl(r as u32)),
            BitwiseRsfWithVar => self.arith_int(|l, r| l.wrapping_shr(r as u32)),
            BitwiseAndWithVar => self.arith_int(|l, r| l & r),
            BitwiseOrWithVar => self.arith_int(|l, r| l | r),
            ModWithVar => self.arith_int(|l, r| if r == 0 { 0 } else { l % r }),

            Print => Ok((ip + 1, Some(Event::Print(self.acc.text())))),
            Println => Ok((ip + 1, Some(Event::Print(format!("{}\n", self.acc.text()))))),

            Jmp => Ok((self.target(1)?, None)),
            Jt => {
                let target = self.target(1)?;
                if truth(self.acc.number()) {
                    Ok((target, None))
                } else {
                    Ok((ip + 2, None))
                }
            }
            Jf => {
                let target = self.target(1)?;
                if truth(self.acc.number()) {
                    Ok((ip + 2, None))
                } else {
                    Ok((target, None))
                }
            }

            BoolAndWithVar => self.relational(|l, r| truth(l) && truth(r)),
            BoolOrWithVar => self.relational(|l, r| truth(l) || truth(r)),
            BoolEqualWithVar => self.relational(|l, r| l == r),
            BoolNotEqualWithVar => self.relational(|l, r| l != r),
            LargerThanOrEqualWithVar => self.relational(|l, r| l >= r),
            SmallerThanOrEqualWithVar => self.relational(|l, r| l <= r),
            SmallerThanWithVar => self.relational(|l, r| l < r),
            LargerThanWithVar => self.relational(|l, r| l > r),

            PutPixel => {
                let x = self.operand_i32(1)?;
                let y = self.operand_i32(2)?;
                self.graphics.enqueue(GraphicsCommand::PutPixel { x, y });
                Ok((ip + 3, None))
            }
            PutLine => {
                let x0 = self.operand_i32(1)?;
                let y0 = self.operand_i32(2)?;
                let x1 = self.operand_i32(3)?;
                let y1 = self.operand_i32(4)?;
                self.graphics
                    .enqueue(GraphicsCommand::PutLine { x0, y0, x1, y1 });
                Ok((ip + 5, None))
            }
            PutRect => {
                let x = self.operand_i32(1)?;
                let y = self.operand_i32(2)?;
                let width = self.operand_i32(3)?;
                let height = self.operand_i32(4)?;
                self.graphics.enqueue(GraphicsCommand::PutRect {
                    x,
                    y,
                    width,
                    height,
                });
                Ok((ip + 5, None))
            }
            SetColor => {
                let color = self.operand_number(1)? as u32;
                self.graphics.enqueue(GraphicsCommand::SetColor(color));
                Ok((ip + 2, None))
            }
            Clg => {
                // Pending commands are dropped undelivered; the
                // renderer still needs to wipe the surface.
                self.graphics.drain_all();
                self.graphics.enqueue(GraphicsCommand::Clear);
                Ok((ip + 1, None))
            }

            Done => {
                self.halt = Some(Halt::Completed);
                Ok((ip + 1, Some(Event::Stopped)))
            }
            Malloc => {
                let size = self.operand_number(1)?.max(0.0) as usize;
                match self.arena.allocate(size) {
                    Some(addr) => {
                        self.acc = Val::Number(addr as f64);
                        Ok((ip + 2, None))
                    }
                    None => Err(error!(OutOfMemory, ip; "ARENA EXHAUSTED")),
                }
            }

            Round => self.rounded(f64::round),
            Floor => self.rounded(f64::floor),
            Ceil => self.rounded(f64::ceil),
            Cos => self.unary_math(f64::cos),
            Sin => self.unary_math(f64::sin),
            Sqrt => self.unary_math(f64::sqrt),
            Atan2 => {
                let y = self.operand_number(1)?;
                let x = self.operand_number(2)?;
                self.acc = Val::Number(y.atan2(x));
                Ok((ip + 3, None))
            }

            Sleep => {
                let millis = self.operand_number(1)?;
                let duration = if millis.is_finite() && millis > 0.0 {
                    Duration::from_secs_f64(millis / 1000.0)
                } else {
                    Duration::ZERO
                };
                Ok((ip + 2, Some(Event::Sleep(duration))))
            }
            DrawText => {
                self.graphics
                    .enqueue(GraphicsCommand::DrawText(self.acc.text()));
                Ok((ip + 1, None))
            }

            LoadAtVarWithOffset => {
                let addr = self.offset_address()?;
                self.acc = self.arena.fetch(addr).map_err(|e| e.at_address(ip))?;
                Ok((ip + 3, None))
            }
            StoreAtVarWithOffset => {
                let addr = self.offset_address()?;
                self.arena
                    .store(addr, self.acc.clone())
                    .map_err(|e| e.at_address(ip))?;
                Ok((ip + 3, None))
            }

            CharAt => {
                let text = self.operand_val(1)?.text();
                let index = self.operand_number(2)?;
                self.acc = Val::Text(if index >= 0.0 {
                    text.chars()
                        .nth(index as usize)
                        .map(String::from)
                        .unwrap_or_default()
                } else {
                    String::new()
                });
                Ok((ip + 3, None))
            }
            SizeOf => {
                let text = self.operand_val(1)?.text();
                self.acc = Val::Number(text.chars().count() as f64);
                Ok((ip + 2, None))
            }
            Contains => {
                let haystack = self.operand_val(1)?.text();
                let needle = self.operand_val(2)?.text();
                self.acc = Val::Number(if haystack.contains(&needle) { 1.0 } else { 0.0 });
                Ok((ip + 3, None))
            }

            // step() rejects catalog entries without semantics.
            _ => Err(error!(InternalError, ip; "DISPATCH PAST CATALOG")),
        }
    }

    fn token(&self, addr: Address) -> Result<Rc<str>> {
        match self.tape.token(addr) {
            Some(token) => Ok(token.clone()),
            None => Err(error!(InternalError, self.ip; "OPERAND PAST END OF TAPE")),
        }
    }

    /// Token in the `slot`th operand position.
    fn operand(&self, slot: usize) -> Result<Rc<str>> {
        self.token(self.ip + slot)
    }

    /// Cell address of the variable named by an operand, creating the
    /// variable on first reference.
    fn operand_address(&mut self, slot: usize) -> Result<Address> {
        let name = self.operand(slot)?;
        match self.vars.address(&name, &mut self.arena) {
            Some(addr) => Ok(addr),
            None => Err(error!(OutOfMemory, self.ip, ..&name; "NO CELL FOR NEW VARIABLE")),
        }
    }

    fn operand_val(&mut self, slot: usize) -> Result<Val> {
        let addr = self.operand_address(slot)?;
        self.arena.fetch(addr)
    }

    fn operand_number(&mut self, slot: usize) -> Result<f64> {
        Ok(self.operand_val(slot)?.number())
    }

    fn operand_i32(&mut self, slot: usize) -> Result<i32> {
        Ok(self.operand_number(slot)? as i32)
    }

    /// Branch target literal: coerced like any numeric text, clamped
    /// at zero, and taken as an exact tape index.
    fn target(&self, slot: usize) -> Result<Address> {
        let token = self.operand(slot)?;
        Ok(Val::number_from_text(&token).max(0.0) as usize)
    }

    /// Base variable's address plus the offset variable's numeric
    /// value. A negative result is out of range before the arena ever
    /// sees it.
    fn offset_address(&mut self) -> Result<Address> {
        let base = self.operand_address(1)? as i64;
        let offset = self.operand_number(2)? as i64;
        let addr = base + offset;
        if addr < 0 {
            return Err(error!(AddressOutOfRange, self.ip));
        }
        Ok(addr as usize)
    }

    fn arith(&mut self, f: impl Fn(f64, f64) -> f64) -> Result<(Address, Option<Event>)> {
        let rhs = self.operand_number(1)?;
        self.acc = Val::Number(f(self.acc.number(), rhs));
        Ok((self.ip + 2, None))
    }

    /// Shift, bitwise, and modulo coerce both operands to integer
    /// first. Shift amounts are taken modulo 64; modulo by zero is
    /// zero.
    fn arith_int(&mut self, f: impl Fn(i64, i64) -> i64) -> Result<(Address, Option<Event>)> {
        let rhs = self.operand_number(1)? as i64;
        let lhs = self.acc.number() as i64;
        self.acc = Val::Number(f(lhs, rhs) as f64);
        Ok((self.ip + 2, None))
    }

    /// Numeric comparison into the accumulator as 1 or 0.
    fn relational(&mut self, f: impl Fn(f64, f64) -> bool) -> Result<(Address, Option<Event>)> {
        let rhs = self.operand_number(1)?;
        let lhs = self.acc.number();
        self.acc = Val::Number(if f(lhs, rhs) { 1.0 } else { 0.0 });
        Ok((self.ip + 2, None))
    }

    /// Round/floor/ceil to N decimal places: scale by 10^N, apply,
    /// rescale.
    fn rounded(&mut self, f: impl Fn(f64) -> f64) -> Result<(Address, Option<Event>)> {
        let value = self.operand_number(1)?;
        let places = self.operand_number(2)? as i32;
        let scale = 10f64.powi(places);
        self.acc = Val::Number(f(value * scale) / scale);
        Ok((self.ip + 3, None))
    }

    fn unary_math(&mut self, f: impl Fn(f64) -> f64) -> Result<(Address, Option<Event>)> {
        let value = self.operand_number(1)?;
        self.acc = Val::Number(f(value));
        Ok((self.ip + 2, None))
    }
}
