use super::{Address, Opcode};
use std::rc::Rc;

/// ## Instruction tape
///
/// The ordered, immutable program the machine executes. Each slot
/// carries the original source token and, when the token is a catalog
/// mnemonic, its decoded opcode. Operand slots and undecodable tokens
/// carry no opcode. Branch targets are tape indices, never arena
/// addresses.
#[derive(Debug, Default)]
pub struct Tape {
    slots: Vec<(Option<Opcode>, Rc<str>)>,
}

impl Tape {
    pub fn new(slots: Vec<(Option<Opcode>, &str)>) -> Tape {
        Tape {
            slots: slots
                .into_iter()
                .map(|(opcode, token)| (opcode, token.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn opcode(&self, addr: Address) -> Option<Opcode> {
        self.slots.get(addr).and_then(|slot| slot.0)
    }

    pub fn token(&self, addr: Address) -> Option<&Rc<str>> {
        self.slots.get(addr).map(|slot| &slot.1)
    }
}

/// Disassembly listing: one slot per line, operand slots indented
/// under the instruction that consumes them.
impl std::fmt::Display for Tape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut operands = 0;
        for (addr, (opcode, token)) in self.slots.iter().enumerate() {
            match opcode {
                Some(op) if operands == 0 => {
                    writeln!(f, "{:>5}  {}", addr, op)?;
                    operands = op.operands();
                }
                _ => {
                    if operands > 0 {
                        writeln!(f, "{:>5}    `{}`", addr, token)?;
                        operands -= 1;
                    } else {
                        writeln!(f, "{:>5}  ?`{}`", addr, token)?;
                    }
                }
            }
        }
        Ok(())
    }
}
