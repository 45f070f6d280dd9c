use crate::mach::{Opcode, Tape};

/// Decode SLVM program text into an instruction tape.
///
/// Every source line becomes exactly one tape slot, blank lines
/// included, so that branch targets written against the source line up
/// with tape indices. Surrounding whitespace is trimmed from each
/// token; interior whitespace is preserved for literal operands.
/// Tokens that are not catalog mnemonics are kept as operand text and
/// carry no opcode; executing such a slot is what halts the machine,
/// not loading it.
pub fn load(source: &str) -> Tape {
    Tape::new(
        source
            .lines()
            .map(|line| {
                let token = line.trim();
                (Opcode::from_mnemonic(token), token)
            })
            .collect(),
    )
}
