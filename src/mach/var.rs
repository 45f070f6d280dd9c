use super::{Address, Arena};
use std::collections::HashMap;
use std::rc::Rc;

/// ## Variable memory
///
/// Name to single-cell address, populated on first reference and
/// never evicted. A name keeps the same address for the life of the
/// machine; distinct names always get distinct cells.
#[derive(Debug, Default)]
pub struct Var {
    table: HashMap<Rc<str>, Address>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    /// Get-or-create. Returns `None` only when the arena cannot supply
    /// a cell for a new name.
    pub fn address(&mut self, name: &Rc<str>, arena: &mut Arena) -> Option<Address> {
        if let Some(addr) = self.table.get(name) {
            return Some(*addr);
        }
        let addr = arena.allocate(1)?;
        self.table.insert(name.clone(), addr);
        Some(addr)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
