use super::{Address, Val};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// A contiguous range of free arena addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub start: Address,
    pub length: usize,
}

/// ## Arena memory
///
/// The fixed address space backing all machine-visible memory: one
/// tagged cell per address, plus a free list of disjoint extents
/// sorted ascending by start. The free list never holds two adjacent
/// extents; [`Arena::deallocate`] coalesces with both neighbors.
#[derive(Debug)]
pub struct Arena {
    cells: Vec<Val>,
    free: Vec<Extent>,
}

impl Arena {
    pub fn new(capacity: usize) -> Arena {
        Arena {
            cells: vec![Val::default(); capacity],
            free: vec![Extent {
                start: 0,
                length: capacity,
            }],
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// First-fit allocation. An exact-length extent is removed whole;
    /// a longer extent gives up its prefix and shrinks in place.
    /// Returns `None` when no extent is large enough.
    pub fn allocate(&mut self, size: usize) -> Option<Address> {
        for (index, extent) in self.free.iter_mut().enumerate() {
            if extent.length == size {
                let addr = extent.start;
                self.free.remove(index);
                return Some(addr);
            }
            if extent.length > size {
                let addr = extent.start;
                extent.start += size;
                extent.length -= size;
                return Some(addr);
            }
        }
        None
    }

    /// Return a range to the free list, preserving sort order and
    /// merging with the preceding and following extents whenever the
    /// result would be contiguous. Freeing a range that is already
    /// free is a caller error.
    pub fn deallocate(&mut self, addr: Address, size: usize) {
        if size == 0 {
            return;
        }
        debug_assert!(addr + size <= self.capacity());
        let index = self
            .free
            .partition_point(|extent| extent.start < addr);
        debug_assert!(index == 0 || {
            let prev = &self.free[index - 1];
            prev.start + prev.length <= addr
        });
        debug_assert!(index == self.free.len() || addr + size <= self.free[index].start);
        self.free.insert(
            index,
            Extent {
                start: addr,
                length: size,
            },
        );
        if index + 1 < self.free.len()
            && self.free[index].start + self.free[index].length == self.free[index + 1].start
        {
            self.free[index].length += self.free[index + 1].length;
            self.free.remove(index + 1);
        }
        if index > 0
            && self.free[index - 1].start + self.free[index - 1].length == self.free[index].start
        {
            self.free[index - 1].length += self.free[index].length;
            self.free.remove(index);
        }
    }

    pub fn fetch(&self, addr: Address) -> Result<Val> {
        match self.cells.get(addr) {
            Some(val) => Ok(val.clone()),
            None => Err(error!(AddressOutOfRange; "CELL FETCH PAST ARENA")),
        }
    }

    pub fn store(&mut self, addr: Address, val: Val) -> Result<()> {
        match self.cells.get_mut(addr) {
            Some(cell) => {
                *cell = val;
                Ok(())
            }
            None => Err(error!(AddressOutOfRange; "CELL STORE PAST ARENA")),
        }
    }

    /// The current free list, for diagnostics and tests.
    pub fn extents(&self) -> &[Extent] {
        &self.free
    }
}
