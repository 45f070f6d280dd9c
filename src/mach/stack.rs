use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector
///
/// Backs both the call stack and the data stack. Overflow reports out
/// of memory with the owner's message; popping past bottom is an
/// internal error, so callers that need a program-visible underflow
/// (`ret` on an empty call stack) check emptiness first.
pub struct Stack<T> {
    overflow_message: &'static str,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            vec: vec![],
        }
    }
    fn max_len(&self) -> usize {
        u16::MAX as usize
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        self.vec.push(val);
        if self.vec.len() > self.max_len() {
            Err(error!(OutOfMemory; self.overflow_message))
        } else {
            Ok(())
        }
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(error!(InternalError; "UNDERFLOW")),
        }
    }
}
