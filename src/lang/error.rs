use crate::mach::Address;
use std::rc::Rc;

pub struct Error {
    code: u16,
    address: Option<Address>,
    token: Option<Rc<str>>,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $addr:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).at_address($addr)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $addr:expr, ..$tok:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_address($addr)
            .with_token($tok)
    };
    ($err:ident, $addr:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_address($addr)
            .message($msg)
    };
    ($err:ident, $addr:expr, ..$tok:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .at_address($addr)
            .with_token($tok)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code: code as u16,
            address: None,
            token: None,
            message: "",
        }
    }

    pub fn at_address(self, address: Address) -> Error {
        debug_assert!(self.address.is_none());
        Error {
            address: Some(address),
            ..self
        }
    }

    pub fn with_token(self, token: &Rc<str>) -> Error {
        debug_assert!(self.token.is_none());
        Error {
            token: Some(token.clone()),
            ..self
        }
    }

    pub fn message(self, message: &'static str) -> Error {
        Error { message, ..self }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }
}

pub enum ErrorCode {
    UnknownOpcode = 1,
    UnimplementedOpcode = 2,
    OutOfMemory = 3,
    CallStackUnderflow = 4,
    AddressOutOfRange = 5,
    InternalError = 51,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            1 => "UNKNOWN OPCODE",
            2 => "UNIMPLEMENTED OPCODE",
            3 => "OUT OF MEMORY",
            4 => "RETURN WITHOUT CALL",
            5 => "ADDRESS OUT OF RANGE",
            51 => "INTERNAL ERROR",
            _ => "",
        };
        let mut suffix = String::new();
        if let Some(address) = self.address {
            suffix.push_str(&format!(" AT {}", address));
        }
        if let Some(token) = &self.token {
            suffix.push_str(&format!(" (`{}`)", token));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if code_str.is_empty() {
            write!(f, "PROGRAM ERROR {}{}", self.code, suffix)
        } else {
            write!(f, "{}{}", code_str, suffix)
        }
    }
}
