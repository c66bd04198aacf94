use crate::Val;
use core::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    OutOfBounds {
        offset: u64,
        length: u64,
        mem_size: usize,
    },
    UnresolvedImport {
        name: String,
        args: Vec<Val>,
    },
    Instantiation {
        reason: String,
    },
    NotExportedFunction {
        name: String,
    },
    InvalidFuncArgs {
        name: String,
        args: Vec<Val>,
    },
    HostFailure {
        name: String,
        reason: String,
    },
    Trapped {
        reason: String,
    },
}

impl BridgeError {
    pub(crate) fn instantiation<E: Display>(e: E) -> Self {
        Self::Instantiation {
            reason: format!("{e:#}"),
        }
    }

    // Errors raised by host functions come back from the engine wrapped in
    // backtrace context; unwrap them so callers see the original variant.
    pub(crate) fn from_engine<F>(e: wasmtime::Error, otherwise: F) -> Self
    where
        F: FnOnce(wasmtime::Error) -> Self,
    {
        match e.downcast::<Self>() {
            Ok(e) => e,
            Err(e) => otherwise(e),
        }
    }

    pub(crate) fn trapped(e: wasmtime::Error) -> Self {
        Self::Trapped {
            reason: format!("{e:#}"),
        }
    }
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds {
                offset,
                length,
                mem_size,
            } => write!(
                f,
                "Out of bounds: {length} bytes at {offset} (memory size: {mem_size})"
            ),
            Self::UnresolvedImport { name, args } => {
                write!(f, "NOT IMPLEMENTED: {name} {}", DisplayArgs(args))
            }
            Self::Instantiation { reason } => write!(f, "Instantiation failed: {reason}"),
            Self::NotExportedFunction { name } => write!(f, "Not exported function: {name}"),
            Self::InvalidFuncArgs { name, args } => {
                write!(f, "Invalid function arguments: {name} {}", DisplayArgs(args))
            }
            Self::HostFailure { name, reason } => write!(f, "Host function {name} failed: {reason}"),
            Self::Trapped { reason } => write!(f, "Trapped: {reason}"),
        }
    }
}

impl std::error::Error for BridgeError {}

struct DisplayArgs<'a>(&'a [Val]);

impl Display for DisplayArgs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{arg}")?;
        }
        Ok(())
    }
}
