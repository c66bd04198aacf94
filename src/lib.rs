#![forbid(unsafe_code)]

pub(crate) mod decode;
pub(crate) mod error;
pub(crate) mod host_func;
pub(crate) mod module;
pub(crate) mod module_instance;
pub(crate) mod reader;
pub(crate) mod resolve;
pub(crate) mod val;

pub mod console;
pub mod document;

pub use decode::{decode_string, StringDescriptor};
pub use error::BridgeError;
pub use host_func::{Env, HostFunc, NumberFunc, StringFunc};
pub use module::{ImportName, Module};
pub use module_instance::{ModuleInstance, MAIN, MEMORY};
pub use resolve::{ImportObject, ProviderTable, Resolve, Resolved, ENV_MODULE};
pub use val::Val;
