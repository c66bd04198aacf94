use crate::{module_instance::ModuleInstance, BridgeError, Resolve};
use core::fmt::{Debug, Formatter};
use wasmtime::{Engine, ExternType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportName {
    pub module: String,
    pub name: String,
    pub is_func: bool,
}

pub struct Module {
    engine: Engine,
    inner: wasmtime::Module,
}

impl Module {
    /// Compiles and validates a module given as binary or WAT text.
    pub fn decode(wasm_bytes: &[u8]) -> Result<Self, BridgeError> {
        let engine = Engine::default();
        let inner =
            wasmtime::Module::new(&engine, wasm_bytes).map_err(BridgeError::instantiation)?;
        tracing::debug!(
            imports = inner.imports().len(),
            exports = inner.exports().len(),
            "compiled module"
        );
        Ok(Self { engine, inner })
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportName> + '_ {
        self.inner.imports().map(|import| ImportName {
            module: import.module().to_owned(),
            name: import.name().to_owned(),
            is_func: matches!(import.ty(), ExternType::Func(_)),
        })
    }

    pub fn instantiate<R>(self, resolver: R) -> Result<ModuleInstance<R>, BridgeError>
    where
        R: Resolve + 'static,
    {
        ModuleInstance::new(self, resolver)
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }

    pub(crate) fn inner(&self) -> &wasmtime::Module {
        &self.inner
    }
}

impl Debug for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.inner.name())
            .field("imports", &self.imports().collect::<Vec<_>>())
            .finish()
    }
}
