use crate::{
    decode::decode_string, host_func::Env, resolve::Resolved, BridgeError, Module, Resolve, Val,
};
use core::fmt::{Debug, Formatter};
use wasmtime::{Extern, ExternType, Func, FuncType, Instance, Memory, Store};

pub const MAIN: &str = "main";
pub const MEMORY: &str = "memory";

pub struct ModuleInstance<R: 'static> {
    module: Module,
    store: Store<R>,
    instance: Instance,
    memory: Option<Memory>,
}

impl<R: Resolve + 'static> ModuleInstance<R> {
    pub(crate) fn new(module: Module, resolver: R) -> Result<Self, BridgeError> {
        let mut store = Store::new(module.engine(), resolver);

        let mut imports = Vec::new();
        for import in module.inner().imports() {
            let (module_name, name) = (import.module(), import.name());
            let ExternType::Func(ty) = import.ty() else {
                return Err(BridgeError::Instantiation {
                    reason: format!("{module_name}.{name}: only function imports are supported"),
                });
            };
            if !ty.params().chain(ty.results()).all(|t| Val::is_numeric(&t)) {
                return Err(BridgeError::Instantiation {
                    reason: format!("{module_name}.{name}: unsupported value type"),
                });
            }
            let resolved = store
                .data()
                .resolve_func(module_name, name)
                .ok_or_else(|| BridgeError::Instantiation {
                    reason: format!("{module_name}.{name}: unknown import"),
                })?;
            imports.push(Extern::Func(bind(&mut store, ty, resolved)));
        }

        // Also runs the start function; host errors raised there keep their variant.
        let instance = Instance::new(&mut store, module.inner(), &imports)
            .map_err(|e| BridgeError::from_engine(e, BridgeError::instantiation))?;
        let memory = instance.get_memory(&mut store, MEMORY);
        tracing::debug!(
            imports = imports.len(),
            has_memory = memory.is_some(),
            "instantiated module"
        );

        Ok(Self {
            module,
            store,
            instance,
            memory,
        })
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn resolver(&self) -> &R {
        self.store.data()
    }

    pub fn into_resolver(self) -> R {
        self.store.into_data()
    }

    /// Current contents of the exported linear memory.
    ///
    /// The slice is re-read from the store on every call since the module
    /// may have grown (and thereby moved) its memory in between.
    pub fn mem(&self) -> &[u8] {
        match self.memory {
            Some(memory) => memory.data(&self.store),
            None => &[],
        }
    }

    pub fn mem_mut(&mut self) -> &mut [u8] {
        match self.memory {
            Some(memory) => memory.data_mut(&mut self.store),
            None => &mut [],
        }
    }

    pub fn decode_string(&self, index: u32) -> Result<String, BridgeError> {
        decode_string(self.mem(), index)
    }

    pub fn invoke(
        &mut self,
        function_name: &str,
        args: &[Val],
    ) -> Result<Option<Val>, BridgeError> {
        let func = self
            .instance
            .get_func(&mut self.store, function_name)
            .ok_or_else(|| BridgeError::NotExportedFunction {
                name: function_name.to_owned(),
            })?;

        let ty = func.ty(&self.store);
        if ty.params().len() != args.len()
            || !args.iter().zip(ty.params()).all(|(v, t)| v.matches(&t))
        {
            return Err(BridgeError::InvalidFuncArgs {
                name: function_name.to_owned(),
                args: args.to_vec(),
            });
        }
        if !ty.results().all(|t| Val::is_numeric(&t)) {
            return Err(BridgeError::InvalidFuncArgs {
                name: function_name.to_owned(),
                args: args.to_vec(),
            });
        }

        let params: Vec<_> = args.iter().map(|v| v.to_wasm()).collect();
        let mut results: Vec<_> = ty.results().map(|t| Val::zero(&t).to_wasm()).collect();
        tracing::debug!(function_name, ?args, "invoking export");
        func.call(&mut self.store, &params, &mut results)
            .map_err(|e| BridgeError::from_engine(e, BridgeError::trapped))?;

        Ok(results.first().and_then(Val::from_wasm))
    }

    /// Invokes the zero-argument `main` export once, ignoring its result.
    pub fn run_main(&mut self) -> Result<(), BridgeError> {
        self.invoke(MAIN, &[]).map(|_| ())
    }
}

fn bind<R: Resolve + 'static>(store: &mut Store<R>, ty: FuncType, resolved: Resolved) -> Func {
    let defaults: Vec<_> = ty.results().map(|t| Val::zero(&t)).collect();
    Func::new(store, ty, move |mut caller, params, results| {
        let args: Vec<_> = params.iter().filter_map(Val::from_wasm).collect();

        let value = match caller.get_export(MEMORY).and_then(Extern::into_memory) {
            Some(memory) => {
                let (mem, resolver) = memory.data_and_store_mut(&mut caller);
                resolver.invoke(&resolved, &args, &mut Env { mem })
            }
            None => caller
                .data_mut()
                .invoke(&resolved, &args, &mut Env { mem: &mut [] }),
        }
        .map_err(wasmtime::Error::new)?;

        for (slot, default) in results.iter_mut().zip(&defaults) {
            *slot = default.to_wasm();
        }
        // `None` leaves the declared results at zero.
        let reason = match (value, defaults.first()) {
            (None, _) => return Ok(()),
            (Some(value), Some(default)) if value.same_type(*default) => {
                results[0] = value.to_wasm();
                return Ok(());
            }
            (Some(value), Some(_)) => format!("returned a value of the wrong type: {value}"),
            (Some(value), None) => format!("returned {value} but the import has no result"),
        };
        Err(wasmtime::Error::new(BridgeError::HostFailure {
            name: resolved.name().to_owned(),
            reason,
        }))
    })
}

impl<R: Debug + 'static> Debug for ModuleInstance<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModuleInstance")
            .field("module", &self.module)
            .field("resolver", self.store.data())
            .field("mem_size", &self.memory.map(|m| m.data_size(&self.store)))
            .finish()
    }
}
