use crate::{
    host_func::{Env, HostFunc, NumberFunc, StringFunc},
    BridgeError, Val,
};
use core::fmt::{Debug, Formatter};
use std::collections::HashMap;

pub const ENV_MODULE: &str = "env";

#[derive(Default)]
pub struct ProviderTable {
    funcs: HashMap<String, Box<dyn HostFunc>>,
}

impl ProviderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_func<H>(mut self, name: impl Into<String>, func: H) -> Self
    where
        H: HostFunc + 'static,
    {
        self.insert(name, func);
        self
    }

    pub fn with_string_func<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&str) -> Result<(), BridgeError> + 'static,
    {
        self.with_func(name, StringFunc(f))
    }

    pub fn with_number_func<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(Val) -> Result<(), BridgeError> + 'static,
    {
        self.with_func(name, NumberFunc(f))
    }

    pub fn insert<H>(&mut self, name: impl Into<String>, func: H)
    where
        H: HostFunc + 'static,
    {
        self.funcs.insert(name.into(), Box::new(func));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn HostFunc + 'static)> {
        self.funcs.get_mut(name).map(|f| f.as_mut())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(|k| k.as_str())
    }

}

impl Debug for ProviderTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ProviderTable")
            .field("funcs", &names)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Provided { name: String, table: usize },
    Stub { name: String },
}

impl Resolved {
    pub fn name(&self) -> &str {
        match self {
            Self::Provided { name, .. } | Self::Stub { name } => name,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Self::Stub { .. })
    }
}

pub trait Resolve {
    /// Returns `None` if nothing can be bound to `module`.`name`.
    fn resolve_func(&self, module: &str, name: &str) -> Option<Resolved>;

    fn invoke(
        &mut self,
        resolved: &Resolved,
        args: &[Val],
        env: &mut Env,
    ) -> Result<Option<Val>, BridgeError>;
}

/// The `env` namespace seen by the module: layered provider tables, first
/// match wins, with a stub for every name no table provides.
#[derive(Debug, Default)]
pub struct ImportObject {
    tables: Vec<ProviderTable>,
}

impl ImportObject {
    pub fn new<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = ProviderTable>,
    {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    pub fn resolve(&self, name: &str) -> Resolved {
        match self.tables.iter().position(|t| t.contains(name)) {
            Some(table) => Resolved::Provided {
                name: name.to_owned(),
                table,
            },
            None => Resolved::Stub {
                name: name.to_owned(),
            },
        }
    }

    pub fn call(
        &mut self,
        name: &str,
        args: &[Val],
        env: &mut Env,
    ) -> Result<Option<Val>, BridgeError> {
        let resolved = self.resolve(name);
        self.invoke(&resolved, args, env)
    }
}

impl Resolve for ImportObject {
    fn resolve_func(&self, module: &str, name: &str) -> Option<Resolved> {
        if module != ENV_MODULE {
            return None;
        }
        let resolved = self.resolve(name);
        tracing::debug!(module, name, ?resolved, "resolved import");
        Some(resolved)
    }

    fn invoke(
        &mut self,
        resolved: &Resolved,
        args: &[Val],
        env: &mut Env,
    ) -> Result<Option<Val>, BridgeError> {
        let unresolved = || BridgeError::UnresolvedImport {
            name: resolved.name().to_owned(),
            args: args.to_vec(),
        };
        match resolved {
            Resolved::Provided { name, table } => {
                let func = self
                    .tables
                    .get_mut(*table)
                    .and_then(|t| t.get_mut(name))
                    .ok_or_else(unresolved)?;
                func.invoke(name, args, env)
            }
            Resolved::Stub { name } => {
                tracing::warn!(name, ?args, "called an import that is not implemented");
                Err(unresolved())
            }
        }
    }
}
