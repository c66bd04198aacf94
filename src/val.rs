use core::fmt::{Display, Formatter};
use wasmtime::ValType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Val {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Val {
    pub(crate) fn from_wasm(v: &wasmtime::Val) -> Option<Self> {
        match v {
            wasmtime::Val::I32(v) => Some(Self::I32(*v)),
            wasmtime::Val::I64(v) => Some(Self::I64(*v)),
            wasmtime::Val::F32(bits) => Some(Self::F32(f32::from_bits(*bits))),
            wasmtime::Val::F64(bits) => Some(Self::F64(f64::from_bits(*bits))),
            _ => None,
        }
    }

    pub(crate) fn to_wasm(self) -> wasmtime::Val {
        match self {
            Self::I32(v) => wasmtime::Val::I32(v),
            Self::I64(v) => wasmtime::Val::I64(v),
            Self::F32(v) => wasmtime::Val::F32(v.to_bits()),
            Self::F64(v) => wasmtime::Val::F64(v.to_bits()),
        }
    }

    pub(crate) fn is_numeric(ty: &ValType) -> bool {
        matches!(
            ty,
            ValType::I32 | ValType::I64 | ValType::F32 | ValType::F64
        )
    }

    pub(crate) fn zero(ty: &ValType) -> Self {
        match ty {
            ValType::I64 => Self::I64(0),
            ValType::F32 => Self::F32(0.0),
            ValType::F64 => Self::F64(0.0),
            _ => Self::I32(0),
        }
    }

    pub(crate) fn same_type(self, other: Self) -> bool {
        core::mem::discriminant(&self) == core::mem::discriminant(&other)
    }

    pub(crate) fn matches(self, ty: &ValType) -> bool {
        matches!(
            (self, ty),
            (Self::I32(_), ValType::I32)
                | (Self::I64(_), ValType::I64)
                | (Self::F32(_), ValType::F32)
                | (Self::F64(_), ValType::F64)
        )
    }
}

impl Display for Val {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for Val {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for Val {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f32> for Val {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for Val {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}
