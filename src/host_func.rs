use crate::{decode::decode_string, BridgeError, Val};

/// Per-call view of the calling instance.
///
/// `mem` is borrowed from the store for the duration of a single host call
/// and is empty when the module exports no memory.
#[derive(Debug)]
pub struct Env<'a> {
    pub mem: &'a mut [u8],
}

impl Env<'_> {
    pub fn decode_string(&self, index: u32) -> Result<String, BridgeError> {
        decode_string(self.mem, index)
    }
}

pub trait HostFunc {
    fn invoke(
        &mut self,
        name: &str,
        args: &[Val],
        env: &mut Env,
    ) -> Result<Option<Val>, BridgeError>;
}

impl<F> HostFunc for F
where
    F: FnMut(&[Val], &mut Env) -> Result<Option<Val>, BridgeError>,
{
    fn invoke(
        &mut self,
        _name: &str,
        args: &[Val],
        env: &mut Env,
    ) -> Result<Option<Val>, BridgeError> {
        self(args, env)
    }
}

/// Host function taking one memory index that is decoded as a string before
/// it reaches `F`.
pub struct StringFunc<F>(pub F);

impl<F> HostFunc for StringFunc<F>
where
    F: FnMut(&str) -> Result<(), BridgeError>,
{
    fn invoke(
        &mut self,
        name: &str,
        args: &[Val],
        env: &mut Env,
    ) -> Result<Option<Val>, BridgeError> {
        let [Val::I32(index)] = args else {
            return Err(BridgeError::InvalidFuncArgs {
                name: name.to_owned(),
                args: args.to_vec(),
            });
        };
        let text = env.decode_string(*index as u32)?;
        (self.0)(&text)?;
        Ok(None)
    }
}

/// Host function taking one raw number, passed to `F` as is.
pub struct NumberFunc<F>(pub F);

impl<F> HostFunc for NumberFunc<F>
where
    F: FnMut(Val) -> Result<(), BridgeError>,
{
    fn invoke(
        &mut self,
        name: &str,
        args: &[Val],
        _env: &mut Env,
    ) -> Result<Option<Val>, BridgeError> {
        let [value] = args else {
            return Err(BridgeError::InvalidFuncArgs {
                name: name.to_owned(),
                args: args.to_vec(),
            });
        };
        (self.0)(*value)?;
        Ok(None)
    }
}
