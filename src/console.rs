use crate::{BridgeError, ProviderTable};
use std::{
    cell::RefCell,
    io::{BufRead, BufReader, Write},
    rc::Rc,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Makes `alert` block until a line is read from stdin.
    pub interactive: bool,
}

/// `log` and `log_num` go to stdout, `alert` to stderr.
pub fn provider_table(options: ConsoleOptions) -> ProviderTable {
    let input = options
        .interactive
        .then(|| BufReader::new(std::io::stdin()));
    provider_table_with(std::io::stdout(), std::io::stderr(), input)
}

pub fn provider_table_with<O, E, I>(out: O, err: E, input: Option<I>) -> ProviderTable
where
    O: Write + 'static,
    E: Write + 'static,
    I: BufRead + 'static,
{
    let out = Rc::new(RefCell::new(out));
    let num_out = Rc::clone(&out);
    let mut err = err;
    let mut input = input;
    ProviderTable::new()
        .with_string_func("log", move |text| {
            writeln!(out.borrow_mut(), "{text}").map_err(|e| failure("log", e))
        })
        .with_number_func("log_num", move |n| {
            writeln!(num_out.borrow_mut(), "{n}").map_err(|e| failure("log_num", e))
        })
        .with_string_func("alert", move |text| {
            writeln!(err, "[alert] {text}").map_err(|e| failure("alert", e))?;
            if let Some(input) = &mut input {
                write!(err, "(press Enter to continue) ").map_err(|e| failure("alert", e))?;
                err.flush().map_err(|e| failure("alert", e))?;
                let mut line = String::new();
                input
                    .read_line(&mut line)
                    .map_err(|e| failure("alert", e))?;
            }
            Ok(())
        })
}

fn failure(name: &str, e: std::io::Error) -> BridgeError {
    BridgeError::HostFailure {
        name: name.to_owned(),
        reason: e.to_string(),
    }
}
