use self::testcase::mem_with_string;
use envbridge::{
    BridgeError, Env, ImportObject, ProviderTable, Resolve, Resolved, Val, ENV_MODULE,
};
use orfail::OrFail;
use std::{cell::RefCell, rc::Rc};


type Calls = Rc<RefCell<Vec<String>>>;

fn recording(calls: &Calls, tag: &'static str) -> impl FnMut(&str) -> Result<(), BridgeError> {
    let calls = Rc::clone(calls);
    move |text| {
        calls.borrow_mut().push(format!("{tag}:{text}"));
        Ok(())
    }
}

fn layered(calls: &Calls) -> ImportObject {
    ImportObject::new([
        ProviderTable::new().with_string_func("log", recording(calls, "f")),
        ProviderTable::new()
            .with_string_func("log", recording(calls, "g"))
            .with_string_func("alert", recording(calls, "h")),
    ])
}

#[test]
pub fn first_table_wins() {
    let calls = Calls::default();
    let imports = layered(&calls);

    assert_eq!(
        imports.resolve("log"),
        Resolved::Provided {
            name: "log".to_owned(),
            table: 0
        }
    );
    assert_eq!(
        imports.resolve("alert"),
        Resolved::Provided {
            name: "alert".to_owned(),
            table: 1
        }
    );
    assert_eq!(
        imports.resolve("missing"),
        Resolved::Stub {
            name: "missing".to_owned()
        }
    );
}

#[test]
pub fn dispatch_goes_to_first_binding() -> orfail::Result<()> {
    let calls = Calls::default();
    let mut imports = layered(&calls);
    let mut mem = mem_with_string("hi");
    let mut env = Env { mem: &mut mem };

    imports.call("log", &[Val::I32(0)], &mut env).or_fail()?;
    imports.call("alert", &[Val::I32(0)], &mut env).or_fail()?;

    assert_eq!(*calls.borrow(), ["f:hi", "h:hi"]);
    Ok(())
}

#[test]
pub fn stub_fails_only_when_invoked() {
    let calls = Calls::default();
    let mut imports = layered(&calls);

    let resolved = imports.resolve_func(ENV_MODULE, "missing");
    assert!(resolved.as_ref().is_some_and(Resolved::is_stub));

    let args = [Val::I32(7), Val::I64(-3), Val::F64(0.5)];
    let result = imports.call("missing", &args, &mut Env { mem: &mut [] });
    let Err(e) = result else {
        panic!("stub returned {result:?}");
    };
    assert_eq!(
        e,
        BridgeError::UnresolvedImport {
            name: "missing".to_owned(),
            args: args.to_vec()
        }
    );
    assert!(e.to_string().contains("missing"));
    assert!(e.to_string().contains("7,-3,0.5"));
    assert!(calls.borrow().is_empty());
}

#[test]
pub fn only_own_entries_match() {
    let imports = ImportObject::new([ProviderTable::new().with_number_func("log_num", |_| Ok(()))]);
    for name in ["constructor", "hasOwnProperty", "__proto__", "toString"] {
        assert!(imports.resolve(name).is_stub(), "{name}");
    }
    assert!(ImportObject::default().resolve("log").is_stub());
}

#[test]
pub fn other_modules_are_not_resolved() {
    let imports = layered(&Calls::default());
    assert_eq!(imports.resolve_func("wasi_snapshot_preview1", "fd_write"), None);
    assert_eq!(imports.resolve_func("env2", "log"), None);
    assert!(imports.resolve_func(ENV_MODULE, "log").is_some());
}

#[test]
pub fn log_num_dispatches_raw_number() -> orfail::Result<()> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut imports = ImportObject::new([ProviderTable::new().with_number_func(
        "log_num",
        move |n| {
            sink.borrow_mut().push(n);
            Ok(())
        },
    )]);

    // No memory at all: any attempt to decode would fail.
    let mut env = Env { mem: &mut [] };
    imports.call("log_num", &[Val::I32(42)], &mut env).or_fail()?;
    imports.call("log_num", &[Val::F64(1.25)], &mut env).or_fail()?;

    assert_eq!(*seen.borrow(), [Val::I32(42), Val::F64(1.25)]);
    Ok(())
}

#[test]
pub fn string_func_rejects_other_argument_shapes() {
    let mut imports = layered(&Calls::default());
    let mut mem = mem_with_string("hi");
    let mut env = Env { mem: &mut mem };

    for args in [vec![], vec![Val::I64(0)], vec![Val::I32(0), Val::I32(0)]] {
        assert_eq!(
            imports.call("log", &args, &mut env),
            Err(BridgeError::InvalidFuncArgs {
                name: "log".to_owned(),
                args
            })
        );
    }
}

#[test]
pub fn string_func_propagates_out_of_bounds() {
    let calls = Calls::default();
    let mut imports = layered(&calls);
    let mut mem = mem_with_string("hi");
    let mut env = Env { mem: &mut mem };

    let result = imports.call("log", &[Val::I32(1000)], &mut env);
    assert!(matches!(result, Err(BridgeError::OutOfBounds { .. })));
    assert!(calls.borrow().is_empty());
}

fn answer(_args: &[Val], _env: &mut Env) -> Result<Option<Val>, BridgeError> {
    Ok(Some(Val::I32(42)))
}

#[test]
pub fn custom_host_func_returns_value() -> orfail::Result<()> {
    let mut table = ProviderTable::new();
    table.insert("answer", answer);
    let mut imports = ImportObject::new([table]);

    let value = imports
        .call("answer", &[], &mut Env { mem: &mut [] })
        .or_fail()?;
    assert_eq!(value, Some(Val::I32(42)));
    Ok(())
}
