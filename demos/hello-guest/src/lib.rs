// $ cargo build --manifest-path demos/hello-guest/Cargo.toml --target wasm32-unknown-unknown
// $ cargo run --example run -- demos/hello-guest/target/wasm32-unknown-unknown/debug/hello_guest.wasm
#[cfg(target_arch = "wasm32")]
#[repr(C)]
pub struct Str {
    ptr: *const u8,
    len: u32,
}

#[cfg(target_arch = "wasm32")]
impl Str {
    fn new(s: &str) -> Self {
        Self {
            ptr: s.as_ptr(),
            len: s.len() as u32,
        }
    }
}

// `log` would otherwise bind to libm's `log(f64) -> f64`.
#[cfg(target_arch = "wasm32")]
#[link(wasm_import_module = "env")]
extern "C" {
    #[link_name = "log"]
    fn host_log(s: *const Str);
    #[link_name = "log_num"]
    fn host_log_num(n: i32);
    #[link_name = "alert"]
    fn host_alert(s: *const Str);
}

#[cfg(target_arch = "wasm32")]
#[export_name = "main"]
pub extern "C" fn run() {
    let hello = Str::new("Hello, world!");
    let bye = Str::new("こんにちは、さようなら");
    unsafe {
        host_log(&hello);
        host_log_num(42);
        host_alert(&bye);
    }
}
