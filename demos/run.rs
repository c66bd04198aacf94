use clap::{Parser, ValueEnum};
use envbridge::{
    console::{self, ConsoleOptions},
    document::Document,
    ImportObject, Module, ProviderTable, ENV_MODULE, MAIN,
};
use orfail::{Failure, OrFail};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Presentation {
    Console,
    Document,
}

#[derive(Debug, Parser)]
struct Args {
    wasm_path: PathBuf,

    #[arg(long, default_value = MAIN)]
    entry: String,

    #[arg(long, value_enum, default_value_t = Presentation::Console)]
    presentation: Presentation,

    /// Block on `alert` until Enter is pressed (console presentation only).
    #[arg(long)]
    interactive: bool,

    /// Print how each import resolves and exit without running the module.
    #[arg(long)]
    list_imports: bool,
}

pub fn main() -> orfail::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let wasm_bytes = std::fs::read(&args.wasm_path).or_fail()?;
    let module = Module::decode(&wasm_bytes)
        .map_err(|e| Failure::new(format!("{e}")))
        .or_fail()?;

    let document = Document::new();
    let table: ProviderTable = match args.presentation {
        Presentation::Console => console::provider_table(ConsoleOptions {
            interactive: args.interactive,
        }),
        Presentation::Document => document.provider_table(),
    };
    let imports = ImportObject::new([table]);

    if args.list_imports {
        for import in module.imports() {
            if import.module != ENV_MODULE || !import.is_func {
                println!("{}.{} => unlinkable", import.module, import.name);
                continue;
            }
            println!(
                "{}.{} => {:?}",
                import.module,
                import.name,
                imports.resolve(&import.name)
            );
        }
        return Ok(());
    }

    let mut instance = module
        .instantiate(imports)
        .map_err(|e| Failure::new(format!("{e}")))
        .or_fail()?;
    instance
        .invoke(&args.entry, &[])
        .map_err(|e| Failure::new(format!("{e}")))
        .or_fail()?;

    if args.presentation == Presentation::Document {
        document.render(std::io::stdout().lock()).or_fail()?;
    }
    Ok(())
}
