use clap::Parser;
use log::info;

use stabsdump::stabs::{
    ContinuationMarkers, Endianness, Error, ParameterKind, RecordWidth, Requestor, Stabs,
    StabsConfig, TypeRef, VariableKind,
};

/// Command-line arguments parser
#[derive(Parser, Debug)]
#[clap(
    author = "stabsdump developers",
    version = "0.1.0",
    about = "Print the symbols recorded in raw .stab/.stabstr section dumps"
)]
struct Arguments {
    /// Raw contents of the .stab section
    #[clap(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    stab: String,

    /// Raw contents of the .stabstr section
    #[clap(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    stabstr: String,

    /// Records are big endian
    #[clap(long)]
    big_endian: bool,

    /// Records carry 64-bit values (16-byte records)
    #[clap(long)]
    wide: bool,

    /// Do not treat a trailing '?' as a continuation marker
    #[clap(long)]
    no_aix_continuation: bool,

    /// Fail when the record table has a partial trailing record
    #[clap(long)]
    strict: bool,
}

/// Reads a section dump and returns its contents as a byte vector
fn read_file(file_path: &str) -> Result<Vec<u8>, Error> {
    std::fs::read(file_path).map_err(|source| Error::Io {
        path: file_path.to_string(),
        source,
    })
}

/// Prints one line per decoded symbol, indented by scope
#[derive(Default)]
struct Printer {
    depth: usize,
}

impl Printer {
    fn line(&self, text: std::fmt::Arguments<'_>) {
        println!("{:indent$}{}", "", text, indent = self.depth * 2);
    }
}

impl Requestor for Printer {
    fn enter_compilation_unit(&mut self, name: &str, address: u64) {
        self.line(format_args!("unit {name} @ {address:#x}"));
        self.depth += 1;
    }

    fn exit_compilation_unit(&mut self, address: u64) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("end unit @ {address:#x}"));
    }

    fn enter_include(&mut self, name: &str) {
        self.line(format_args!("include {name}"));
        self.depth += 1;
    }

    fn exit_include(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("end include"));
    }

    fn enter_function(&mut self, name: &str, ty: TypeRef<'_>, global: bool, address: u64) {
        let scope = if global { "global" } else { "static" };
        self.line(format_args!("{scope} function {name}: {ty} @ {address:#x}"));
        self.depth += 1;
    }

    fn exit_function(&mut self, address: Option<u64>) {
        self.depth = self.depth.saturating_sub(1);
        match address {
            Some(address) => self.line(format_args!("end function @ {address:#x}")),
            None => self.line(format_args!("end function")),
        }
    }

    fn enter_code_block(&mut self, address: u64) {
        self.line(format_args!("{{ @ {address:#x}"));
        self.depth += 1;
    }

    fn exit_code_block(&mut self, address: u64) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format_args!("}} @ {address:#x}"));
    }

    fn accept_statement(&mut self, line: u32, address: u64) {
        self.line(format_args!("line {line} @ {address:#x}"));
    }

    fn accept_integer_const(&mut self, name: &str, value: i64) {
        self.line(format_args!("const {name} = {value}"));
    }

    fn accept_float_const(&mut self, name: &str, value: f64) {
        self.line(format_args!("const {name} = {value}"));
    }

    fn accept_type_const(&mut self, name: &str, ty: TypeRef<'_>, value: i64) {
        self.line(format_args!("const {name}: {ty} = {value}"));
    }

    fn accept_parameter(&mut self, name: &str, ty: TypeRef<'_>, kind: ParameterKind, offset: i64) {
        self.line(format_args!("param {name}: {ty} ({kind:?}, {offset})"));
    }

    fn accept_variable(&mut self, name: &str, ty: TypeRef<'_>, kind: VariableKind, location: i64) {
        self.line(format_args!("var {name}: {ty} ({kind:?}, {location:#x})"));
    }

    fn accept_caught_exception(&mut self, name: &str, ty: TypeRef<'_>, address: u64) {
        self.line(format_args!("catch {name}: {ty} @ {address:#x}"));
    }

    fn accept_type_def(&mut self, name: &str, ty: TypeRef<'_>) {
        match ty.name() {
            Some(own) if own == name => self.line(format_args!("type {ty}")),
            _ => self.line(format_args!("typedef {name} = {ty}")),
        }
    }
}

fn run(args: &Arguments) -> Result<(), Error> {
    let records = read_file(&args.stab)?;
    let strings = read_file(&args.stabstr)?;

    let config = StabsConfig {
        endianness: if args.big_endian { Endianness::Big } else { Endianness::Little },
        width: if args.wide { RecordWidth::Bits64 } else { RecordWidth::Bits32 },
        continuation: ContinuationMarkers {
            backslash: true,
            question_mark: !args.no_aix_continuation,
        },
        strict_alignment: args.strict,
    };

    let stabs = Stabs::new(&records, &strings, config)?;
    info!("Parsing {} records ({:?})", stabs.records().len(), stabs.config().width);

    let mut printer = Printer::default();
    let session = stabs.parse(&mut printer);

    info!("Decoded {} types", session.types.len());
    if !session.diagnostics.is_empty() {
        println!("{} fallbacks:", session.diagnostics.len());
        for fallback in session.diagnostics.iter() {
            println!("  {:?} in {}: {:?}", fallback.kind, fallback.context, fallback.text);
        }
    }
    Ok(())
}

fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Arguments::parse();

    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
