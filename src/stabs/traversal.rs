use super::StabsConfig;
use super::constant::{Constant, parse_constant};
use super::constants::{ParameterKind, StabType, VariableKind};
use super::diagnostics::{Diagnostics, FallbackKind};
use super::field::StringField;
use super::grammar::TypeParser;
use super::record::RawRecord;
use super::requestor::Requestor;
use super::strtab::{Continuation, StringTable};
use super::types::{TypeId, TypeRegistry};
use log::{debug, trace, warn};

/// Types and fallbacks left behind by one traversal
#[derive(Debug, Default)]
pub struct Session {
    pub types: TypeRegistry,
    pub diagnostics: Diagnostics,
}

/// Scope reconstructed from the flat record stream
#[derive(Debug, Default)]
struct ScopeState {
    current_compilation_unit: Option<String>,
    current_function: Option<String>,
    bracket_depth: u32,
    include_depth: u32,
    directory: Option<String>, // SO directory prefix waiting for its file name
    continuation: Continuation,
    last_value: i64,
}

/// Walks the records in order and reports symbols to a [`Requestor`].
///
/// The type registry is shared by every compilation unit in the stream;
/// it is not reset when a new unit starts.
pub struct SymbolTraversal<'s, 'r, R: Requestor + ?Sized> {
    strings: StringTable<'s>,
    config: StabsConfig,
    requestor: &'r mut R,
    session: Session,
    state: ScopeState,
}

impl<'s, 'r, R: Requestor + ?Sized> SymbolTraversal<'s, 'r, R> {
    pub fn new(strings: StringTable<'s>, config: StabsConfig, requestor: &'r mut R) -> Self {
        Self {
            strings,
            config,
            requestor,
            session: Session::default(),
            state: ScopeState::default(),
        }
    }

    /// Consumes every record, then closes whatever is still open
    pub fn run(mut self, records: impl IntoIterator<Item = RawRecord>) -> Session {
        for record in records {
            self.step(&record);
        }
        self.finish();
        self.session
    }

    fn address(&self, value: i64) -> u64 {
        self.config.width.address(value)
    }

    fn step(&mut self, record: &RawRecord) {
        self.state.last_value = record.value;
        let fragment = self.strings.get(record.string_offset);
        let Some(field) = self.state.continuation.feed(&fragment, self.config.continuation) else {
            trace!("continued string {:?}", fragment);
            return;
        };
        let Ok(stab_type) = StabType::try_from(record.type_code) else {
            trace!("skipping record type {:#04x}", record.type_code);
            return;
        };
        trace!("{:?} {:?} desc={} value={:#x}", stab_type, field, record.desc, record.value);
        self.dispatch(stab_type, &field, record);
    }

    fn dispatch(&mut self, stab_type: StabType, field: &str, record: &RawRecord) {
        let address = self.address(record.value);
        match stab_type {
            t if t.carries_symbol() => self.parse_symbol(StringField::parse(field), record.value),
            StabType::N_SLINE => {
                let line = u32::from(record.desc as u16);
                self.requestor.accept_statement(line, address);
            }
            StabType::N_FUN => self.function(field, record),
            StabType::N_LBRAC => {
                if self.state.current_function.is_some() {
                    self.requestor.enter_code_block(address);
                    self.state.bracket_depth += 1;
                }
            }
            StabType::N_RBRAC => {
                if self.state.bracket_depth > 0 {
                    self.requestor.exit_code_block(address);
                    self.state.bracket_depth -= 1;
                }
            }
            StabType::N_BINCL => self.enter_include(field),
            StabType::N_EINCL => self.exit_include(),
            StabType::N_SOL => {
                self.exit_include();
                self.enter_include(field);
            }
            StabType::N_SO => self.source_file(field, address),
            other => trace!("ignoring {:?}", other),
        }
    }

    fn function(&mut self, field: &str, record: &RawRecord) {
        let address = self.address(record.value);
        // an empty name marks the end of the open function
        if field.is_empty() {
            self.close_function(Some(address));
            return;
        }
        // NOTE: the previous function is closed at the new function's
        // address, not at its own end. Suspect, but consumers rely on it.
        self.close_function(Some(address));
        let symbol = StringField::parse(field);
        debug!("function {} at {:#x}", symbol.name, address);
        self.state.current_function = Some(symbol.name.clone());
        self.parse_symbol(symbol, record.value);
    }

    fn close_function(&mut self, address: Option<u64>) {
        if self.state.current_function.take().is_some() {
            self.requestor.exit_function(address);
            self.state.bracket_depth = 0;
        }
    }

    fn enter_include(&mut self, name: &str) {
        self.requestor.enter_include(name);
        self.state.include_depth += 1;
    }

    fn exit_include(&mut self) {
        if self.state.include_depth > 0 {
            self.requestor.exit_include();
            self.state.include_depth -= 1;
        }
    }

    fn close_includes(&mut self) {
        while self.state.include_depth > 0 {
            self.exit_include();
        }
    }

    fn close_compilation_unit(&mut self, address: u64) {
        if let Some(unit) = self.state.current_compilation_unit.take() {
            debug!("leaving compilation unit {}", unit);
            self.requestor.exit_compilation_unit(address);
        }
    }

    fn source_file(&mut self, field: &str, address: u64) {
        self.close_function(None);
        self.close_includes();
        self.close_compilation_unit(address);
        if field.is_empty() {
            return;
        }
        // a trailing slash names the directory of the next SO
        if field.ends_with('/') {
            self.state.directory = Some(field.to_string());
            return;
        }
        let name = match self.state.directory.take() {
            Some(directory) => directory + field,
            None => field.to_string(),
        };
        debug!("entering compilation unit {} at {:#x}", name, address);
        self.requestor.enter_compilation_unit(&name, address);
        self.state.current_compilation_unit = Some(name);
    }

    fn finish(&mut self) {
        if self.state.continuation.is_pending() {
            warn!("input ended inside a continued symbol string, dropping it");
            self.session
                .diagnostics
                .record(FallbackKind::Truncated, "continued string", "");
        }
        self.close_function(None);
        self.close_includes();
        let address = self.address(self.state.last_value);
        self.close_compilation_unit(address);
    }

    fn parse_type(&mut self, name: &str, information: &str) -> TypeId {
        TypeParser::new(&mut self.session.types, &mut self.session.diagnostics)
            .parse_str(name, information)
    }

    fn variable(&mut self, symbol: &StringField<'_>, kind: VariableKind, value: i64) {
        let ty = self.parse_type("", symbol.type_information);
        let ty = self.session.types.resolve(ty);
        self.requestor.accept_variable(&symbol.name, ty, kind, value);
    }

    fn parameter(&mut self, symbol: &StringField<'_>, kind: ParameterKind, value: i64) {
        let ty = self.parse_type("", symbol.type_information);
        let ty = self.session.types.resolve(ty);
        self.requestor.accept_parameter(&symbol.name, ty, kind, value);
    }

    fn type_def(&mut self, name: &str, information: &str) {
        let ty = self.parse_type(name, information);
        self.requestor.accept_type_def(name, self.session.types.resolve(ty));
    }

    fn constant(&mut self, name: &str, information: &str) {
        let constant = {
            let mut parser = TypeParser::new(&mut self.session.types, &mut self.session.diagnostics);
            parse_constant(&mut parser, information)
        };
        match constant {
            Some(Constant::Integer(value)) => self.requestor.accept_integer_const(name, value),
            Some(Constant::Float(value)) => self.requestor.accept_float_const(name, value),
            Some(Constant::Typed { ty, value }) => {
                let ty = self.session.types.resolve(ty);
                self.requestor.accept_type_const(name, ty, value);
            }
            None => trace!("unsupported constant {}:c{}", name, information),
        }
    }

    fn parse_symbol(&mut self, symbol: StringField<'_>, value: i64) {
        let address = self.address(value);
        match symbol.descriptor {
            Some('c') => self.constant(&symbol.name, symbol.type_information),
            Some('C') => {
                let ty = self.parse_type("", symbol.type_information);
                let ty = self.session.types.resolve(ty);
                self.requestor.accept_caught_exception(&symbol.name, ty, address);
            }
            Some(d @ ('F' | 'f')) => {
                let ty = self.parse_type("", symbol.type_information);
                let ty = self.session.types.resolve(ty);
                self.requestor.enter_function(&symbol.name, ty, d == 'F', address);
            }
            Some('G') => self.variable(&symbol, VariableKind::Global, value),
            Some('S') => self.variable(&symbol, VariableKind::Static, value),
            Some('V') => self.variable(&symbol, VariableKind::LocalStatic, value),
            Some('r' | 'd') => self.variable(&symbol, VariableKind::Register, value),
            Some('p') => self.parameter(&symbol, ParameterKind::Stack, value),
            Some('P' | 'R' | 'D') => self.parameter(&symbol, ParameterKind::Register, value),
            Some('v') => self.parameter(&symbol, ParameterKind::Reference, value),
            Some('a') => self.parameter(&symbol, ParameterKind::RegisterReference, value),
            Some('t') => self.type_def(&symbol.name, symbol.type_information),
            Some('T') => match symbol.type_information.strip_prefix('t') {
                // `Tt`: a tag that is also a typedef name
                Some(information) => self.type_def(&symbol.name, information),
                None => {
                    self.parse_type(&symbol.name, symbol.type_information);
                }
            },
            Some(d @ ('b' | 'i' | 'I' | 'J' | 'L' | 'm' | 'Q' | 'x')) => {
                trace!("ignoring symbol {} with descriptor {:?}", symbol.name, d);
            }
            _ => self.variable(&symbol, VariableKind::Local, value),
        }
    }
}
