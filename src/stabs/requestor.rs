use super::constants::{ParameterKind, VariableKind};
use super::types::TypeRef;

/// Receiver of decoded symbols, in stream order.
///
/// Every method defaults to doing nothing so a consumer only implements
/// the events it cares about. Types are only valid for the duration of
/// the call; keep the [`TypeId`](super::types::TypeId) and look it up in
/// the session's registry afterwards if needed.
#[allow(unused_variables)]
pub trait Requestor {
    fn enter_compilation_unit(&mut self, name: &str, address: u64) {}
    fn exit_compilation_unit(&mut self, address: u64) {}

    fn enter_include(&mut self, name: &str) {}
    fn exit_include(&mut self) {}

    fn enter_function(&mut self, name: &str, ty: TypeRef<'_>, global: bool, address: u64) {}
    /// `None` when the stream ended (or a new unit began) without an
    /// explicit end-of-function record
    fn exit_function(&mut self, address: Option<u64>) {}

    fn enter_code_block(&mut self, address: u64) {}
    fn exit_code_block(&mut self, address: u64) {}

    fn accept_statement(&mut self, line: u32, address: u64) {}

    fn accept_integer_const(&mut self, name: &str, value: i64) {}
    fn accept_float_const(&mut self, name: &str, value: f64) {}
    fn accept_type_const(&mut self, name: &str, ty: TypeRef<'_>, value: i64) {}

    fn accept_parameter(&mut self, name: &str, ty: TypeRef<'_>, kind: ParameterKind, offset: i64) {}
    fn accept_variable(&mut self, name: &str, ty: TypeRef<'_>, kind: VariableKind, location: i64) {}
    fn accept_caught_exception(&mut self, name: &str, ty: TypeRef<'_>, address: u64) {}

    fn accept_type_def(&mut self, name: &str, ty: TypeRef<'_>) {}
}
