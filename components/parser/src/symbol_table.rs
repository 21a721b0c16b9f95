//! Depth-scoped symbol table
//!
//! Entries live in a fixed number of hash buckets, each an ordered chain with
//! the most recent insertion first. Lookups and depth purges deliberately walk
//! every bucket rather than indexing by hash, so enumeration order is the
//! table order used by [`SymbolTable::write`].

use crate::error::internal_error;
use crate::lexer::TokenKind;
use core_types::CompileError;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// Number of hash buckets.
pub const TABLE_SIZE: usize = 211;

/// Declared type of a variable, constant, parameter or return value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    /// int
    Int,
    /// boolean
    Boolean,
    /// String
    String,
    /// real
    Real,
    /// void
    Void,
}

impl VarType {
    /// Map a type keyword to its type. Anything that is not a type keyword
    /// maps to `Void`.
    pub fn from_token(kind: TokenKind) -> VarType {
        match kind {
            TokenKind::Int => VarType::Int,
            TokenKind::Boolean => VarType::Boolean,
            TokenKind::StringType => VarType::String,
            TokenKind::Real => VarType::Real,
            _ => VarType::Void,
        }
    }

    /// Bytes one value of this type occupies in a frame.
    pub fn size(self) -> usize {
        match self {
            VarType::Int => 2,
            VarType::Boolean => 1,
            VarType::String | VarType::Real | VarType::Void => 0,
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VarType::Int => "int",
            VarType::Boolean => "boolean",
            VarType::String => "String",
            VarType::Real => "real",
            VarType::Void => "void",
        };
        f.write_str(name)
    }
}

/// Decoded literal value of a constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    /// Integer literal
    Int(i32),
    /// Real literal
    Real(f64),
}

/// Variable (or parameter) data
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    /// Declared type
    pub var_type: VarType,
    /// Byte offset within the enclosing frame
    pub offset: usize,
    /// Byte size
    pub size: usize,
}

/// Constant data
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantInfo {
    /// Declared type
    pub const_type: VarType,
    /// Byte offset within the enclosing frame
    pub offset: usize,
    /// Byte size
    pub size: usize,
    /// Literal value
    pub value: ConstValue,
}

/// Function (method) data
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    /// Total size of parameters and locals
    pub local_size: usize,
    /// Number of parameters
    pub param_count: usize,
    /// Declared return type
    pub return_type: VarType,
    /// Parameter types in declaration order
    pub param_types: Vec<VarType>,
}

/// Class data
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    /// Total size of the member variables
    pub local_size: usize,
    /// Member method names in declaration order
    pub method_names: Vec<String>,
    /// Member variable names in declaration order
    pub variable_names: Vec<String>,
}

/// Classification attached to an entry after it is inserted
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPayload {
    /// Variable or parameter
    Variable(VariableInfo),
    /// Named constant
    Constant(ConstantInfo),
    /// Method
    Function(FunctionInfo),
    /// Class
    Class(ClassInfo),
}

impl EntryPayload {
    /// Lower-case variant name used in table dumps.
    pub fn variant_name(&self) -> &'static str {
        match self {
            EntryPayload::Variable(_) => "variable",
            EntryPayload::Constant(_) => "constant",
            EntryPayload::Function(_) => "function",
            EntryPayload::Class(_) => "class",
        }
    }
}

/// Stable handle to an inserted entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// One declared name
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Handle used to classify this entry
    pub id: EntryId,
    /// Declared name
    pub name: String,
    /// Kind of the token that declared the name
    pub kind: TokenKind,
    /// Scope depth active at insertion
    pub depth: usize,
    /// Classification, `None` until one of the `set_*` calls
    pub payload: Option<EntryPayload>,
}

impl Entry {
    /// Dump line for this entry: `"<name> <variant>"`.
    pub fn describe(&self) -> String {
        let variant = self
            .payload
            .as_ref()
            .map_or("unclassified", EntryPayload::variant_name);
        format!("{} {}", self.name, variant)
    }
}

/// Receiver for symbol table dumps
pub trait DumpSink {
    /// Accept one dump line.
    fn write_line(&mut self, line: &str);

    /// Accept one entry of a scope dump. Defaults to its described line.
    fn write_entry(&mut self, entry: &Entry) {
        self.write_line(&entry.describe());
    }
}

impl DumpSink for Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Sink that prints every line to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl DumpSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Hash-bucketed symbol table keyed by name and tagged by depth
#[derive(Debug, Clone)]
pub struct SymbolTable {
    buckets: Vec<VecDeque<Entry>>,
    next_id: u64,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            buckets: vec![VecDeque::new(); TABLE_SIZE],
            next_id: 0,
        }
    }

    /// Insert a brand-new entry at the front of its bucket.
    ///
    /// No uniqueness check happens here; callers that reject duplicates must
    /// [`lookup`](Self::lookup) first.
    pub fn insert(&mut self, name: &str, kind: TokenKind, depth: usize) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        let bucket = hashpjw(name);
        debug!(name, ?kind, depth, bucket, "insert symbol");

        self.buckets[bucket].push_front(Entry {
            id,
            name: name.to_string(),
            kind,
            depth,
            payload: None,
        });
        id
    }

    /// Find the most recently inserted entry with this name, at any depth.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter())
            .find(|entry| entry.name == name)
    }

    /// Find an entry by handle.
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter())
            .find(|entry| entry.id == id)
    }

    /// Remove every entry tagged with `depth`. Returns how many were removed.
    pub fn delete_depth(&mut self, depth: usize) -> usize {
        let mut removed = 0;
        for bucket in &mut self.buckets {
            let before = bucket.len();
            bucket.retain(|entry| entry.depth != depth);
            removed += before - bucket.len();
        }
        debug!(depth, removed, "purged depth");
        removed
    }

    /// All entries at `depth`, in table order.
    pub fn entries_at(&self, depth: usize) -> impl Iterator<Item = &Entry> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter())
            .filter(move |entry| entry.depth == depth)
    }

    /// Write one line per entry at `depth` to the sink.
    pub fn write(&self, depth: usize, sink: &mut dyn DumpSink) {
        for entry in self.entries_at(depth) {
            sink.write_entry(entry);
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(VecDeque::len).sum()
    }

    /// True when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(VecDeque::is_empty)
    }

    /// Classify an entry as a variable.
    pub fn set_variable(
        &mut self,
        id: EntryId,
        var_type: VarType,
        offset: usize,
        size: usize,
    ) -> Result<(), CompileError> {
        self.set_payload(
            id,
            EntryPayload::Variable(VariableInfo {
                var_type,
                offset,
                size,
            }),
        )
    }

    /// Classify an entry as a constant.
    pub fn set_constant(
        &mut self,
        id: EntryId,
        const_type: VarType,
        offset: usize,
        size: usize,
        value: ConstValue,
    ) -> Result<(), CompileError> {
        self.set_payload(
            id,
            EntryPayload::Constant(ConstantInfo {
                const_type,
                offset,
                size,
                value,
            }),
        )
    }

    /// Classify an entry as a function. The parameter count is the length
    /// of `param_types`.
    pub fn set_function(
        &mut self,
        id: EntryId,
        local_size: usize,
        return_type: VarType,
        param_types: Vec<VarType>,
    ) -> Result<(), CompileError> {
        self.set_payload(
            id,
            EntryPayload::Function(FunctionInfo {
                local_size,
                param_count: param_types.len(),
                return_type,
                param_types,
            }),
        )
    }

    /// Classify an entry as a class.
    pub fn set_class(
        &mut self,
        id: EntryId,
        local_size: usize,
        method_names: Vec<String>,
        variable_names: Vec<String>,
    ) -> Result<(), CompileError> {
        self.set_payload(
            id,
            EntryPayload::Class(ClassInfo {
                local_size,
                method_names,
                variable_names,
            }),
        )
    }

    fn set_payload(&mut self, id: EntryId, payload: EntryPayload) -> Result<(), CompileError> {
        let entry = self
            .buckets
            .iter_mut()
            .flat_map(|bucket| bucket.iter_mut())
            .find(|entry| entry.id == id)
            .ok_or_else(|| internal_error(format!("No symbol table entry for {:?}", id)))?;

        debug!(name = %entry.name, variant = payload.variant_name(), "classify symbol");
        entry.payload = Some(payload);
        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// P. J. Weinberger's hash, reduced to a bucket index.
fn hashpjw(name: &str) -> usize {
    let mut h: u32 = 0;
    for byte in name.bytes() {
        h = (h << 4).wrapping_add(u32::from(byte));
        let g = h & 0xf000_0000;
        if g != 0 {
            h ^= g >> 24;
            h ^= g;
        }
    }
    (h % TABLE_SIZE as u32) as usize
}
