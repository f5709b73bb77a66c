//! Text description of record layouts.
//!
//! A schema lists structs and their fields in declared order, which is all a
//! reader needs to decode bytes without a matching Rust type
//! (see [`Value`](crate::Value)).
//!
//! ```text
//! import shared_types          # imports are recorded, not resolved
//!
//! struct Other:
//!     string  name
//!     bool    is_enabled
//!     uint64  stride_bytes
//!
//! struct Sample:
//!     uint32[]   ipv4_addresses    # variable-length sequence
//!     uint32[8]  banana_indexes    # fixed-length array
//!     Other      parent_obj        # nested record
//!     Other[]    children_objs
//! ```
//!
//! * `#` starts a comment. Blank lines are ignored.
//! * An unindented line starts either an `import <name>` or a
//!   `struct <Name>:` block. Indented lines following `struct` are its fields,
//!   `<type> <name>`.
//! * Built-in types: `bool`, `uint8`, `int8`, `uint16`, `int16`, `uint32`,
//!   `int32`, `uint64`, `int64`, `float`, `string`. Any other type name refers
//!   to a struct.

use std::{collections::HashSet, fmt, fs, path::Path, str::FromStr};

use tracing::debug;

use crate::{Error, Result};

/// Largest number of values a struct may hold outside variable-length
/// sequences, counting each nested record and every element of fixed-length
/// arrays.
pub const MAX_FIXED_ELEMENTS: usize = 1 << 20;

/// Built-in field types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
	Bool,
	U8,
	I8,
	U16,
	I16,
	U32,
	I32,
	U64,
	I64,
	Float,
	String,
}

impl ScalarType {
	pub const ALL: [ScalarType; 11] = [
		ScalarType::Bool,
		ScalarType::U8,
		ScalarType::I8,
		ScalarType::U16,
		ScalarType::I16,
		ScalarType::U32,
		ScalarType::I32,
		ScalarType::U64,
		ScalarType::I64,
		ScalarType::Float,
		ScalarType::String,
	];

	/// Get name of type as written in schema text.
	pub const fn name(self) -> &'static str {
		match self {
			ScalarType::Bool => "bool",
			ScalarType::U8 => "uint8",
			ScalarType::I8 => "int8",
			ScalarType::U16 => "uint16",
			ScalarType::I16 => "int16",
			ScalarType::U32 => "uint32",
			ScalarType::I32 => "int32",
			ScalarType::U64 => "uint64",
			ScalarType::I64 => "int64",
			ScalarType::Float => "float",
			ScalarType::String => "string",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|ty| ty.name() == name)
	}

	/// Get encoded size in bytes. `None` for `string`, whose size depends on
	/// its content.
	pub const fn size(self) -> Option<usize> {
		match self {
			ScalarType::Bool | ScalarType::U8 | ScalarType::I8 => Some(1),
			ScalarType::U16 | ScalarType::I16 => Some(2),
			ScalarType::U32 | ScalarType::I32 | ScalarType::Float => Some(4),
			ScalarType::U64 | ScalarType::I64 => Some(8),
			ScalarType::String => None,
		}
	}
}

impl fmt::Display for ScalarType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Type of a single element of a field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
	Scalar(ScalarType),
	Struct(String),
}

impl fmt::Display for ElementType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ElementType::Scalar(ty) => ty.fmt(f),
			ElementType::Struct(name) => f.write_str(name),
		}
	}
}

/// How many elements a field holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
	/// A single element. `T`
	Single,
	/// Fixed number of elements, with no count prefix. `T[N]`
	Fixed(usize),
	/// Count-prefixed sequence of elements. `T[]`
	Dynamic,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldType {
	pub element: ElementType,
	pub arity: Arity,
}

impl FieldType {
	pub fn single(element: ElementType) -> Self {
		FieldType {
			element,
			arity: Arity::Single,
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.arity {
			Arity::Single => write!(f, "{}", self.element),
			Arity::Fixed(len) => write!(f, "{}[{}]", self.element, len),
			Arity::Dynamic => write!(f, "{}[]", self.element),
		}
	}
}

impl FromStr for FieldType {
	type Err = String;

	fn from_str(token: &str) -> std::result::Result<Self, String> {
		let (stem, arity) = match token.strip_suffix(']') {
			Some(head) => {
				let open = head
					.find('[')
					.filter(|&pos| pos > 0)
					.ok_or_else(|| format!("malformed type `{token}`"))?;
				let count = head[open + 1..].trim();
				let arity = if count.is_empty() {
					Arity::Dynamic
				} else {
					match count.parse::<usize>() {
						Ok(len) if len > 0 && len <= MAX_FIXED_ELEMENTS => Arity::Fixed(len),
						_ => return Err(format!("bad array length `{count}` in `{token}`")),
					}
				};
				(&head[..open], arity)
			}
			None => (token, Arity::Single),
		};

		if !is_identifier(stem) {
			return Err(format!("malformed type `{token}`"));
		}

		let element = match ScalarType::from_name(stem) {
			Some(ty) => ElementType::Scalar(ty),
			None => ElementType::Struct(stem.to_string()),
		};
		Ok(FieldType { element, arity })
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
	pub name: String,
	pub ty: FieldType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructDef {
	pub name: String,
	/// Fields in the order they're encoded
	pub fields: Vec<FieldDef>,
}

impl StructDef {
	pub fn field(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|field| field.name == name)
	}
}

/// Parsed schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
	pub imports: Vec<String>,
	pub structs: Vec<StructDef>,
}

impl Schema {
	/// Parse schema text.
	///
	/// Only syntax is checked. Use [`validate`](Self::validate) to check that
	/// all struct references resolve.
	pub fn parse(text: &str) -> Result<Self> {
		let mut schema = Schema::default();
		// Struct currently collecting indented field lines
		let mut current: Option<StructDef> = None;

		for (index, raw_line) in text.lines().enumerate() {
			let line_num = index + 1;
			let line = match raw_line.find('#') {
				Some(pos) => &raw_line[..pos],
				None => raw_line,
			};
			let tokens: Vec<&str> = line.split_whitespace().collect();
			if tokens.is_empty() {
				continue;
			}

			let indented = line.len() != line.trim_start().len();
			if indented {
				let def = current.as_mut().ok_or_else(|| {
					Error::schema(line_num, "indented line does not belong to a struct")
				})?;
				def.fields.push(parse_field(&tokens, line_num)?);
				continue;
			}

			if let Some(def) = current.take() {
				schema.structs.push(def);
			}

			match tokens[0] {
				"import" => {
					if tokens.len() != 2 {
						return Err(Error::schema(line_num, "expected `import <name>`"));
					}
					schema.imports.push(tokens[1].to_string());
				}
				"struct" => {
					let name = match tokens.as_slice() {
						[_, name] => name.strip_suffix(':'),
						_ => None,
					}
					.ok_or_else(|| Error::schema(line_num, "expected `struct <Name>:`"))?;
					if !is_identifier(name) {
						return Err(Error::schema(line_num, format!("invalid struct name `{name}`")));
					}
					current = Some(StructDef {
						name: name.to_string(),
						fields: Vec::new(),
					});
				}
				other => {
					return Err(Error::schema(
						line_num,
						format!("expected `import` or `struct`, found `{other}`"),
					));
				}
			}
		}

		if let Some(def) = current.take() {
			schema.structs.push(def);
		}

		debug!(
			structs = schema.structs.len(),
			imports = schema.imports.len(),
			"parsed schema"
		);
		Ok(schema)
	}

	/// Read and parse a schema file.
	pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
		let text = fs::read_to_string(path.as_ref())?;
		Self::parse(&text)
	}

	/// Get a struct definition by name.
	pub fn get(&self, name: &str) -> Option<&StructDef> {
		self.structs.iter().find(|def| def.name == name)
	}

	/// Get a struct definition by name, or [`Error::UnknownStruct`].
	pub fn struct_def(&self, name: &str) -> Result<&StructDef> {
		self.get(name).ok_or_else(|| Error::UnknownStruct(name.to_string()))
	}

	/// Check schema is usable:
	///
	/// * No two structs share a name.
	/// * No two fields of a struct share a name.
	/// * Every struct a field refers to is defined.
	/// * No struct contains itself, other than via a variable-length sequence
	///   (which can be empty). Such a struct would have infinite size.
	/// * No struct holds more than [`MAX_FIXED_ELEMENTS`] values outside
	///   variable-length sequences.
	///
	/// Faults are reported as [`Error::InvalidSchema`] or
	/// [`Error::UnknownStruct`].
	pub fn validate(&self) -> Result<()> {
		let mut names = HashSet::new();
		for def in &self.structs {
			if !names.insert(def.name.as_str()) {
				return Err(Error::invalid_schema(&def.name, "struct defined more than once"));
			}

			let mut field_names = HashSet::new();
			for field in &def.fields {
				if !field_names.insert(field.name.as_str()) {
					return Err(Error::invalid_schema(
						format!("{}.{}", def.name, field.name),
						"field defined more than once",
					));
				}
				if let ElementType::Struct(name) = &field.ty.element {
					self.struct_def(name)?;
				}
			}
		}

		for def in &self.structs {
			let mut path = Vec::new();
			self.check_not_recursive(def, &mut path)?;
		}

		// Terminates, as recursion is only possible via variable-length sequences
		for def in &self.structs {
			self.fixed_elements(def)?;
		}
		Ok(())
	}

	/// Count values in struct `def` outside variable-length sequences,
	/// including the record itself.
	fn fixed_elements(&self, def: &StructDef) -> Result<usize> {
		let mut total: usize = 1;
		for field in &def.fields {
			let (count, per_element) = match (field.ty.arity, &field.ty.element) {
				(Arity::Dynamic, _) => (1, 1),
				(Arity::Single, ElementType::Scalar(_)) => (1, 1),
				(Arity::Fixed(len), ElementType::Scalar(_)) => (len, 1),
				(Arity::Single, ElementType::Struct(name)) => {
					(1, self.fixed_elements(self.struct_def(name)?)?)
				}
				(Arity::Fixed(len), ElementType::Struct(name)) => {
					(len, self.fixed_elements(self.struct_def(name)?)?)
				}
			};

			total = count
				.checked_mul(per_element)
				.and_then(|n| total.checked_add(n))
				.filter(|&n| n <= MAX_FIXED_ELEMENTS)
				.ok_or_else(|| {
					Error::invalid_schema(
						format!("{}.{}", def.name, field.name),
						format!("struct holds more than {MAX_FIXED_ELEMENTS} fixed values"),
					)
				})?;
		}
		Ok(total)
	}

	fn check_not_recursive<'a>(&'a self, def: &'a StructDef, path: &mut Vec<&'a str>) -> Result<()> {
		if path.contains(&def.name.as_str()) {
			path.push(&def.name);
			return Err(Error::invalid_schema(path.join("."), "struct contains itself"));
		}

		path.push(&def.name);
		for field in &def.fields {
			if field.ty.arity == Arity::Dynamic {
				continue;
			}
			if let ElementType::Struct(name) = &field.ty.element {
				self.check_not_recursive(self.struct_def(name)?, path)?;
			}
		}
		path.pop();
		Ok(())
	}
}

impl FromStr for Schema {
	type Err = Error;

	fn from_str(text: &str) -> Result<Self> {
		Schema::parse(text)
	}
}

fn parse_field(tokens: &[&str], line_num: usize) -> Result<FieldDef> {
	let [ty, name] = tokens else {
		return Err(Error::schema(line_num, "expected `<type> <name>`"));
	};
	if !is_identifier(name) {
		return Err(Error::schema(line_num, format!("invalid field name `{name}`")));
	}
	let ty = ty.parse::<FieldType>().map_err(|message| Error::schema(line_num, message))?;
	Ok(FieldDef {
		name: name.to_string(),
		ty,
	})
}

fn is_identifier(s: &str) -> bool {
	let mut chars = s.chars();
	match chars.next() {
		Some(c) if c.is_alphabetic() || c == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_alphanumeric() || c == '_')
}
