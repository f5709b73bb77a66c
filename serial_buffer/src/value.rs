//! Schema-driven values, for encoding and decoding without a Rust type.
//!
//! Bytes written by a derived [`Encode`](crate::Encode) impl can be decoded
//! into a [`Value`] with a [`Schema`] describing the same fields, and vice
//! versa. The two paths produce identical bytes.

use crate::{
	schema::{Arity, ElementType, FieldType, ScalarType, Schema, StructDef},
	sequences::MAX_EMPTY_ELEMENTS,
	Config, Decode, Encode, Error, Result, SerialBuffer,
};

/// Dynamically-typed value of a schema field.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	Bool(bool),
	U8(u8),
	I8(i8),
	U16(u16),
	I16(i16),
	U32(u32),
	I32(i32),
	U64(u64),
	I64(i64),
	Float(f32),
	String(String),
	/// Elements of a fixed-length array or variable-length sequence
	List(Vec<Value>),
	/// Fields of a struct, in schema order
	Record(Vec<(String, Value)>),
}

impl Value {
	/// Get field of a record by name.
	pub fn get(&self, field: &str) -> Option<&Value> {
		match self {
			Value::Record(fields) => fields
				.iter()
				.find(|(name, _)| name == field)
				.map(|(_, value)| value),
			_ => None,
		}
	}

	/// Describe kind of value, for error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Bool(_) => "bool",
			Value::U8(_) => "uint8",
			Value::I8(_) => "int8",
			Value::U16(_) => "uint16",
			Value::I16(_) => "int16",
			Value::U32(_) => "uint32",
			Value::I32(_) => "int32",
			Value::U64(_) => "uint64",
			Value::I64(_) => "int64",
			Value::Float(_) => "float",
			Value::String(_) => "string",
			Value::List(_) => "list",
			Value::Record(_) => "record",
		}
	}

	/// Zero value of a scalar type.
	pub fn zero(ty: ScalarType) -> Self {
		match ty {
			ScalarType::Bool => Value::Bool(false),
			ScalarType::U8 => Value::U8(0),
			ScalarType::I8 => Value::I8(0),
			ScalarType::U16 => Value::U16(0),
			ScalarType::I16 => Value::I16(0),
			ScalarType::U32 => Value::U32(0),
			ScalarType::I32 => Value::I32(0),
			ScalarType::U64 => Value::U64(0),
			ScalarType::I64 => Value::I64(0),
			ScalarType::Float => Value::Float(0.0),
			ScalarType::String => Value::String(String::new()),
		}
	}
}

impl Schema {
	/// Decode bytes holding one struct `name`.
	///
	/// Schema is [validated](Schema::validate) first.
	pub fn decode_value(&self, name: &str, bytes: &[u8], config: Config) -> Result<Value> {
		let mut buffer = SerialBuffer::begin_read(bytes, config);
		let value = self.decode_value_from(name, &mut buffer)?;
		match buffer.remaining() {
			0 => Ok(value),
			remaining => Err(Error::TrailingBytes { remaining }),
		}
	}

	/// Decode struct `name` from `buffer`, leaving any following bytes unread.
	///
	/// Schema is [validated](Schema::validate) first.
	pub fn decode_value_from(&self, name: &str, buffer: &mut SerialBuffer) -> Result<Value> {
		self.validate()?;
		self.decode_record(self.struct_def(name)?, buffer)
	}

	/// Encode `value` as struct `name`.
	///
	/// `value` must have exactly the shape the schema describes, or
	/// [`Error::SchemaMismatch`] is returned.
	pub fn encode_value(&self, name: &str, value: &Value, config: Config) -> Result<Vec<u8>> {
		let mut buffer = SerialBuffer::begin_write(config);
		self.encode_value_into(name, value, &mut buffer)?;
		Ok(buffer.finish())
	}

	/// Encode `value` as struct `name` into `buffer`.
	///
	/// Schema is [validated](Schema::validate) first.
	/// On error, `buffer` may contain a partial encoding.
	pub fn encode_value_into(&self, name: &str, value: &Value, buffer: &mut SerialBuffer) -> Result<()> {
		self.validate()?;
		let def = self.struct_def(name)?;
		self.encode_record(def, value, buffer, name)
	}

	/// Get value of struct `name` with every scalar zero, every string and
	/// sequence empty, and every fixed-length array filled with zero values.
	pub fn default_value(&self, name: &str) -> Result<Value> {
		self.validate()?;
		self.default_record(self.struct_def(name)?)
	}

	fn decode_record(&self, def: &StructDef, buffer: &mut SerialBuffer) -> Result<Value> {
		let mut fields = Vec::with_capacity(def.fields.len());
		for field in &def.fields {
			let value = self.decode_field(&field.ty, buffer)?;
			fields.push((field.name.clone(), value));
		}
		Ok(Value::Record(fields))
	}

	fn decode_field(&self, ty: &FieldType, buffer: &mut SerialBuffer) -> Result<Value> {
		let len = match ty.arity {
			Arity::Single => return self.decode_element(&ty.element, buffer),
			Arity::Fixed(len) => len,
			Arity::Dynamic => buffer.read_len()?,
		};

		let mut values = Vec::with_capacity(len.min(buffer.remaining()));
		let start = buffer.position();
		for _ in 0..len {
			values.push(self.decode_element(&ty.element, buffer)?);
			if len > MAX_EMPTY_ELEMENTS && buffer.position() == start {
				return Err(Error::invalid_data(format!(
					"{len} elements of `{}` which occupy no bytes",
					ty.element
				)));
			}
		}
		Ok(Value::List(values))
	}

	fn decode_element(&self, element: &ElementType, buffer: &mut SerialBuffer) -> Result<Value> {
		let ty = match element {
			ElementType::Scalar(ty) => ty,
			ElementType::Struct(name) => return self.decode_record(self.struct_def(name)?, buffer),
		};

		Ok(match ty {
			ScalarType::Bool => Value::Bool(bool::decode_from(buffer)?),
			ScalarType::U8 => Value::U8(u8::decode_from(buffer)?),
			ScalarType::I8 => Value::I8(i8::decode_from(buffer)?),
			ScalarType::U16 => Value::U16(u16::decode_from(buffer)?),
			ScalarType::I16 => Value::I16(i16::decode_from(buffer)?),
			ScalarType::U32 => Value::U32(u32::decode_from(buffer)?),
			ScalarType::I32 => Value::I32(i32::decode_from(buffer)?),
			ScalarType::U64 => Value::U64(u64::decode_from(buffer)?),
			ScalarType::I64 => Value::I64(i64::decode_from(buffer)?),
			ScalarType::Float => Value::Float(f32::decode_from(buffer)?),
			ScalarType::String => Value::String(String::decode_from(buffer)?),
		})
	}

	fn encode_record(
		&self,
		def: &StructDef,
		value: &Value,
		buffer: &mut SerialBuffer,
		path: &str,
	) -> Result<()> {
		let Value::Record(fields) = value else {
			return Err(Error::mismatch(
				path,
				format!("expected record `{}`, found {}", def.name, value.kind()),
			));
		};
		if fields.len() != def.fields.len() {
			return Err(Error::mismatch(
				path,
				format!(
					"expected {} fields for `{}`, found {}",
					def.fields.len(),
					def.name,
					fields.len()
				),
			));
		}

		for (field, (name, value)) in def.fields.iter().zip(fields) {
			let field_path = format!("{path}.{}", field.name);
			if *name != field.name {
				return Err(Error::mismatch(
					field_path,
					format!("expected field `{}`, found `{name}`", field.name),
				));
			}
			self.encode_field(&field.ty, value, buffer, &field_path)?;
		}
		Ok(())
	}

	fn encode_field(
		&self,
		ty: &FieldType,
		value: &Value,
		buffer: &mut SerialBuffer,
		path: &str,
	) -> Result<()> {
		let values = match (ty.arity, value) {
			(Arity::Single, _) => return self.encode_element(&ty.element, value, buffer, path),
			(Arity::Fixed(len), Value::List(values)) => {
				if values.len() != len {
					return Err(Error::mismatch(
						path,
						format!("expected {len} elements, found {}", values.len()),
					));
				}
				values
			}
			(Arity::Dynamic, Value::List(values)) => {
				buffer.write_len(values.len());
				values
			}
			(_, value) => {
				return Err(Error::mismatch(
					path,
					format!("expected list of {}, found {}", ty.element, value.kind()),
				));
			}
		};

		for (index, value) in values.iter().enumerate() {
			self.encode_element(&ty.element, value, buffer, &format!("{path}[{index}]"))?;
		}
		Ok(())
	}

	fn encode_element(
		&self,
		element: &ElementType,
		value: &Value,
		buffer: &mut SerialBuffer,
		path: &str,
	) -> Result<()> {
		let ty = match element {
			ElementType::Scalar(ty) => *ty,
			ElementType::Struct(name) => {
				return self.encode_record(self.struct_def(name)?, value, buffer, path);
			}
		};

		match (ty, value) {
			(ScalarType::Bool, Value::Bool(v)) => v.encode_into(buffer),
			(ScalarType::U8, Value::U8(v)) => v.encode_into(buffer),
			(ScalarType::I8, Value::I8(v)) => v.encode_into(buffer),
			(ScalarType::U16, Value::U16(v)) => v.encode_into(buffer),
			(ScalarType::I16, Value::I16(v)) => v.encode_into(buffer),
			(ScalarType::U32, Value::U32(v)) => v.encode_into(buffer),
			(ScalarType::I32, Value::I32(v)) => v.encode_into(buffer),
			(ScalarType::U64, Value::U64(v)) => v.encode_into(buffer),
			(ScalarType::I64, Value::I64(v)) => v.encode_into(buffer),
			(ScalarType::Float, Value::Float(v)) => v.encode_into(buffer),
			(ScalarType::String, Value::String(v)) => v.encode_into(buffer),
			(ty, value) => {
				return Err(Error::mismatch(
					path,
					format!("expected {ty}, found {}", value.kind()),
				));
			}
		}
		Ok(())
	}

	fn default_record(&self, def: &StructDef) -> Result<Value> {
		let fields = def
			.fields
			.iter()
			.map(|field| Ok((field.name.clone(), self.default_field(&field.ty)?)))
			.collect::<Result<Vec<_>>>()?;
		Ok(Value::Record(fields))
	}

	fn default_field(&self, ty: &FieldType) -> Result<Value> {
		match ty.arity {
			Arity::Single => self.default_element(&ty.element),
			Arity::Fixed(len) => {
				let element = self.default_element(&ty.element)?;
				Ok(Value::List(vec![element; len]))
			}
			Arity::Dynamic => Ok(Value::List(Vec::new())),
		}
	}

	fn default_element(&self, element: &ElementType) -> Result<Value> {
		match element {
			ElementType::Scalar(ty) => Ok(Value::zero(*ty)),
			ElementType::Struct(name) => self.default_record(self.struct_def(name)?),
		}
	}
}
