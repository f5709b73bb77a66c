//! Conversion between [`Value`]s and JSON.
//!
//! JSON numbers do not say which integer width they are, and JSON objects do
//! not keep field order, so converting from JSON is guided by a [`Schema`].

use serde_json::{Map, Number, Value as Json};

use crate::{
	schema::{Arity, ElementType, FieldType, ScalarType, Schema, StructDef},
	Error, Result, Value,
};

/// Convert a [`Value`] to JSON.
///
/// Records become objects, lists become arrays. Non-finite floats, which JSON
/// cannot represent, become `null`.
pub fn value_to_json(value: &Value) -> Json {
	match value {
		Value::Bool(v) => Json::Bool(*v),
		Value::U8(v) => Json::from(*v),
		Value::I8(v) => Json::from(*v),
		Value::U16(v) => Json::from(*v),
		Value::I16(v) => Json::from(*v),
		Value::U32(v) => Json::from(*v),
		Value::I32(v) => Json::from(*v),
		Value::U64(v) => Json::from(*v),
		Value::I64(v) => Json::from(*v),
		Value::Float(v) => Number::from_f64(f64::from(*v)).map_or(Json::Null, Json::Number),
		Value::String(v) => Json::String(v.clone()),
		Value::List(values) => Json::Array(values.iter().map(value_to_json).collect()),
		Value::Record(fields) => Json::Object(
			fields
				.iter()
				.map(|(name, value)| (name.clone(), value_to_json(value)))
				.collect::<Map<_, _>>(),
		),
	}
}

impl Schema {
	/// Convert JSON object to a [`Value`] of struct `name`.
	///
	/// Every field of the struct must be present, with a value in range for its
	/// type. Keys the struct does not define are rejected.
	pub fn value_from_json(&self, name: &str, json: &Json) -> Result<Value> {
		self.record_from_json(self.struct_def(name)?, json, name)
	}

	fn record_from_json(&self, def: &StructDef, json: &Json, path: &str) -> Result<Value> {
		let object = json
			.as_object()
			.ok_or_else(|| Error::mismatch(path, format!("expected object for `{}`", def.name)))?;

		if let Some(key) = object.keys().find(|key| def.field(key).is_none()) {
			return Err(Error::mismatch(
				path,
				format!("`{}` has no field `{key}`", def.name),
			));
		}

		let mut fields = Vec::with_capacity(def.fields.len());
		for field in &def.fields {
			let field_path = format!("{path}.{}", field.name);
			let json = object
				.get(&field.name)
				.ok_or_else(|| Error::mismatch(&field_path, "missing field"))?;
			fields.push((field.name.clone(), self.field_from_json(&field.ty, json, &field_path)?));
		}
		Ok(Value::Record(fields))
	}

	fn field_from_json(&self, ty: &FieldType, json: &Json, path: &str) -> Result<Value> {
		if ty.arity == Arity::Single {
			return self.element_from_json(&ty.element, json, path);
		}

		let array = json
			.as_array()
			.ok_or_else(|| Error::mismatch(path, format!("expected array of {}", ty.element)))?;
		if let Arity::Fixed(len) = ty.arity {
			if array.len() != len {
				return Err(Error::mismatch(
					path,
					format!("expected {len} elements, found {}", array.len()),
				));
			}
		}

		array
			.iter()
			.enumerate()
			.map(|(index, json)| self.element_from_json(&ty.element, json, &format!("{path}[{index}]")))
			.collect::<Result<Vec<_>>>()
			.map(Value::List)
	}

	fn element_from_json(&self, element: &ElementType, json: &Json, path: &str) -> Result<Value> {
		match element {
			ElementType::Scalar(ty) => scalar_from_json(*ty, json, path),
			ElementType::Struct(name) => self.record_from_json(self.struct_def(name)?, json, path),
		}
	}
}

fn scalar_from_json(ty: ScalarType, json: &Json, path: &str) -> Result<Value> {
	let mismatch = || Error::mismatch(path, format!("expected {ty}, found {json}"));

	let value = match ty {
		ScalarType::Bool => Value::Bool(json.as_bool().ok_or_else(mismatch)?),
		ScalarType::String => Value::String(json.as_str().ok_or_else(mismatch)?.to_string()),
		ScalarType::Float => Value::Float(json.as_f64().ok_or_else(mismatch)? as f32),
		ScalarType::U8 => Value::U8(unsigned(json).ok_or_else(mismatch)?),
		ScalarType::U16 => Value::U16(unsigned(json).ok_or_else(mismatch)?),
		ScalarType::U32 => Value::U32(unsigned(json).ok_or_else(mismatch)?),
		ScalarType::U64 => Value::U64(unsigned(json).ok_or_else(mismatch)?),
		ScalarType::I8 => Value::I8(signed(json).ok_or_else(mismatch)?),
		ScalarType::I16 => Value::I16(signed(json).ok_or_else(mismatch)?),
		ScalarType::I32 => Value::I32(signed(json).ok_or_else(mismatch)?),
		ScalarType::I64 => Value::I64(signed(json).ok_or_else(mismatch)?),
	};
	Ok(value)
}

fn unsigned<T: TryFrom<u64>>(json: &Json) -> Option<T> {
	json.as_u64().and_then(|n| T::try_from(n).ok())
}

fn signed<T: TryFrom<i64>>(json: &Json) -> Option<T> {
	json.as_i64().and_then(|n| T::try_from(n).ok())
}
