// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cell values read from a tab and scalars written into one.

use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// A cell as typed by the spreadsheet API.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
	Blank,
	Bool(bool),
	Number(Number),
	Text(String),
}

impl CellValue {
	/// Interpret one cell of an unformatted values response.
	///
	/// Empty strings are the API's spelling of an empty cell inside the data
	/// range and become [`CellValue::Blank`].
	pub fn from_json(value: &Value) -> Self {
		match value {
			Value::Null => CellValue::Blank,
			Value::Bool(b) => CellValue::Bool(*b),
			Value::Number(n) => CellValue::Number(n.clone()),
			Value::String(s) if s.is_empty() => CellValue::Blank,
			Value::String(s) => CellValue::Text(s.clone()),
			other => CellValue::Text(other.to_string()),
		}
	}

	pub fn is_blank(&self) -> bool {
		matches!(self, CellValue::Blank)
	}

	/// Text used when the cell serves as a column header.
	pub fn as_header(&self) -> String {
		match self {
			CellValue::Blank => String::new(),
			CellValue::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
			CellValue::Number(n) => n.to_string(),
			CellValue::Text(s) => s.clone(),
		}
	}
}

impl Serialize for CellValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			CellValue::Blank => serializer.serialize_str(""),
			CellValue::Bool(b) => serializer.serialize_bool(*b),
			CellValue::Number(n) => n.serialize(serializer),
			CellValue::Text(s) => serializer.serialize_str(s),
		}
	}
}

/// One value of a query result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
}

impl Scalar {
	/// Coerce to a JSON value the grid update accepts.
	///
	/// `Null` becomes an empty string so the target cell is cleared rather
	/// than skipped; non-finite floats fall back to their text form.
	pub fn to_grid_value(&self) -> Value {
		match self {
			Scalar::Null => Value::String(String::new()),
			Scalar::Bool(b) => Value::Bool(*b),
			Scalar::Int(i) => Value::Number((*i).into()),
			Scalar::Float(f) => Number::from_f64(*f)
				.map(Value::Number)
				.unwrap_or_else(|| Value::String(f.to_string())),
			Scalar::Text(s) => Value::String(s.clone()),
		}
	}
}

impl From<bool> for Scalar {
	fn from(value: bool) -> Self {
		Scalar::Bool(value)
	}
}

impl From<i64> for Scalar {
	fn from(value: i64) -> Self {
		Scalar::Int(value)
	}
}

impl From<f64> for Scalar {
	fn from(value: f64) -> Self {
		Scalar::Float(value)
	}
}

impl From<&str> for Scalar {
	fn from(value: &str) -> Self {
		Scalar::Text(value.to_string())
	}
}

impl From<String> for Scalar {
	fn from(value: String) -> Self {
		Scalar::Text(value)
	}
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Scalar::Null)
	}
}
