use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::errors::{FieldViolation, ModelError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The four caller-supplied fields of a product. Used for both create and
/// full-overwrite update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: i32,
    pub quantity: i32,
}

impl ProductInput {
    /// Overwrite every mutable column of `am`; the primary key is untouched.
    pub fn apply_to(self, am: &mut ActiveModel) {
        am.name = Set(self.name);
        am.description = Set(self.description);
        am.price = Set(self.price);
        am.quantity = Set(self.quantity);
    }

    pub fn into_model(self, id: i32) -> Model {
        Model {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

impl From<ProductInput> for ActiveModel {
    fn from(input: ProductInput) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            quantity: Set(input.quantity),
        }
    }
}

/// Check a decoded JSON body against the product input shape.
///
/// Every problem is collected so the caller can report all of them at once.
/// Unknown keys are ignored.
pub fn validate_payload(value: &JsonValue) -> Result<ProductInput, ModelError> {
    let Some(obj) = value.as_object() else {
        return Err(ModelError::Validation(vec![FieldViolation::new(
            "model_attributes_type",
            &["body"],
            "Input should be a valid dictionary or object",
        )
        .with_input(value.clone())]));
    };

    let mut violations = Vec::new();
    let name = require_string(obj, "name", &mut violations);
    let description = require_string(obj, "description", &mut violations);
    let price = require_i32(obj, "price", &mut violations);
    let quantity = require_i32(obj, "quantity", &mut violations);

    match (name, description, price, quantity) {
        (Some(name), Some(description), Some(price), Some(quantity)) => {
            Ok(ProductInput { name, description, price, quantity })
        }
        _ => Err(ModelError::Validation(violations)),
    }
}

/// An integer written as text, such as a path segment or a quoted body value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInt {
    Value(i32),
    /// Well-formed, but does not fit an `INTEGER` column.
    OutOfRange,
    NotInteger,
}

pub fn parse_int_text(raw: &str) -> ParsedInt {
    let s = raw.trim();
    if let Ok(v) = s.parse::<i64>() {
        return i32::try_from(v).map_or(ParsedInt::OutOfRange, ParsedInt::Value);
    }
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        ParsedInt::OutOfRange
    } else {
        ParsedInt::NotInteger
    }
}

pub const INT_PARSING_MSG: &str = "Input should be a valid integer, unable to parse string as an integer";

fn missing(obj: &Map<String, JsonValue>, field: &str) -> FieldViolation {
    FieldViolation::new("missing", &["body", field], "Field required").with_input(JsonValue::Object(obj.clone()))
}

fn require_string(obj: &Map<String, JsonValue>, field: &str, out: &mut Vec<FieldViolation>) -> Option<String> {
    match obj.get(field) {
        None => {
            out.push(missing(obj, field));
            None
        }
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(other) => {
            out.push(
                FieldViolation::new("string_type", &["body", field], "Input should be a valid string")
                    .with_input(other.clone()),
            );
            None
        }
    }
}

fn require_i32(obj: &Map<String, JsonValue>, field: &str, out: &mut Vec<FieldViolation>) -> Option<i32> {
    let Some(raw) = obj.get(field) else {
        out.push(missing(obj, field));
        return None;
    };

    let parsed = match raw {
        JsonValue::Number(n) => number_to_i32(n),
        // Quoted integers such as "2" are accepted, as lax-mode validators do.
        JsonValue::String(s) => match parse_int_text(s) {
            ParsedInt::Value(v) => Ok(v),
            ParsedInt::OutOfRange => Err(out_of_range()),
            ParsedInt::NotInteger => Err(("int_parsing", INT_PARSING_MSG.to_string())),
        },
        _ => Err(("int_type", "Input should be a valid integer".to_string())),
    };

    match parsed {
        Ok(v) => Some(v),
        Err((kind, msg)) => {
            out.push(FieldViolation::new(kind, &["body", field], msg).with_input(raw.clone()));
            None
        }
    }
}

fn out_of_range() -> (&'static str, String) {
    ("int_out_of_range", format!("Input should be between {} and {}", i32::MIN, i32::MAX))
}

fn number_to_i32(n: &serde_json::Number) -> Result<i32, (&'static str, String)> {
    if let Some(v) = n.as_i64() {
        return i32::try_from(v).map_err(|_| out_of_range());
    }
    if n.is_u64() {
        return Err(out_of_range());
    }
    // Floats are accepted only when they carry no fractional part, e.g. `2.0`.
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => Ok(f as i32),
        Some(f) if f.fract() == 0.0 => Err(out_of_range()),
        _ => Err((
            "int_from_float",
            "Input should be a valid integer, got a number with a fractional part".to_string(),
        )),
    }
}
