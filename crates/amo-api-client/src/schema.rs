//! Response schema validation
//!
//! Each endpoint's response is checked against an explicit shape before it
//! is decoded into a model. Values are never coerced: a string `"true"` is
//! not a boolean and `42.5` is not a version id. Keys not listed in a shape
//! are ignored.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON type a field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Boolean,
    Number,
    Object,
}

impl FieldType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Number => value.is_number(),
            FieldType::Object => value.is_object(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Number => "number",
            FieldType::Object => "object",
        }
    }
}

/// One expected field of a response object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    /// `null` is accepted in place of `ty`
    pub nullable: bool,
    /// The key may be absent
    pub optional: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            optional: false,
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }
}

/// Expected structure of a response body
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Why a body did not conform to a shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeMismatch {
    #[error("{shape}: expected an object, found {found}")]
    NotAnObject {
        shape: &'static str,
        found: &'static str,
    },

    #[error("{shape}: missing field `{field}`")]
    MissingField {
        shape: &'static str,
        field: &'static str,
    },

    #[error("{shape}: field `{field}` must be {expected}, found {found}")]
    WrongType {
        shape: &'static str,
        field: &'static str,
        expected: String,
        found: &'static str,
    },

    #[error("{shape}: {details}")]
    Decode { shape: &'static str, details: String },
}

/// `{ uuid, processed, valid, validation }`
pub const UPLOAD_SHAPE: Shape = Shape {
    name: "Upload",
    fields: &[
        FieldSpec::required("uuid", FieldType::String),
        FieldSpec::required("processed", FieldType::Boolean),
        FieldSpec::required("valid", FieldType::Boolean),
        FieldSpec::required("validation", FieldType::Object).nullable(),
    ],
};

/// `{ id }`
pub const VERSION_SHAPE: Shape = Shape {
    name: "Version",
    fields: &[FieldSpec::required("id", FieldType::Number)],
};

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Shape {
    /// Check a body against this shape.
    pub fn check(&self, body: &Value) -> Result<(), ShapeMismatch> {
        let object = body.as_object().ok_or(ShapeMismatch::NotAnObject {
            shape: self.name,
            found: kind_of(body),
        })?;

        for field in self.fields {
            match object.get(field.name) {
                None if field.optional => {}
                None => {
                    return Err(ShapeMismatch::MissingField {
                        shape: self.name,
                        field: field.name,
                    })
                }
                Some(Value::Null) if field.nullable => {}
                Some(value) if field.ty.matches(value) => {}
                Some(value) => {
                    let expected = if field.nullable {
                        format!("{} or null", field.ty.name())
                    } else {
                        field.ty.name().to_string()
                    };
                    return Err(ShapeMismatch::WrongType {
                        shape: self.name,
                        field: field.name,
                        expected,
                        found: kind_of(value),
                    });
                }
            }
        }

        Ok(())
    }

    /// Check a body, then decode it into a model.
    pub fn decode<T: DeserializeOwned>(&self, body: &Value) -> Result<T, ShapeMismatch> {
        self.check(body)?;
        T::deserialize(body).map_err(|err| ShapeMismatch::Decode {
            shape: self.name,
            details: err.to_string(),
        })
    }
}
