//! Borsh value reader driven by IDL types.

use crate::idl::{Idl, IdlField, IdlFields, IdlPrimitive, IdlType, IdlTypeDefBody};
use crate::{DecodeError, DecodeResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Number, Value};

/// Nesting limit for `defined` types.
const MAX_DEPTH: usize = 32;

/// Cursor over a Borsh-encoded buffer.
#[derive(Debug)]
pub struct BorshReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> BorshReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(DecodeError::Truncated {
                needed: len,
                offset: self.offset,
                remaining: self.remaining(),
            });
        }
        let out = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Length prefix of a vector, string or byte buffer.
    fn read_len(&mut self) -> DecodeResult<usize> {
        let len = self.read_u32()? as usize;
        Ok(len)
    }

    /// Decodes one value of type `ty`.
    pub fn read_value(&mut self, ty: &IdlType, idl: &Idl) -> DecodeResult<Value> {
        self.read_value_at(ty, idl, 0)
    }

    /// Decodes `fields` into a JSON object.
    pub fn read_struct(
        &mut self,
        fields: &[IdlField],
        idl: &Idl,
    ) -> DecodeResult<Map<String, Value>> {
        self.read_named(fields, idl, 0)
    }

    fn read_named(
        &mut self,
        fields: &[IdlField],
        idl: &Idl,
        depth: usize,
    ) -> DecodeResult<Map<String, Value>> {
        let mut map = Map::with_capacity(fields.len());
        for field in fields {
            let value = self.read_value_at(&field.ty, idl, depth)?;
            map.insert(field.name.clone(), value);
        }
        Ok(map)
    }

    fn read_fields(&mut self, fields: &IdlFields, idl: &Idl, depth: usize) -> DecodeResult<Value> {
        match fields {
            IdlFields::Named(named) => Ok(Value::Object(self.read_named(named, idl, depth)?)),
            IdlFields::Tuple(types) => types
                .iter()
                .map(|ty| self.read_value_at(ty, idl, depth))
                .collect::<DecodeResult<Vec<_>>>()
                .map(Value::Array),
        }
    }

    fn read_value_at(&mut self, ty: &IdlType, idl: &Idl, depth: usize) -> DecodeResult<Value> {
        match ty {
            IdlType::Primitive(primitive) => self.read_primitive(*primitive),
            IdlType::Vec { vec } => {
                let len = self.read_len()?;
                let mut items = Vec::with_capacity(len.min(self.remaining()));
                for _ in 0..len {
                    let offset = self.offset;
                    items.push(self.read_value_at(vec, idl, depth)?);
                    if self.offset == offset {
                        // Zero-sized elements cannot justify a payload-supplied length.
                        return Err(DecodeError::Truncated {
                            needed: 1,
                            offset,
                            remaining: self.remaining(),
                        });
                    }
                }
                Ok(Value::Array(items))
            }
            IdlType::Option { option } => match self.read_u8()? {
                0 => Ok(Value::Null),
                1 => self.read_value_at(option, idl, depth),
                tag => Err(DecodeError::invalid_data(format!("option tag {tag}"))),
            },
            IdlType::Array { array: (inner, len) } => (0..*len)
                .map(|_| self.read_value_at(inner, idl, depth))
                .collect::<DecodeResult<Vec<_>>>()
                .map(Value::Array),
            IdlType::Defined { defined } => {
                if depth >= MAX_DEPTH {
                    return Err(DecodeError::schema(format!(
                        "type `{}` nests deeper than {MAX_DEPTH} levels",
                        defined.name()
                    )));
                }
                let def = idl.type_def(defined.name())?;
                match &def.ty {
                    IdlTypeDefBody::Struct { fields } => self.read_fields(fields, idl, depth + 1),
                    IdlTypeDefBody::Enum { variants } => {
                        let index = self.read_u8()? as usize;
                        let variant = variants.get(index).ok_or_else(|| {
                            DecodeError::invalid_data(format!(
                                "variant {index} out of range for `{}`",
                                def.name
                            ))
                        })?;
                        let payload = self.read_fields(&variant.fields, idl, depth + 1)?;
                        let mut tagged = Map::with_capacity(1);
                        tagged.insert(variant.name.clone(), payload);
                        Ok(Value::Object(tagged))
                    }
                }
            }
        }
    }

    fn read_primitive(&mut self, primitive: IdlPrimitive) -> DecodeResult<Value> {
        let value = match primitive {
            IdlPrimitive::Bool => match self.read_u8()? {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                other => return Err(DecodeError::invalid_data(format!("bool byte {other}"))),
            },
            IdlPrimitive::U8 => json!(self.read_u8()?),
            IdlPrimitive::I8 => json!(i8::from_le_bytes(self.read_array()?)),
            IdlPrimitive::U16 => json!(u16::from_le_bytes(self.read_array()?)),
            IdlPrimitive::I16 => json!(i16::from_le_bytes(self.read_array()?)),
            IdlPrimitive::U32 => json!(self.read_u32()?),
            IdlPrimitive::I32 => json!(i32::from_le_bytes(self.read_array()?)),
            IdlPrimitive::U64 => json!(u64::from_le_bytes(self.read_array()?)),
            IdlPrimitive::I64 => json!(i64::from_le_bytes(self.read_array()?)),
            // JSON numbers stop at 64 bits.
            IdlPrimitive::U128 => {
                Value::String(u128::from_le_bytes(self.read_array()?).to_string())
            }
            IdlPrimitive::I128 => {
                Value::String(i128::from_le_bytes(self.read_array()?).to_string())
            }
            IdlPrimitive::F32 => float(f32::from_le_bytes(self.read_array()?) as f64),
            IdlPrimitive::F64 => float(f64::from_le_bytes(self.read_array()?)),
            IdlPrimitive::String => {
                let len = self.read_len()?;
                let bytes = self.read_bytes(len)?;
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| DecodeError::invalid_data(format!("string is not UTF-8: {e}")))?;
                Value::String(text.to_string())
            }
            IdlPrimitive::Bytes => {
                let len = self.read_len()?;
                Value::String(STANDARD.encode(self.read_bytes(len)?))
            }
            IdlPrimitive::PublicKey => {
                Value::String(bs58::encode(self.read_bytes(32)?).into_string())
            }
        };
        Ok(value)
    }
}

fn float(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}
