//! Anchor-style interface description documents.
//!
//! Only the parts needed to decode events are modelled: the `events` list,
//! the `types` table and the type grammar they share. Both the older layout
//! (event fields inline, discriminator derived from the name) and the newer
//! one (explicit discriminator, fields in `types`) are accepted.

use crate::{DecodeError, DecodeResult};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// Length of an event discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Event discriminator bytes.
pub type Discriminator = [u8; DISCRIMINATOR_LEN];

/// Discriminator of an event named `name`: `sha256("event:<name>")[..8]`.
pub fn event_discriminator(name: &str) -> Discriminator {
    let digest = Sha256::digest(format!("event:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Parsed interface description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Idl {
    /// Program name, when present
    #[serde(default)]
    pub name: Option<String>,
    /// Declared events
    #[serde(default)]
    pub events: Vec<IdlEvent>,
    /// Named types referenced through `defined`
    #[serde(default)]
    pub types: Vec<IdlTypeDef>,
}

/// One declared event.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlEvent {
    /// Event name
    pub name: String,
    /// Inline fields; empty when the layout lives in `types`
    #[serde(default)]
    pub fields: Vec<IdlField>,
    /// Explicit discriminator
    #[serde(default)]
    pub discriminator: Option<Vec<u8>>,
}

/// Named, typed field.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    /// Field name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub ty: IdlType,
}

/// Entry of the `types` table.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlTypeDef {
    /// Type name
    pub name: String,
    /// Type body
    #[serde(rename = "type")]
    pub ty: IdlTypeDefBody,
}

/// Struct or enum body.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IdlTypeDefBody {
    /// Fields laid out in order
    Struct {
        /// Named or tuple fields
        #[serde(default)]
        fields: IdlFields,
    },
    /// One-byte variant index followed by the variant's fields
    Enum {
        /// Variants in index order
        variants: Vec<IdlEnumVariant>,
    },
}

/// Enum variant.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlEnumVariant {
    /// Variant name
    pub name: String,
    /// Variant payload, if any
    #[serde(default)]
    pub fields: IdlFields,
}

/// Named or positional fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdlFields {
    /// `{ "name": .., "type": .. }` entries
    Named(Vec<IdlField>),
    /// Bare types
    Tuple(Vec<IdlType>),
}

impl Default for IdlFields {
    fn default() -> Self {
        IdlFields::Named(Vec::new())
    }
}

/// Type grammar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdlType {
    /// Fixed-layout scalar
    Primitive(IdlPrimitive),
    /// `u32` length followed by elements
    Vec {
        /// Element type
        vec: Box<IdlType>,
    },
    /// One-byte tag followed by the value when the tag is 1
    Option {
        /// Inner type
        option: Box<IdlType>,
    },
    /// Fixed number of elements
    Array {
        /// Element type and length
        array: (Box<IdlType>, usize),
    },
    /// Reference into the `types` table
    Defined {
        /// Referenced name
        defined: IdlDefined,
    },
}

/// `defined` reference, either a bare name or `{ "name": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdlDefined {
    /// Bare name
    Name(String),
    /// Object form
    Named {
        /// Referenced name
        name: String,
    },
}

impl IdlDefined {
    /// Referenced type name.
    pub fn name(&self) -> &str {
        match self {
            IdlDefined::Name(name) | IdlDefined::Named { name } => name,
        }
    }
}

/// Scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdlPrimitive {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    U128,
    I128,
    F32,
    F64,
    String,
    Bytes,
    #[serde(alias = "pubkey")]
    PublicKey,
}

impl Idl {
    /// Parses an IDL document.
    pub fn from_json(content: &str) -> DecodeResult<Self> {
        let idl: Idl = serde_json::from_str(content)?;
        idl.validate()?;
        Ok(idl)
    }

    /// Reads and parses an IDL file.
    pub fn from_file(path: &Path) -> DecodeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Looks up a named type.
    pub fn type_def(&self, name: &str) -> DecodeResult<&IdlTypeDef> {
        self.types
            .iter()
            .find(|def| def.name == name)
            .ok_or_else(|| DecodeError::UnknownType(name.to_string()))
    }

    /// Field layout of `event`, falling back to the type of the same name.
    pub fn event_fields<'a>(&'a self, event: &'a IdlEvent) -> DecodeResult<&'a [IdlField]> {
        if !event.fields.is_empty() {
            return Ok(event.fields.as_slice());
        }
        match self.types.iter().find(|def| def.name == event.name) {
            Some(IdlTypeDef {
                ty: IdlTypeDefBody::Struct {
                    fields: IdlFields::Named(fields),
                },
                ..
            }) => Ok(fields.as_slice()),
            Some(_) => Err(DecodeError::schema(format!(
                "event `{}` must be a struct with named fields",
                event.name
            ))),
            None => Ok(event.fields.as_slice()),
        }
    }

    /// Discriminator of every event, keyed to its index in `events`.
    pub fn discriminators(&self) -> DecodeResult<HashMap<Discriminator, usize>> {
        let mut table = HashMap::with_capacity(self.events.len());
        for (position, event) in self.events.iter().enumerate() {
            let discriminator = match &event.discriminator {
                Some(bytes) => Discriminator::try_from(bytes.as_slice()).map_err(|_| {
                    DecodeError::schema(format!(
                        "event `{}` has a {}-byte discriminator",
                        event.name,
                        bytes.len()
                    ))
                })?,
                None => event_discriminator(&event.name),
            };
            if table.insert(discriminator, position).is_some() {
                return Err(DecodeError::schema(format!(
                    "event `{}` shares its discriminator with another event",
                    event.name
                )));
            }
        }
        Ok(table)
    }

    fn validate(&self) -> DecodeResult<()> {
        self.discriminators()?;
        for event in &self.events {
            self.event_fields(event)?;
        }
        Ok(())
    }
}
