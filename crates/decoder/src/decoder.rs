//! Event decoders.

use crate::borsh::BorshReader;
use crate::idl::{Discriminator, Idl, DISCRIMINATOR_LEN};
use crate::DecodeResult;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A decoded event.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    /// Event name from the schema
    pub name: String,
    /// Field values by name
    pub data: Map<String, Value>,
}

impl DecodedEvent {
    /// Value of field `name`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }
}

/// Turns a raw event payload into a named record.
pub trait EventDecoder: Send + Sync {
    /// Decodes `raw`, or returns `Ok(None)` when the payload is not an event
    /// this decoder knows.
    fn decode(&self, raw: &str) -> DecodeResult<Option<DecodedEvent>>;
}

/// Decoder for base64 Borsh payloads described by an [`Idl`].
#[derive(Debug, Clone)]
pub struct IdlEventDecoder {
    idl: Idl,
    discriminators: HashMap<Discriminator, usize>,
}

impl IdlEventDecoder {
    /// Builds the discriminator table for `idl`.
    pub fn new(idl: Idl) -> DecodeResult<Self> {
        let discriminators = idl.discriminators()?;
        Ok(Self {
            idl,
            discriminators,
        })
    }

    /// Schema in use.
    pub fn idl(&self) -> &Idl {
        &self.idl
    }
}

impl EventDecoder for IdlEventDecoder {
    fn decode(&self, raw: &str) -> DecodeResult<Option<DecodedEvent>> {
        let Ok(bytes) = STANDARD.decode(raw.trim()) else {
            return Ok(None);
        };
        if bytes.len() < DISCRIMINATOR_LEN {
            return Ok(None);
        }
        let (head, body) = bytes.split_at(DISCRIMINATOR_LEN);
        let Some(&position) = Discriminator::try_from(head)
            .ok()
            .and_then(|d| self.discriminators.get(&d))
        else {
            return Ok(None);
        };

        let event = &self.idl.events[position];
        let fields = self.idl.event_fields(event)?;
        let data = BorshReader::new(body).read_struct(fields, &self.idl)?;
        Ok(Some(DecodedEvent {
            name: event.name.clone(),
            data,
        }))
    }
}
