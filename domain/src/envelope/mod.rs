//! Tool-call response envelopes.
//!
//! A remote tool-call transport hands back a loosely-typed value whose outer
//! shape depends on the transport implementation. This module turns such an
//! envelope into one of three canonical shapes without ever failing.

mod normalizer;

pub use normalizer::{
    EnvelopePath, ExpectedShape, NormalizedValue, Payload, RawEnvelope, decode, normalize,
    normalize_list, normalize_record, normalize_text,
};
