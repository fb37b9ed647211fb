/*
 * pando is a decentralized, content-addressed version-control core
 * Copyright (C) 2026  Javier Lancha Vázquez <javier.lancha@gmail.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! IPLD-shaped object model: `Snapshot`, `Tree`, `File`, and the codec that
//! turns them into their canonical on-wire bytes (and back).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::global::Cid;

pub const TYPE_SNAPSHOT: &str = "snapshot";
pub const TYPE_TREE: &str = "tree";
pub const TYPE_FILE: &str = "file";

/// A leaf object: a tracked path and the CID of its raw bytes in the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub path: String,
    pub link: Cid,
}

/// An immutable directory object. Children are kept in a `BTreeMap` so the
/// canonical encoding is always lexicographic by name, regardless of
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub path: String,
    pub children: BTreeMap<String, Cid>,
}

impl Tree {
    pub fn empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            children: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// An immutable commit: a tree root plus zero, one, or two parent links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub author: String,
    pub message: String,
    pub tree: Cid,
    pub parents: Vec<Cid>,
    pub timestamp: DateTime<Utc>,
}

/// The tagged union every object store node decodes into. Encode/decode
/// dispatch exhaustively matches on this rather than sniffing struct shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Snapshot(Snapshot),
    Tree(Tree),
    File(File),
}

impl Object {
    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Object::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_snapshot(&self) -> Option<&Snapshot> {
        match self {
            Object::Snapshot(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Object::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Object::Tree(_))
    }
}

/// Codec failure modes, named per the object-codec's contract. These never
/// escape the crate directly: callers that know which CID they asked for
/// wrap them into `Error::CorruptObject`.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("unknown @type '{0}'")]
    UnknownType(String),
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("malformed link in field '{0}'")]
    MalformedLink(&'static str),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

type CodecResult<T> = Result<T, CodecError>;

#[derive(Serialize, Deserialize)]
struct Link {
    #[serde(rename = "/")]
    cid: String,
}

fn encode_link(cid: &Cid) -> Value {
    serde_json::json!({ "/": cid.to_hex() })
}

fn decode_link(value: &Value, field: &'static str) -> CodecResult<Cid> {
    let link: Link =
        serde_json::from_value(value.clone()).map_err(|_| CodecError::MalformedLink(field))?;
    Cid::from_hex(&link.cid).ok_or(CodecError::MalformedLink(field))
}

fn get_field<'a>(map: &'a serde_json::Map<String, Value>, field: &'static str) -> CodecResult<&'a Value> {
    map.get(field).ok_or(CodecError::MissingField(field))
}

/// Encodes an `Object` into its canonical IPLD-shaped JSON bytes. Two
/// `Object`s that compare equal always produce byte-identical output, and
/// permuting a `Tree`'s children (a `BTreeMap`) never changes the bytes.
pub fn encode(object: &Object) -> Vec<u8> {
    let value = match object {
        Object::Snapshot(s) => {
            let parents: Vec<Value> = s.parents.iter().map(encode_link).collect();
            serde_json::json!({
                "@type": TYPE_SNAPSHOT,
                "author": s.author,
                "message": s.message,
                "timestamp": s.timestamp.timestamp(),
                "tree": encode_link(&s.tree),
                "parents": parents,
            })
        }
        Object::Tree(t) => {
            let mut map = serde_json::Map::new();
            map.insert("@type".to_string(), Value::String(TYPE_TREE.to_string()));
            map.insert("path".to_string(), Value::String(t.path.clone()));
            for (name, cid) in &t.children {
                map.insert(name.clone(), encode_link(cid));
            }
            Value::Object(map)
        }
        Object::File(f) => serde_json::json!({
            "@type": TYPE_FILE,
            "path": f.path,
            "link": encode_link(&f.link),
        }),
    };
    // `serde_json::Map` is a `BTreeMap` internally (no `preserve_order`
    // feature enabled), so key order in the output is always lexicographic.
    serde_json::to_vec(&value).expect("json values encode infallibly")
}

/// Decodes canonical IPLD-shaped JSON bytes back into an `Object`. Recurses
/// only as deep as the JSON structure itself (bounded by tree depth).
pub fn decode(bytes: &[u8]) -> CodecResult<Object> {
    let value: Value = serde_json::from_slice(bytes)?;
    let map = value.as_object().ok_or(CodecError::MissingField("@type"))?;
    let ty = get_field(map, "@type")?
        .as_str()
        .ok_or(CodecError::MissingField("@type"))?;

    match ty {
        TYPE_SNAPSHOT => {
            let author = get_field(map, "author")?
                .as_str()
                .ok_or(CodecError::MissingField("author"))?
                .to_string();
            let message = get_field(map, "message")?
                .as_str()
                .ok_or(CodecError::MissingField("message"))?
                .to_string();
            let timestamp = get_field(map, "timestamp")?
                .as_i64()
                .ok_or(CodecError::MissingField("timestamp"))?;
            let timestamp = DateTime::<Utc>::from_timestamp(timestamp, 0)
                .ok_or(CodecError::MalformedLink("timestamp"))?;
            let tree = decode_link(get_field(map, "tree")?, "tree")?;
            let parents_value = get_field(map, "parents")?
                .as_array()
                .ok_or(CodecError::MissingField("parents"))?;
            let mut parents = Vec::with_capacity(parents_value.len());
            for p in parents_value {
                parents.push(decode_link(p, "parents")?);
            }
            Ok(Object::Snapshot(Snapshot {
                author,
                message,
                tree,
                parents,
                timestamp,
            }))
        }
        TYPE_TREE => {
            let path = get_field(map, "path")?
                .as_str()
                .ok_or(CodecError::MissingField("path"))?
                .to_string();
            let mut children = BTreeMap::new();
            for (key, value) in map {
                if key == "@type" || key == "path" {
                    continue;
                }
                children.insert(key.clone(), decode_link(value, "children")?);
            }
            Ok(Object::Tree(Tree { path, children }))
        }
        TYPE_FILE => {
            let path = get_field(map, "path")?
                .as_str()
                .ok_or(CodecError::MissingField("path"))?
                .to_string();
            let link = decode_link(get_field(map, "link")?, "link")?;
            Ok(Object::File(File { path, link }))
        }
        other => Err(CodecError::UnknownType(other.to_string())),
    }
}
