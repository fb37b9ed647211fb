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

pub mod defaults;

use std::sync::LazyLock;

use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::global::defaults::DEFAULT_VERBOSITY;
use crate::utils;

pub const CID_LENGTH: usize = 32;
pub type Hash256 = [u8; CID_LENGTH];

/// Global, process-wide display verbosity. Set once from the CLI's global
/// flags; never consulted for anything that affects core semantics.
pub struct GlobalOpts {
    pub verbosity: u32,
}

impl Default for GlobalOpts {
    fn default() -> Self {
        Self {
            verbosity: DEFAULT_VERBOSITY,
        }
    }
}

pub static GLOBAL_OPTS: LazyLock<RwLock<GlobalOpts>> =
    LazyLock::new(|| RwLock::new(GlobalOpts::default()));

pub fn set_verbosity(verbosity: u32) {
    GLOBAL_OPTS.write().verbosity = verbosity;
}

pub fn global_opts() -> RwLockReadGuard<'static, GlobalOpts> {
    GLOBAL_OPTS.read()
}

/// A content identifier: the BLAKE3-256 digest of an object's canonical
/// encoding. Two objects with the same CID are byte-identical.
#[derive(Hash, Clone, Eq, PartialEq, PartialOrd, Ord)]
pub struct Cid(Hash256);

impl Cid {
    pub fn from_bytes(bytes: Hash256) -> Self {
        Self(bytes)
    }

    pub fn from_content<T: AsRef<[u8]>>(data: T) -> Self {
        Self(utils::calculate_hash(data))
    }

    pub fn to_hex(&self) -> String {
        utils::bytes_to_hex(&self.0)
    }

    /// Convert to a hex string truncated to `len` bytes, for human-facing output.
    pub fn to_short_hex(&self, len: usize) -> String {
        utils::bytes_to_hex(&self.0[0..len])
    }

    fn hex_char_to_byte(c: char) -> Option<u8> {
        match c {
            '0'..='9' => Some(c as u8 - b'0'),
            'a'..='f' => Some(c as u8 - b'a' + 10),
            'A'..='F' => Some(c as u8 - b'A' + 10),
            _ => None,
        }
    }

    /// Parses a hex string into a `Cid`. Returns `None` if the string is not
    /// valid hex or not the correct length.
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        let expected_len = CID_LENGTH * 2;
        if hex_str.len() != expected_len {
            return None;
        }

        let mut bytes = [0u8; CID_LENGTH];
        let mut chars = hex_str.chars();

        for byte in bytes.iter_mut() {
            let high = Self::hex_char_to_byte(chars.next()?)?;
            let low = Self::hex_char_to_byte(chars.next()?)?;
            *byte = (high << 4) | low;
        }

        Some(Self(bytes))
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cid({})", self.to_hex())
    }
}

impl Serialize for Cid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cid::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid CID: '{s}'")))
    }
}

/// Serializes/deserializes an `Option<Cid>` as an empty string for `None`,
/// the on-disk representation of the empty-head sentinel (section 6 of the
/// workspace layout). Used by the branch registry's `serde(with = ...)`.
pub mod optional_cid {
    use super::Cid;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(cid: &Option<Cid>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match cid {
            Some(cid) => cid.to_hex().serialize(serializer),
            None => "".serialize(serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Cid>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            Ok(None)
        } else {
            Cid::from_hex(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid CID: '{s}'")))
        }
    }
}
