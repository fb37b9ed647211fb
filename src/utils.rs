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

use blake3::Hasher;

use crate::global::Hash256;

/// Calculates the 256-bit BLAKE3 hash of a byte slice.
pub fn calculate_hash<T: AsRef<[u8]>>(data: T) -> Hash256 {
    let mut hasher = Hasher::new();
    hasher.update(data.as_ref());
    hasher.finalize().into()
}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_function() {
        let data = b"pando";
        let hash = calculate_hash(data);
        assert_eq!(bytes_to_hex(&hash).len(), 64);
    }

    #[test]
    fn test_bytes_to_hex() {
        let bytes: [u8; 4] = [0x1a, 0x2b, 0x3c, 0x4d];
        assert_eq!(bytes_to_hex(&bytes), "1a2b3c4d");
    }
}
