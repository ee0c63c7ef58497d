// Copyright 2021-2022 Semantic Network Ltd.
// This file is part of sentiment-deploy.

// sentiment-deploy is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// sentiment-deploy is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with sentiment-deploy.  If not, see <http://www.gnu.org/licenses/>.

use ethcontract::{
  prelude::{Address, H160, H256},
  web3::signing::keccak256,
};

pub fn zero_address() -> Address {
  H160::zero()
}

fn strip_hex_prefix(value: &str) -> &str {
  value
    .strip_prefix("0x")
    .or_else(|| value.strip_prefix("0X"))
    .unwrap_or(value)
}

// decodes exactly N bytes of hex, with or without a 0x prefix
fn decode_fixed<const N: usize>(value: &str) -> Option<[u8; N]> {
  let digits = strip_hex_prefix(value.trim());
  if digits.len() != N * 2 {
    return None;
  }
  let mut bytes = [0u8; N];
  hex::decode_to_slice(digits, &mut bytes as &mut [u8]).ok()?;
  Some(bytes)
}

/// Parses a 20-byte address. Checksum casing is not enforced.
pub fn parse_address(value: &str) -> Option<H160> {
  decode_fixed::<20>(value).map(H160)
}

pub fn parse_h256(value: &str) -> Option<H256> {
  decode_fixed::<32>(value).map(H256)
}

/// EIP-55 mixed-case rendering of an address.
pub fn to_checksum_address(address: &H160) -> String {
  let lower = hex::encode(address.as_bytes());
  let hash = keccak256(lower.as_bytes());
  let mut out = String::with_capacity(42);
  out.push_str("0x");
  for (i, c) in lower.chars().enumerate() {
    let nibble = (hash[i / 2] >> if i % 2 == 0 { 4 } else { 0 }) & 0x0f;
    if nibble >= 8 {
      out.push(c.to_ascii_uppercase());
    } else {
      out.push(c);
    }
  }
  out
}
