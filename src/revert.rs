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

use ethcontract::web3::ethabi::{self, param_type::ParamType, Token};

/// Selector of the `Error(string)` revert payload solidity emits for
/// `require`/`revert` with a message.
const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

pub fn decode_revert_reason(revert_data: &[u8]) -> Option<String> {
  let bytes = revert_data.strip_prefix(&ERROR_SELECTOR)?;
  let mut tokens = ethabi::decode(&[ParamType::String], bytes).ok()?;
  match tokens.pop() {
    Some(Token::String(value)) if tokens.is_empty() => Some(value),
    _ => None,
  }
}
