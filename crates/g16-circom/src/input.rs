//! Input-assignment parsing.
//!
//! The wire format is the one the reference tooling emits: a JSON object
//! mapping each signal name to an array of base-10 values, e.g.
//! `{"a": ["3"], "path": ["1", "0", "1"]}`.

use std::collections::HashMap;
use std::str::FromStr;

use num_bigint::BigInt;

use crate::error::WitnessError;
use crate::witness::InputAssignment;

pub fn parse_input_json(json: &str) -> Result<InputAssignment, WitnessError> {
    let raw: HashMap<String, Vec<String>> =
        serde_json::from_str(json).map_err(|e| WitnessError::InvalidInput(e.to_string()))?;

    raw.into_iter()
        .map(|(name, values)| {
            let parsed = values
                .iter()
                .map(|s| {
                    BigInt::from_str(s.trim()).map_err(|_| {
                        WitnessError::InvalidInput(format!(
                            "signal `{name}`: not a base-10 integer: {s:?}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((name, parsed))
        })
        .collect()
}
