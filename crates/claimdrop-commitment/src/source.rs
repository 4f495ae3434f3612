//! # Entitlement Source Format
//!
//! ```json
//! {
//!   "types": ["address", "uint"],
//!   "count": 2,
//!   "values": {
//!     "0": { "0": "0x6CA6d1e2D5347Bfab1d91e883F1915560e09129D", "1": "25000000000000000000" },
//!     "1": { "0": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "1": "25000000000000000000" }
//!   }
//! }
//! ```
//!
//! Row and field keys are decimal strings. Only the `(address, uint)` shape
//! is accepted.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use claimdrop_core::{Address, Amount};

use crate::builder::Entitlement;
use crate::error::CommitmentError;

/// The kind of value at one field position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// A 20-byte hex address.
    Address,
    /// A base-10 unsigned integer.
    Uint,
}

impl FieldType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Uint => "uint",
        }
    }
}

/// The entitlement input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementSource {
    /// Field kind at each position.
    pub types: Vec<FieldType>,
    /// Number of rows.
    pub count: usize,
    /// `values[row][field]`.
    pub values: BTreeMap<String, BTreeMap<String, String>>,
}

impl EntitlementSource {
    /// Render a list of entitlements in source form.
    pub fn from_entitlements(entries: &[Entitlement]) -> Self {
        let values = entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let row = BTreeMap::from([
                    ("0".to_string(), e.account.to_hex()),
                    ("1".to_string(), e.amount.to_string()),
                ]);
                (i.to_string(), row)
            })
            .collect();
        Self {
            types: vec![FieldType::Address, FieldType::Uint],
            count: entries.len(),
            values,
        }
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CommitmentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn load(path: &Path) -> Result<Self, CommitmentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Validate the shape and parse every row, in row order.
    pub fn entitlements(&self) -> Result<Vec<Entitlement>, CommitmentError> {
        if self.types != [FieldType::Address, FieldType::Uint] {
            return Err(CommitmentError::UnsupportedTypes {
                found: self.types.iter().map(|t| t.as_str().to_string()).collect(),
            });
        }
        if self.values.len() != self.count {
            return Err(CommitmentError::CountMismatch {
                declared: self.count,
                actual: self.values.len(),
            });
        }

        (0..self.count)
            .map(|index| -> Result<Entitlement, CommitmentError> {
                let row = self
                    .values
                    .get(&index.to_string())
                    .ok_or(CommitmentError::MissingRow { index })?;
                let field = |field: usize| {
                    row.get(&field.to_string())
                        .ok_or(CommitmentError::MissingField { index, field })
                };
                let account = Address::from_hex(field(0)?).map_err(|source| {
                    CommitmentError::InvalidValue {
                        index,
                        field: 0,
                        source,
                    }
                })?;
                let amount = Amount::parse_decimal(field(1)?).map_err(|source| {
                    CommitmentError::InvalidValue {
                        index,
                        field: 1,
                        source,
                    }
                })?;
                Ok(Entitlement { account, amount })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "types": ["address", "uint"],
        "count": 2,
        "values": {
            "0": {"0": "0x6CA6d1e2D5347Bfab1d91e883F1915560e09129D", "1": "25000000000000000000"},
            "1": {"0": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "1": "7"}
        }
    }"#;

    #[test]
    fn parses_sample() {
        let src = EntitlementSource::from_json(SAMPLE).unwrap();
        let entries = src.entitlements().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].account.to_hex(),
            "0x6ca6d1e2d5347bfab1d91e883f1915560e09129d"
        );
        assert_eq!(entries[0].amount, Amount::scaled(25, 18).unwrap());
        assert_eq!(entries[1].amount, Amount::from(7u64));
    }

    #[test]
    fn rejects_unknown_type_names() {
        let json = SAMPLE.replace("\"uint\"", "\"bytes32\"");
        assert!(EntitlementSource::from_json(&json).is_err());
    }

    #[test]
    fn rejects_wrong_type_shape() {
        let json = SAMPLE.replace(r#"["address", "uint"]"#, r#"["uint", "address"]"#);
        let src = EntitlementSource::from_json(&json).unwrap();
        assert!(matches!(
            src.entitlements(),
            Err(CommitmentError::UnsupportedTypes { .. })
        ));
    }

    #[test]
    fn rejects_count_mismatch() {
        let json = SAMPLE.replace("\"count\": 2", "\"count\": 3");
        let src = EntitlementSource::from_json(&json).unwrap();
        assert!(matches!(
            src.entitlements(),
            Err(CommitmentError::CountMismatch {
                declared: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn rejects_gapped_rows() {
        let json = SAMPLE.replace("\"1\": {\"0\"", "\"5\": {\"0\"");
        let src = EntitlementSource::from_json(&json).unwrap();
        assert!(matches!(
            src.entitlements(),
            Err(CommitmentError::MissingRow { index: 1 })
        ));
    }

    #[test]
    fn reports_row_and_field_of_bad_value() {
        let json = SAMPLE.replace("\"7\"", "\"seven\"");
        let src = EntitlementSource::from_json(&json).unwrap();
        match src.entitlements() {
            Err(CommitmentError::InvalidValue { index, field, .. }) => {
                assert_eq!((index, field), (1, 1));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn from_entitlements_reparses() {
        let entries = EntitlementSource::from_json(SAMPLE)
            .unwrap()
            .entitlements()
            .unwrap();
        let rebuilt = EntitlementSource::from_entitlements(&entries);
        assert_eq!(rebuilt.entitlements().unwrap(), entries);
    }
}
