use serde::{Deserialize, Serialize};

/// Database-assigned identifier of a stored record.
pub type RecordId = i64;

/// A record together with the identifier the database assigned to it.
///
/// The id is flattened next to the record fields on the wire, so a stored
/// volunteer serializes as `{"id":1,"nome":"Ana",...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: T,
}

impl<T> Stored<T> {
    pub fn new(id: RecordId, record: T) -> Self {
        Self { id, record }
    }
}
