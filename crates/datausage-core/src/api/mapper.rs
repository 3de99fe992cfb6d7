//! Decoding of the datastore search payload.

use serde::Deserialize;

use crate::api::http::HttpResponse;
use crate::error::RemoteError;
use crate::models::UsageRecord;

#[derive(Debug, Deserialize)]
struct Root {
    result: ResultBody,
}

#[derive(Debug, Deserialize)]
struct ResultBody {
    records: Vec<RemoteRecord>,
}

/// Wire shape of one record. The volume arrives as a decimal string.
#[derive(Debug, Deserialize)]
struct RemoteRecord {
    #[serde(rename = "_id")]
    id: i64,
    #[serde(rename = "volume_of_mobile_data")]
    volume: String,
    quarter: String,
}

impl RemoteRecord {
    fn into_record(self) -> UsageRecord {
        // A volume string that does not parse becomes 0.0; one bad record
        // does not fail the payload.
        UsageRecord {
            id: self.id,
            volume: self.volume.trim().parse().unwrap_or(0.0),
            quarter: self.quarter,
        }
    }
}

/// Decode a transport response into usage records.
///
/// Anything other than a 200 with a well-formed body is `InvalidData`;
/// connectivity problems never reach this layer.
pub fn decode(response: &HttpResponse) -> Result<Vec<UsageRecord>, RemoteError> {
    if !response.is_ok() {
        return Err(RemoteError::InvalidData);
    }

    let root: Root =
        serde_json::from_slice(&response.body).map_err(|_| RemoteError::InvalidData)?;

    Ok(root
        .result
        .records
        .into_iter()
        .map(RemoteRecord::into_record)
        .collect())
}
