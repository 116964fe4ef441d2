//! Content fingerprint used to tell whether the queue head is still the
//! record being tracked.

use crate::{NotificationRecord, StoreError};

/// MD5 hex digest of the record's canonical JSON.
pub fn fingerprint(record: &NotificationRecord) -> Result<String, StoreError> {
    let canonical = serde_json::to_string(record)?;
    Ok(format!("{:x}", md5::compute(canonical.as_bytes())))
}
