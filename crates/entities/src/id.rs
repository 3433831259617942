//! Document identifiers.

use bson::oid::ObjectId;

/// Generates a new document identifier.
///
/// Identifiers are the hex form of a fresh ObjectId, so generated ids sort
/// roughly by creation time and look like the ids the database would assign.
pub fn new_document_id() -> String {
    ObjectId::new().to_hex()
}
