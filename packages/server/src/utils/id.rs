use uuid::Uuid;

/// Generate a new record identifier.
///
/// UUIDv7 in simple form: 32 lowercase hex chars whose lexicographic order
/// follows creation time.
pub fn new_id() -> String {
    Uuid::now_v7().simple().to_string()
}
