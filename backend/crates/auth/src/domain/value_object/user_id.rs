//! User ID Value Object

pub use kernel::id::UserId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parse_roundtrip() {
        let id = UserId::new();
        let parsed = UserId::parse_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }
}
