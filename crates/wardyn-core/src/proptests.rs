//! Property-based tests for core value types.

#[allow(clippy::unwrap_used)]
mod tests {
    use crate::identity::ObjectIdentity;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(oid: &ObjectIdentity) -> u64 {
        let mut hasher = DefaultHasher::new();
        oid.hash(&mut hasher);
        hasher.finish()
    }

    proptest! {
        #[test]
        fn test_identity_equality_iff_both_fields_equal(
            type_a in "\\PC{1,16}",
            type_b in "\\PC{1,16}",
            id_a in any::<i64>(),
            id_b in any::<i64>(),
        ) {
            let a = ObjectIdentity::new(type_a.clone(), id_a);
            let b = ObjectIdentity::new(type_b.clone(), id_b);
            prop_assert_eq!(a == b, type_a == type_b && id_a == id_b);
        }

        #[test]
        fn test_equal_identities_hash_equal(t in "\\PC{1,16}", id in any::<i64>()) {
            let a = ObjectIdentity::new(t.clone(), id);
            let b = ObjectIdentity::new(t, id);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn test_identity_map_key_lookup(t in "\\PC{1,16}", id in any::<i64>()) {
            let mut map = HashMap::new();
            map.insert(ObjectIdentity::new(t.clone(), id), ());
            prop_assert!(map.contains_key(&ObjectIdentity::new(t, id)));
        }

        #[test]
        fn test_identity_serde_roundtrip(t in "\\PC{1,16}", id in any::<i64>()) {
            let oid = ObjectIdentity::new(t, id);
            let json = serde_json::to_string(&oid).unwrap();
            let back: ObjectIdentity = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(oid, back);
        }
    }
}
