use fnv::FnvHasher;
use std::{
    collections::HashMap,
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Hash map pre-sized for `capacity` entries.
///
/// Keys in this crate are small (coordinates, coordinate pairs), which is where FNV beats the
/// default SipHash. It offers no protection against crafted key collisions.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}
