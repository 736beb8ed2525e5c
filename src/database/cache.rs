//! Process-lifetime memo of resolved locations

use crate::database::location::Location;
use std::collections::HashMap;
use std::sync::RwLock;

/// Dotted-IP keyed cache of resolved locations
///
/// Entries are never evicted. Values are cloned in and out, so callers can
/// never observe or mutate the stored copy.
#[derive(Default)]
pub struct LookupCache {
    entries: RwLock<HashMap<String, Location>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ip: &str) -> Option<Location> {
        match self.entries.read() {
            Ok(entries) => entries.get(ip).cloned(),
            Err(e) => {
                log::warn!("Lookup cache read lock poisoned: {}", e);
                None
            }
        }
    }

    pub fn put(&self, ip: &str, location: &Location) {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(ip.to_string(), location.clone());
            }
            Err(e) => log::warn!("Lookup cache write lock poisoned: {}", e),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_get_put() {
        let cache = LookupCache::new();
        assert!(cache.get("1.2.3.4").is_none());
        assert!(cache.is_empty());

        cache.put("1.2.3.4", &Location::new("X", "Y"));
        assert_eq!(cache.get("1.2.3.4"), Some(Location::new("X", "Y")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_returned_value_is_a_copy() {
        let cache = LookupCache::new();
        cache.put("1.2.3.4", &Location::new("X", "Y"));

        let mut copy = cache.get("1.2.3.4").unwrap();
        copy.country.push_str("changed");
        assert_eq!(cache.get("1.2.3.4"), Some(Location::new("X", "Y")));
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(LookupCache::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("10.0.{}.{}", t, i);
                        cache.put(&key, &Location::new(format!("c{}", t), format!("a{}", i)));
                        assert_eq!(
                            cache.get(&key),
                            Some(Location::new(format!("c{}", t), format!("a{}", i)))
                        );
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 800);
    }
}
