//! Payload shape normalization for the MediaMTX paths API.
//!
//! The `/v3/config/paths/list` response envelope is not stable across
//! server versions: sometimes `{"paths": {...}}`, sometimes a bare list of
//! items, sometimes `{"items": [...]}`, sometimes a flat object whose keys
//! are the paths themselves. `extract_paths` recognizes every shape and
//! returns a canonical name -> descriptor map. It never fails; unknown
//! shapes yield an empty map.

use serde_json::{Map, Value as Json};

/// Canonical name -> descriptor mapping. With serde_json's `preserve_order`
/// feature this keeps the decoded payload's insertion order, so the entries
/// written back to the config file are deterministic per payload.
pub type PathMap = Map<String, Json>;

/// Reserved catch-all section name. Never a valid path name.
pub const CATCH_ALL: &str = "all_others";

/// Envelope keys that can never themselves be path names.
const RESERVED_KEYS: [&str; 3] = ["paths", "items", CATCH_ALL];

/// Extract the path map from a decoded API payload.
///
/// Shapes are tried in priority order; the explicit `paths` key always
/// wins over the heuristic root-key scan so that an envelope containing
/// `paths` is never misread as a flat object of paths.
pub fn extract_paths(payload: &Json) -> PathMap {
    // Shape 1: {"paths": {...}} — use the nested mapping directly.
    if let Json::Object(map) = payload {
        if let Some(Json::Object(nested)) = map.get("paths") {
            let mut out = PathMap::new();
            for (name, desc) in nested {
                insert_path(&mut out, name, desc.clone());
            }
            return out;
        }
    }

    // Shape 2: bare list of items carrying a "name" field.
    if let Json::Array(items) = payload {
        return collect_items(items);
    }

    if let Json::Object(map) = payload {
        // Shape 3: {"items": [...]} — same item handling as shape 2.
        if let Some(Json::Array(items)) = map.get("items") {
            return collect_items(items);
        }

        // Shape 4: root keys that look like paths (object values carrying
        // a "source" field), skipping envelope keys.
        let mut out = PathMap::new();
        for (name, desc) in map {
            if RESERVED_KEYS.contains(&name.as_str()) {
                continue;
            }
            if matches!(desc, Json::Object(inner) if inner.contains_key("source")) {
                insert_path(&mut out, name, desc.clone());
            }
        }
        return out;
    }

    // Shape 5: scalar or null — nothing recognizable.
    PathMap::new()
}

/// Look up a descriptor's `source` string, if present.
pub fn descriptor_source(desc: &Json) -> Option<&str> {
    desc.get("source").and_then(Json::as_str)
}

fn collect_items(items: &[Json]) -> PathMap {
    let mut out = PathMap::new();
    for item in items {
        if let Json::Object(desc) = item {
            if let Some(name) = desc.get("name").and_then(Json::as_str) {
                insert_path(&mut out, name, item.clone());
            }
        }
    }
    out
}

fn insert_path(out: &mut PathMap, name: &str, desc: Json) {
    // The catch-all name is a file schema marker, never a stream path.
    if name.is_empty() || name == CATCH_ALL {
        return;
    }
    out.insert(name.to_string(), desc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_key_shape() {
        let payload = json!({"paths": {"cam1": {"source": "rtsp://x"}, "cam2": {}}});
        let map = extract_paths(&payload);
        assert_eq!(map.len(), 2);
        assert_eq!(descriptor_source(&map["cam1"]), Some("rtsp://x"));
        // cam2 stays in the map even without a source; it is filtered out
        // later when building writable entries.
        assert_eq!(descriptor_source(&map["cam2"]), None);
    }

    #[test]
    fn test_list_shape() {
        let payload = json!([
            {"name": "cam1", "source": "rtsp://a"},
            {"name": "all_others", "source": "ignored"},
            {"source": "rtsp://no-name"},
            "not-an-object"
        ]);
        let map = extract_paths(&payload);
        assert_eq!(map.len(), 1);
        assert_eq!(descriptor_source(&map["cam1"]), Some("rtsp://a"));
    }

    #[test]
    fn test_items_key_shape() {
        let payload = json!({"items": [
            {"name": "cam1", "source": "rtsp://a"},
            {"name": "cam2", "source": "rtsp://b"}
        ]});
        let map = extract_paths(&payload);
        let names: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["cam1", "cam2"]);
    }

    #[test]
    fn test_root_scan_shape() {
        let payload = json!({
            "cam1": {"source": "rtsp://a"},
            "meta": {"version": 3},
            "items": {"source": "reserved-key"},
            "all_others": {"source": "reserved-key"}
        });
        let map = extract_paths(&payload);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("cam1"));
    }

    #[test]
    fn test_paths_key_wins_over_root_scan() {
        // The same object would also match shape 4; the explicit field must win.
        let payload = json!({
            "paths": {"cam1": {"source": "rtsp://a"}},
            "cam2": {"source": "rtsp://b"}
        });
        let map = extract_paths(&payload);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("cam1"));
        assert!(!map.contains_key("cam2"));
    }

    #[test]
    fn test_catch_all_dropped_in_every_shape() {
        let nested = json!({"paths": {"all_others": {"source": "x"}, "cam1": {"source": "y"}}});
        assert!(!extract_paths(&nested).contains_key(CATCH_ALL));
        let listed = json!([{"name": "all_others", "source": "x"}]);
        assert!(extract_paths(&listed).is_empty());
        let items = json!({"items": [{"name": "all_others", "source": "x"}]});
        assert!(extract_paths(&items).is_empty());
    }

    #[test]
    fn test_unrecognized_shapes_yield_empty_map() {
        assert!(extract_paths(&json!(null)).is_empty());
        assert!(extract_paths(&json!(42)).is_empty());
        assert!(extract_paths(&json!("paths")).is_empty());
        assert!(extract_paths(&json!({})).is_empty());
        // "paths" present but not a mapping: shape 1 does not apply and the
        // root scan skips the reserved key.
        assert!(extract_paths(&json!({"paths": [1, 2]})).is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let payload = json!({"paths": {
            "zeta": {"source": "rtsp://z"},
            "alpha": {"source": "rtsp://a"},
            "mid": {"source": "rtsp://m"}
        }});
        let map = extract_paths(&payload);
        let names: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_non_string_source_treated_as_absent() {
        let desc = json!({"source": 7});
        assert_eq!(descriptor_source(&desc), None);
    }
}
