//! Layering of YAML profile documents.
//!
//! # Merge Rules
//!
//! - Mappings are merged key by key, recursively
//! - Sequences are replaced entirely
//! - A null value in the overlay removes the key
//! - Any other overlay value replaces the base value

use serde_yaml::{Mapping, Value};

/// Merge `overlay` into `base` in place.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                if value.is_null() {
                    base_map.remove(&key);
                } else if let Some(existing) = base_map.get_mut(&key) {
                    deep_merge(existing, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Fold layers in order; later layers win. Empty (null) documents are skipped.
pub fn merge_layers<I>(layers: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    layers
        .into_iter()
        .filter(|layer| !layer.is_null())
        .fold(Value::Mapping(Mapping::new()), |mut acc, layer| {
            deep_merge(&mut acc, layer);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn nested_keys_survive_partial_override() {
        let mut base = yaml("memory:\n  minimum: 32M\n  recommended: 64M\n");
        deep_merge(&mut base, yaml("memory:\n  recommended: 128M\n"));
        assert_eq!(base["memory"]["minimum"], "32M");
        assert_eq!(base["memory"]["recommended"], "128M");
    }

    #[test]
    fn sequences_are_replaced() {
        let mut base = yaml("required_extensions: [json, gd, zip]\n");
        deep_merge(&mut base, yaml("required_extensions: [intl]\n"));
        let extensions = base["required_extensions"].as_sequence().unwrap();
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions[0], "intl");
    }

    #[test]
    fn null_removes_key() {
        let mut base = yaml("application: Shop\nopcode_caches: [apc]\n");
        deep_merge(&mut base, yaml("opcode_caches: ~\n"));
        assert!(base.get("opcode_caches").is_none());
        assert_eq!(base["application"], "Shop");
    }

    #[test]
    fn later_layers_win() {
        let merged = merge_layers(vec![
            yaml("application: A\nexecution_time:\n  minimum: 30\n"),
            yaml("application: B\n"),
            yaml("execution_time:\n  minimum: 60\n"),
        ]);
        assert_eq!(merged["application"], "B");
        assert_eq!(merged["execution_time"]["minimum"], 60);
    }

    #[test]
    fn empty_documents_are_ignored() {
        let merged = merge_layers(vec![yaml("application: A\n"), Value::Null]);
        assert_eq!(merged["application"], "A");
    }
}
