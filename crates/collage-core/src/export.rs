use crate::model::Layout;
use serde_json::{Value, json};

/// Serialize a layout as `{ canvas, strategy, placements, skipped, stats }`.
///
/// `keys[i]` names input `i` (e.g. its file path); indices without a key are
/// exported with `key: null`.
pub fn to_json<K: ToString>(layout: &Layout, keys: &[K]) -> Value {
    let key_of = |i: usize| keys.get(i).map(|k| Value::String(k.to_string())).unwrap_or(Value::Null);
    let placements: Vec<Value> = layout
        .placements
        .iter()
        .map(|p| {
            json!({
                "index": p.index,
                "key": key_of(p.index),
                "frame": {"x": p.frame.x, "y": p.frame.y, "w": p.frame.w, "h": p.frame.h},
            })
        })
        .collect();
    let skipped: Vec<Value> = layout
        .skipped
        .iter()
        .map(|&i| json!({"index": i, "key": key_of(i)}))
        .collect();
    json!({
        "canvas": {"w": layout.canvas.0, "h": layout.canvas.1},
        "strategy": layout.strategy,
        "placements": placements,
        "skipped": skipped,
        "stats": layout.stats(),
    })
}
