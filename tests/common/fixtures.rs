//! JSON document fixtures shared by integration tests.

use serde_json::{json, Value};

/// A small page so tests exercise pagination with little content:
/// 300x400pt with 50pt margins leaves 200x300pt for content.
pub fn small_page() -> Value {
    json!({
        "pageSize": { "width": 300, "height": 400 },
        "margins": 50
    })
}

pub fn with_nodes(mut config: Value, nodes: Value) -> Value {
    config["nodes"] = nodes;
    config
}

/// A flowing report: heading, body text, a divider, then a keep-together
/// summary card.
pub fn report() -> Value {
    with_nodes(
        small_page(),
        json!([
            { "type": "heading", "text": "Summary", "level": 2 },
            { "type": "text", "text": "aaaa aaaa aaaa aaaa aaaa aaaa" },
            { "type": "divider", "thickness": 2 },
            {
                "type": "group",
                "gap": 8,
                "padding": 6,
                "children": [
                    { "type": "text", "text": "Total" },
                    { "type": "rect", "width": 80, "height": 40, "color": "#336699" }
                ]
            }
        ]),
    )
}

/// A fixed-mode, two page poster with one flow element mixed in.
pub fn poster() -> Value {
    with_nodes(
        json!({
            "pageSize": { "width": 300, "height": 400 },
            "margins": 50,
            "mode": "fixed"
        }),
        json!([
            { "type": "text", "text": "cover" },
            { "type": "rect", "width": 60, "height": 60, "page": 1, "left": 200, "top": 300 },
            { "type": "circle", "radius": 20, "page": 2, "left": 150, "top": 150 },
            { "type": "heading", "text": "Back", "page": 2, "left": 40, "top": 40 }
        ]),
    )
}
