//! Destination payload shaping for REST asset copies.
//!
//! Which source fields travel to the destination depends on the asset type:
//! emails carry their data and views, content blocks carry their block
//! structure, and images carry a separately fetched file body. Every
//! payload carries the name, the asset type, and the destination folder.

use sfmc_client::Record;

/// The asset type name of a record (`assetType.name`), if present.
pub(crate) fn asset_type_name(record: &Record) -> Option<&str> {
    record.get("assetType")?.get("name")?.as_str()
}

/// Returns true if the asset is an image copied via its file sub-resource.
pub(crate) fn is_image(record: &Record) -> bool {
    matches!(asset_type_name(record), Some("jpg" | "png" | "gif"))
}

/// The file sub-resource path of an image asset.
pub(crate) fn file_subresource(endpoint: &str, record: &Record) -> Option<String> {
    let id = match record.get("id")? {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(format!("{}/{}/file", endpoint.trim_end_matches('/'), id))
}

/// Build the destination payload for a source asset, minus any file body.
pub(crate) fn shape_payload(record: &Record, dest_folder: &str) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "name": record.get("name").cloned().unwrap_or(serde_json::Value::Null),
        "assetType": record.get("assetType").cloned().unwrap_or(serde_json::Value::Null),
        "category": { "id": dest_folder },
    });

    match asset_type_name(record) {
        Some("templatebasedemail") => {
            carry_fields(&mut payload, record, &["data", "views"]);
        }
        Some("layoutblock" | "textblock") => {
            carry_fields(&mut payload, record, &["content", "design", "meta", "slots"]);
        }
        _ => {}
    }

    payload
}

fn carry_fields(payload: &mut serde_json::Value, record: &Record, fields: &[&str]) {
    for field in fields {
        payload[*field] = record.get(*field).cloned().unwrap_or(serde_json::Value::Null);
    }
}
