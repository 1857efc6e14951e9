use super::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<updrop_events::EventBus>>,
) -> Result<(), ConfigError> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let mut doc = content.parse::<DocumentMut>()?;
    let mut added_fields = Vec::new();

    migrate_server_section(&mut doc, &mut added_fields)?;
    migrate_upload_section(&mut doc, &mut added_fields)?;
    migrate_storage_section(&mut doc, &mut added_fields)?;

    // Only write if we added fields
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;

        if let Some(event_bus) = events {
            event_bus.emit(updrop_events::AppEvent::ConfigMigrated { added_fields });
        }
    }

    Ok(())
}

fn migrate_server_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<(), ConfigError> {
    // Ensure [server] section exists
    if !doc.contains_key("server") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["server"] = Item::Table(table);
        added_fields.push("server".to_string());
    }

    let server = doc["server"]
        .as_table_mut()
        .ok_or_else(|| ConfigError::InvalidConfig("Invalid [server] section in config".into()))?;
    ensure_field(server, "host", Value::from("0.0.0.0"), added_fields);
    ensure_field(server, "port", Value::from(5000), added_fields);
    ensure_field(server, "tcp_nodelay", Value::from(true), added_fields);
    ensure_field(server, "timeout_secs", Value::from(60), added_fields);
    ensure_field(server, "max_upload_size_mb", Value::from(5), added_fields);
    ensure_field(
        server,
        "streaming_threshold_mb",
        Value::from(100),
        added_fields,
    );
    ensure_field(
        server,
        "enable_compression",
        Value::from(false),
        added_fields,
    );

    if !server.contains_key("allowed_origins") {
        let mut arr = Array::new();
        arr.push("*");
        server["allowed_origins"] = Item::Value(Value::Array(arr));
        added_fields.push("server.allowed_origins".to_string());
    }

    Ok(())
}

fn migrate_upload_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<(), ConfigError> {
    // Ensure [upload] section
    if !doc.contains_key("upload") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["upload"] = Item::Table(table);
        added_fields.push("upload".to_string());
    }

    let upload = doc["upload"]
        .as_table_mut()
        .ok_or_else(|| ConfigError::InvalidConfig("Invalid [upload] section in config".into()))?;
    ensure_field(upload, "dir", Value::from("uploads"), added_fields);
    ensure_field(upload, "key_prefix", Value::from("uploads"), added_fields);
    ensure_field(
        upload,
        "default_extension",
        Value::from("jpg"),
        added_fields,
    );
    ensure_field(
        upload,
        "echo_backend_errors",
        Value::from(false),
        added_fields,
    );

    Ok(())
}

fn migrate_storage_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> Result<(), ConfigError> {
    // Ensure [storage] section
    if !doc.contains_key("storage") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["storage"] = Item::Table(table);
        added_fields.push("storage".to_string());
    }

    let storage = doc["storage"]
        .as_table_mut()
        .ok_or_else(|| ConfigError::InvalidConfig("Invalid [storage] section in config".into()))?;
    ensure_field(storage, "backend", Value::from("local"), added_fields);

    // Ensure [storage.s3] section
    if !storage.contains_key("s3") {
        let mut s3_table = Table::new();
        s3_table.set_implicit(true);
        storage["s3"] = Item::Table(s3_table);
        added_fields.push("storage.s3".to_string());
    }

    let s3 = storage["s3"]
        .as_table_mut()
        .ok_or_else(|| ConfigError::InvalidConfig("Invalid [storage.s3] section in config".into()))?;
    ensure_field(s3, "endpoint_url", Value::from(""), added_fields);
    ensure_field(s3, "region", Value::from("auto"), added_fields);
    ensure_field(s3, "access_key_id", Value::from(""), added_fields);
    ensure_field(s3, "secret_access_key", Value::from(""), added_fields);
    ensure_field(s3, "bucket_name", Value::from(""), added_fields);
    ensure_field(s3, "public_base_url", Value::from(""), added_fields);

    Ok(())
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
