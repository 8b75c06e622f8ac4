//! Purpose: Shared JSON serializers for the decoded execute model.
//! Exports: `execute_order_json`, `process_data_json`, `output_definition_json`, `format_json`.
//! Role: Keep the `decode` output envelope shape consistent.
//! Invariants: Stable key names for v0 decode payloads; absent format members are omitted.
//! Invariants: Unrecognized input slots render as `null` so positions line up with the request.

use serde_json::{Map, Value, json};
use wpsexec::api::{ExecuteOrder, Format, OutputDefinition, OwsCode, ProcessData};

pub(crate) fn format_json(format: &Format) -> Value {
    let mut map = Map::new();
    if let Some(mime_type) = format.mime_type() {
        map.insert("mimeType".to_string(), json!(mime_type));
    }
    if let Some(encoding) = format.encoding() {
        map.insert("encoding".to_string(), json!(encoding));
    }
    if let Some(schema) = format.schema() {
        map.insert("schema".to_string(), json!(schema));
    }
    Value::Object(map)
}

fn id_json(id: &OwsCode) -> Value {
    match id.code_space() {
        Some(space) => json!({ "value": id.value(), "codeSpace": space.as_str() }),
        None => json!(id.value()),
    }
}

pub(crate) fn output_definition_json(definition: &OutputDefinition) -> Value {
    json!({
        "id": id_json(definition.id()),
        "format": format_json(definition.format()),
        "transmissionMode": definition.transmission_mode().as_str(),
    })
}

pub(crate) fn process_data_json(data: &ProcessData) -> Value {
    match data {
        ProcessData::StringValue { id, format, value } => json!({
            "id": id_json(id),
            "kind": "value",
            "format": format_json(format),
            "value": value,
        }),
        ProcessData::Reference { id, format, uri } => json!({
            "id": id_json(id),
            "kind": "reference",
            "format": format_json(format),
            "href": uri.as_str(),
        }),
    }
}

pub(crate) fn execute_order_json(order: &ExecuteOrder) -> Value {
    let inputs = order
        .inputs
        .iter()
        .map(|slot| slot.as_ref().map(process_data_json).unwrap_or(Value::Null))
        .collect::<Vec<_>>();
    let outputs = order
        .outputs
        .iter()
        .map(output_definition_json)
        .collect::<Vec<_>>();
    json!({
        "mode": order.mode.as_str(),
        "response": order.response.as_str(),
        "inputs": inputs,
        "outputs": outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wpsexec::api::{DataTransmissionMode, ExecutionMode, ResponseType};

    #[test]
    fn format_json_omits_absent_members() {
        let format = Format::new(Some("image/tiff"), None::<String>, Some("http://s"));
        assert_eq!(
            format_json(&format),
            json!({"mimeType": "image/tiff", "schema": "http://s"})
        );
        assert_eq!(format_json(&Format::default()), json!({}));
    }

    #[test]
    fn order_envelope_keeps_empty_slots() {
        let order = ExecuteOrder {
            mode: ExecutionMode::Async,
            response: ResponseType::Raw,
            inputs: vec![
                Some(ProcessData::reference(
                    OwsCode::new("dem"),
                    Format::mime("image/tiff"),
                    Url::parse("http://x/y").expect("url"),
                )),
                None,
            ],
            outputs: vec![OutputDefinition::new(
                OwsCode::new("slope"),
                Format::default(),
                DataTransmissionMode::Value,
            )],
        };

        let value = execute_order_json(&order);
        assert_eq!(value["mode"], "async");
        assert_eq!(value["response"], "raw");
        assert_eq!(value["inputs"][0]["kind"], "reference");
        assert_eq!(value["inputs"][0]["href"], "http://x/y");
        assert!(value["inputs"][1].is_null());
        assert_eq!(value["outputs"][0]["id"], "slope");
        assert_eq!(value["outputs"][0]["transmissionMode"], "value");
    }
}
