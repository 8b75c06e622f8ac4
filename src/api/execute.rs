//! Purpose: Map execute request descriptors onto typed process inputs and output definitions.
//! Exports: `ExecuteDeserializer`.
//! Role: Pure data-mapping layer between the request document and process execution.
//! Invariants: Output order and input order are preserved; one result slot per descriptor.
//! Invariants: An input yields an inline string or a URI reference, never both.
//! Invariants: Serialization and URI failures abort the whole list (no partial results).
//! Notes: Unrecognized input shapes leave a `None` slot unless strict mode is enabled.
use serde_json::Value;
use url::Url;

use crate::core::error::{Error, ErrorKind};
use crate::core::format::Format;
use crate::core::model::{
    DataTransmissionMode, ExecuteOrder, ExecutionMode, OutputDefinition, OwsCode, ProcessData,
    ResponseType,
};
use crate::core::request::{
    ExecuteMode, ExecuteRequest, Input, Output, RequestFormat, ResponseMode, TransmissionMode,
};
use crate::json::codec::{JsonCodec, hint_for_error};

const VALUE_KEY: &str = "value";
const INLINE_VALUE_KEY: &str = "inlineValue";
const HREF_KEY: &str = "href";
const FORMAT_KEY: &str = "format";
const BBOX_KEY: &str = "bbox";

/// Decodes execute requests with a borrowed codec.
///
/// The codec is created once by the caller and lent to every deserializer; the
/// deserializer itself is cheap to build per request.
#[derive(Clone, Copy, Debug)]
pub struct ExecuteDeserializer<'c> {
    codec: &'c JsonCodec,
    strict: bool,
}

impl<'c> ExecuteDeserializer<'c> {
    pub fn new(codec: &'c JsonCodec) -> Self {
        Self {
            codec,
            strict: false,
        }
    }

    /// Reject inputs whose value shape is not recognized instead of leaving a `None` slot.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a request document and decode it.
    pub fn decode_request(&self, document: &str) -> Result<ExecuteOrder, Error> {
        let request = self.parse_request(document)?;
        self.read_execute(&request)
    }

    pub fn parse_request(&self, document: &str) -> Result<ExecuteRequest, Error> {
        self.codec.decode(document).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("invalid execute request")
                .with_hint(hint_for_error(&err, "execute request"))
                .with_source(err)
        })
    }

    pub fn read_execute(&self, request: &ExecuteRequest) -> Result<ExecuteOrder, Error> {
        let inputs = self.read_inputs(&request.inputs)?;
        let outputs = self.read_outputs(&request.outputs);
        Ok(ExecuteOrder {
            mode: execution_mode(&request.mode),
            response: response_type(&request.response),
            inputs,
            outputs,
        })
    }

    pub fn read_outputs(&self, outputs: &[Output]) -> Vec<OutputDefinition> {
        outputs
            .iter()
            .map(|output| {
                let definition = OutputDefinition::new(
                    OwsCode::new(output.id.as_str()),
                    output.format.as_ref().map(request_format).unwrap_or_default(),
                    data_transmission_mode(&output.transmission_mode),
                );
                tracing::debug!(
                    output = %definition.id(),
                    mode = definition.transmission_mode().as_str(),
                    "decoded output"
                );
                definition
            })
            .collect()
    }

    pub fn read_inputs(&self, inputs: &[Input]) -> Result<Vec<Option<ProcessData>>, Error> {
        let mut list = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            list.push(self.read_input(input).map_err(|err| err.with_index(index))?);
        }
        Ok(list)
    }

    pub fn read_input(&self, input: &Input) -> Result<Option<ProcessData>, Error> {
        let id = OwsCode::new(input.id.as_str());
        let data = self.decode_node(id, &input.input)?;
        match &data {
            Some(data) => tracing::debug!(
                input = %data.id(),
                reference = data.is_reference(),
                "decoded input"
            ),
            None if self.strict => {
                return Err(Error::new(ErrorKind::Unsupported)
                    .with_message("input value has no recognized shape")
                    .with_hint(
                        "Provide `value` as a scalar, {\"inlineValue\": ...}, {\"href\": ...}, or a `bbox` object.",
                    )
                    .with_input(input.id.as_str()));
            }
            None => tracing::warn!(input = %input.id, "input value has no recognized shape"),
        }
        Ok(data)
    }

    fn decode_node(&self, id: OwsCode, node: &Value) -> Result<Option<ProcessData>, Error> {
        match node.get(VALUE_KEY) {
            Some(Value::Object(value)) if value.contains_key(INLINE_VALUE_KEY) => {
                let format = node
                    .get(FORMAT_KEY)
                    .map(format_from_node)
                    .unwrap_or_else(Format::text_plain);
                let text = self
                    .codec
                    .encode(&value[INLINE_VALUE_KEY])
                    .map_err(|err| serialization_error(&id, "failed to encode inline value", err))?;
                Ok(Some(ProcessData::string_value(id, format, text)))
            }
            Some(Value::Object(value)) if value.contains_key(HREF_KEY) => {
                let href = text_form(&value[HREF_KEY]);
                let uri = Url::parse(&href).map_err(|err| {
                    Error::new(ErrorKind::UriSyntax)
                        .with_message("invalid href")
                        .with_hint("Use an absolute URI, for example `https://host/path`.")
                        .with_input(id.value())
                        .with_source(err)
                })?;
                let format = node.get(FORMAT_KEY).map(format_from_node).unwrap_or_default();
                Ok(Some(ProcessData::reference(id, format, uri)))
            }
            Some(scalar @ (Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null)) => {
                Ok(Some(ProcessData::string_value(
                    id,
                    Format::text_plain(),
                    text_form(scalar),
                )))
            }
            // A `value` object without `inlineValue` or `href` never falls through to bbox.
            Some(Value::Array(_)) | None if node.get(BBOX_KEY).is_some_and(Value::is_object) =>
            {
                let text = self
                    .codec
                    .encode(node)
                    .map_err(|err| serialization_error(&id, "failed to encode bounding box", err))?;
                Ok(Some(ProcessData::string_value(
                    id,
                    Format::application_json(),
                    text,
                )))
            }
            _ => Ok(None),
        }
    }
}

fn serialization_error(id: &OwsCode, message: &str, err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Serialization)
        .with_message(message)
        .with_input(id.value())
        .with_source(err)
}

fn data_transmission_mode(mode: &TransmissionMode) -> DataTransmissionMode {
    match mode {
        TransmissionMode::Value => DataTransmissionMode::Value,
        TransmissionMode::Reference | TransmissionMode::Other(_) => DataTransmissionMode::Reference,
    }
}

fn execution_mode(mode: &ExecuteMode) -> ExecutionMode {
    match mode {
        ExecuteMode::Sync => ExecutionMode::Sync,
        ExecuteMode::Async => ExecutionMode::Async,
        ExecuteMode::Auto | ExecuteMode::Other(_) => ExecutionMode::Auto,
    }
}

fn response_type(mode: &ResponseMode) -> ResponseType {
    match mode {
        ResponseMode::Raw => ResponseType::Raw,
        ResponseMode::Document | ResponseMode::Other(_) => ResponseType::Document,
    }
}

fn request_format(format: &RequestFormat) -> Format {
    Format::new(
        format.mime_type.as_deref(),
        format.encoding.as_deref(),
        format.schema.as_deref(),
    )
}

// A null member is absent here, not the text "null".
fn format_from_node(node: &Value) -> Format {
    request_format(&RequestFormat::from_node(node))
}

fn text_form(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(node: Value) -> Result<Option<ProcessData>, Error> {
        let codec = JsonCodec::new();
        ExecuteDeserializer::new(&codec).read_input(&Input::new("in", node))
    }

    #[test]
    fn inline_value_uses_sibling_format() {
        let data = decode(json!({
            "value": {"inlineValue": {"type": "Point", "coordinates": [7.6, 51.9]}},
            "format": {"mimeType": "application/geo+json", "schema": "http://geojson.org"}
        }))
        .expect("decode")
        .expect("data");

        assert_eq!(
            data.as_string_value(),
            Some(r#"{"type":"Point","coordinates":[7.6,51.9]}"#)
        );
        assert_eq!(data.format().mime_type(), Some("application/geo+json"));
        assert_eq!(data.format().encoding(), None);
        assert_eq!(data.format().schema(), Some("http://geojson.org"));
    }

    #[test]
    fn inline_string_is_json_encoded() {
        let data = decode(json!({"value": {"inlineValue": "abc"}}))
            .expect("decode")
            .expect("data");
        assert_eq!(data.as_string_value(), Some("\"abc\""));
        assert_eq!(data.format(), &Format::text_plain());
    }

    #[test]
    fn inline_value_wins_over_href() {
        let data = decode(json!({"value": {"inlineValue": 1, "href": "http://x/y"}}))
            .expect("decode")
            .expect("data");
        assert!(!data.is_reference());
        assert_eq!(data.as_string_value(), Some("1"));
    }

    #[test]
    fn href_without_format_has_empty_format() {
        let data = decode(json!({"value": {"href": "https://example.org/dem.tif"}}))
            .expect("decode")
            .expect("data");
        assert_eq!(
            data.as_reference().map(Url::as_str),
            Some("https://example.org/dem.tif")
        );
        assert!(data.format().is_empty());
    }

    #[test]
    fn non_string_format_members() {
        let data = decode(json!({
            "value": {"href": "http://x/y"},
            "format": {"mimeType": "text/csv", "encoding": null, "schema": 3}
        }))
        .expect("decode")
        .expect("data");
        assert_eq!(data.format().mime_type(), Some("text/csv"));
        assert_eq!(data.format().encoding(), None);
        assert_eq!(data.format().schema(), Some("3"));
    }

    #[test]
    fn scalar_text_forms() {
        let cases = [
            (json!("42"), "42"),
            (json!(42), "42"),
            (json!(2.5), "2.5"),
            (json!(true), "true"),
            (Value::Null, "null"),
        ];
        for (value, expected) in cases {
            let data = decode(json!({ "value": value })).expect("decode").expect("data");
            assert_eq!(data.as_string_value(), Some(expected));
            assert_eq!(data.format(), &Format::text_plain());
        }
    }

    #[test]
    fn bbox_ignored_when_value_is_object() {
        let node = json!({"value": {"other": 1}, "bbox": {"bbox": [0, 0, 1, 1]}});
        assert!(decode(node).expect("decode").is_none());
    }

    #[test]
    fn bbox_checked_when_value_is_array() {
        let node = json!({"value": [1, 2], "bbox": {"bbox": [0, 0, 1, 1]}});
        let data = decode(node.clone()).expect("decode").expect("data");
        assert_eq!(data.format(), &Format::application_json());
        assert_eq!(data.as_string_value(), Some(node.to_string().as_str()));
    }

    #[test]
    fn big_integers_keep_their_text() {
        let node: Value = serde_json::from_str(
            r#"{"value": {"inlineValue": {"type": "Point", "coordinates": [1, 2], "id": 123456789012345678901234567890}}}"#,
        )
        .expect("node");
        let data = decode(node).expect("decode").expect("data");
        assert_eq!(
            data.as_string_value(),
            Some(r#"{"type":"Point","coordinates":[1,2],"id":123456789012345678901234567890}"#)
        );

        let node: Value =
            serde_json::from_str(r#"{"value": 123456789012345678901234567890}"#).expect("node");
        let data = decode(node).expect("decode").expect("data");
        assert_eq!(data.as_string_value(), Some("123456789012345678901234567890"));
    }

    #[test]
    fn scalar_value_wins_over_bbox() {
        let data = decode(json!({"value": "7", "bbox": {"bbox": [0, 0, 1, 1]}}))
            .expect("decode")
            .expect("data");
        assert_eq!(data.as_string_value(), Some("7"));
    }

    #[test]
    fn unrecognized_shapes_leave_empty_slot() {
        for node in [
            json!({}),
            json!({"value": [1, 2]}),
            json!({"value": {"other": 1}}),
            json!({"bbox": [0, 0, 1, 1]}),
            Value::Null,
        ] {
            assert!(decode(node).expect("decode").is_none());
        }
    }

    #[test]
    fn strict_mode_rejects_unrecognized_shape() {
        let codec = JsonCodec::new();
        let deserializer = ExecuteDeserializer::new(&codec).with_strict(true);
        let err = deserializer
            .read_input(&Input::new("mystery", json!({"value": [1]})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert_eq!(err.input(), Some("mystery"));
    }

    #[test]
    fn transmission_mode_mapping_has_reference_default() {
        assert_eq!(
            data_transmission_mode(&TransmissionMode::Value),
            DataTransmissionMode::Value
        );
        assert_eq!(
            data_transmission_mode(&TransmissionMode::Reference),
            DataTransmissionMode::Reference
        );
        assert_eq!(
            data_transmission_mode(&TransmissionMode::Other("raw".to_string())),
            DataTransmissionMode::Reference
        );
    }
}
