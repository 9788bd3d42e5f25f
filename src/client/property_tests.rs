//! Property-Based Tests for Client Module
//!
//! Uses proptest to check the envelope and decoding properties.

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::client::bytes_to_code_points;
use crate::models::{CacheCommand, CommandRequest, CommandResponse};

// == Strategies ==
/// Generates arbitrary JSON values without floats (which do not round-trip exactly)
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        ".{0,32}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::hash_map("[a-z_]{1,8}", inner, 0..8)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generates typed commands that pass validation
fn cache_command_strategy() -> impl Strategy<Value = CacheCommand> {
    let name = "[a-zA-Z0-9_]{1,32}";
    prop_oneof![
        (name, any::<i64>()).prop_map(|(n, v)| CacheCommand::set_int(n, v)),
        (name, "[a-zA-Z0-9 ]{0,64}").prop_map(|(n, v)| CacheCommand::set_str(n, v)),
        name.prop_map(CacheCommand::get),
        name.prop_map(CacheCommand::del),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Serializing `{cmd: c}` and parsing it back yields an equal envelope.
    #[test]
    fn prop_request_envelope_round_trip(cmd in json_value_strategy()) {
        let body = serde_json::to_string(&CommandRequest::new(&cmd)).unwrap();
        let parsed: CommandRequest<Value> = serde_json::from_str(&body).unwrap();
        prop_assert_eq!(parsed, CommandRequest::new(cmd));
    }

    // JSON decoding returns exactly the `output` value, whatever its type.
    #[test]
    fn prop_json_decode_passes_output_through(output in json_value_strategy()) {
        let body = serde_json::to_vec(&json!({ "output": output.clone() })).unwrap();
        let decoded = CommandResponse::from_body(&body).unwrap();
        prop_assert_eq!(decoded.output, output);
    }

    // Raw decoding yields one char per byte, and ASCII comes through as-is.
    #[test]
    fn prop_raw_decode_one_char_per_byte(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let decoded = bytes_to_code_points(&bytes);
        prop_assert_eq!(decoded.chars().count(), bytes.len());
        for (c, b) in decoded.chars().zip(bytes.iter()) {
            prop_assert_eq!(c as u32, *b as u32);
        }
    }

    #[test]
    fn prop_raw_decode_ascii_identity(text in "[ -~]{0,128}") {
        prop_assert_eq!(bytes_to_code_points(text.as_bytes()), text);
    }

    // Rendering a typed command and parsing it back gives the same command.
    #[test]
    fn prop_cache_command_display_parse(cmd in cache_command_strategy()) {
        let parsed: CacheCommand = cmd.to_string().parse().unwrap();
        prop_assert_eq!(parsed, cmd);
    }
}
