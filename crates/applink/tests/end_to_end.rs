//! End-to-end round trips through the public facade.

use applink::messages::{
    ALERT_MANEUVER, APP_SERVICE_DATA, GET_APP_SERVICE_DATA, GET_APP_SERVICE_DATA_RESPONSE,
    MEDIA_SERVICE_DATA, ON_APP_SERVICE_DATA, TTS_CHUNK,
};
use applink::{
    FunctionId, MessageKind, ParamValue, ProtocolError, ResultCode, RpcMessage, RpcStruct,
};
use serde_json::json;

#[test]
fn request_round_trip_preserves_framing_and_body() {
    let mut request = RpcMessage::request(&GET_APP_SERVICE_DATA);
    request.set_correlation_id(7);
    request.set("serviceType", "MEDIA").unwrap();
    // an unrelated passthrough field set before serialization
    request.set_parameter("vendorExtension", Some(json!({ "beta": true }).into()));

    let wire = request.to_tree();
    let decoded = RpcMessage::from_tree(&GET_APP_SERVICE_DATA, &wire).unwrap();

    assert_eq!(decoded.function(), FunctionId::GetAppServiceData);
    assert_eq!(decoded.kind(), MessageKind::Request);
    assert_eq!(decoded.correlation_id(), Some(7));
    assert_eq!(decoded.get_str("serviceType"), Some("MEDIA"));
    assert_eq!(
        decoded.to_tree()["parameters"]["vendorExtension"],
        json!({ "beta": true })
    );
}

#[test]
fn app_service_data_nested_struct_round_trip() {
    let mut media = RpcStruct::new(&MEDIA_SERVICE_DATA);
    media.set("mediaTitle", "Daydreaming").unwrap();
    media.set("trackPlaybackProgress", 45i64).unwrap();

    let mut data = RpcStruct::new(&APP_SERVICE_DATA);
    data.set("serviceType", "MEDIA").unwrap();
    data.set("mediaServiceData", media).unwrap();

    let wire = data.to_tree();
    let mut decoded = RpcStruct::from_tree(&APP_SERVICE_DATA, &wire).unwrap();

    assert_eq!(decoded.get_str("serviceType"), Some("MEDIA"));
    // no eager validation happened at construction: the nested value is
    // still the raw tree until this first typed read
    assert!(matches!(
        decoded.get_raw("mediaServiceData"),
        Some(ParamValue::Raw(_))
    ));
    let media = decoded.get_struct("mediaServiceData").unwrap();
    assert_eq!(media.get_str("mediaTitle"), Some("Daydreaming"));
    assert_eq!(media.get_i64("trackPlaybackProgress"), Some(45));
}

#[test]
fn response_correlates_with_request() {
    let mut request = RpcMessage::request(&GET_APP_SERVICE_DATA);
    request.set_correlation_id(41);

    let mut service_data = RpcStruct::new(&APP_SERVICE_DATA);
    service_data.set("serviceType", "WEATHER").unwrap();

    let mut response = RpcMessage::response(
        &GET_APP_SERVICE_DATA_RESPONSE,
        request.correlation_id().unwrap(),
        true,
        ResultCode::Success,
    );
    response.set("serviceData", service_data).unwrap();

    let decoded =
        RpcMessage::from_tree(&GET_APP_SERVICE_DATA_RESPONSE, &response.to_tree()).unwrap();
    assert_eq!(decoded.correlation_id(), request.correlation_id());
    assert_eq!(decoded.success(), Some(true));
    assert_eq!(decoded.result_code(), Some(ResultCode::Success));
}

#[test]
fn notification_round_trip_has_no_correlation() {
    let mut note = RpcMessage::notification(&ON_APP_SERVICE_DATA);
    note.set_parameter(
        "serviceData",
        Some(json!({ "serviceType": "NAVIGATION" }).into()),
    );

    let mut decoded = RpcMessage::from_tree(&ON_APP_SERVICE_DATA, &note.to_tree()).unwrap();
    assert_eq!(decoded.kind(), MessageKind::Notification);
    assert_eq!(decoded.correlation_id(), None);
    assert_eq!(
        decoded
            .get_struct("serviceData")
            .unwrap()
            .get_str("serviceType"),
        Some("NAVIGATION")
    );
}

#[test]
fn array_setter_is_atomic_across_positions() {
    for bad_position in 0..3 {
        let mut alert = RpcMessage::request(&ALERT_MANEUVER);

        let mut chunks: Vec<serde_json::Value> = (0..3)
            .map(|i| json!({ "text": format!("turn {i}"), "type": "TEXT" }))
            .collect();
        chunks[bad_position] = json!("not a chunk");

        let err = alert.set("ttsChunks", json!(chunks)).unwrap_err();
        assert!(matches!(err, ProtocolError::TypeMismatch { .. }));
        assert!(alert.body().store().is_empty(), "no partial store");
    }

    // and the all-valid sequences succeed, including the empty one
    let mut alert = RpcMessage::request(&ALERT_MANEUVER);
    alert.set("ttsChunks", json!([])).unwrap();
    let mut chunk = RpcStruct::new(&TTS_CHUNK);
    chunk.set("text", "turn left").unwrap();
    alert.set("ttsChunks", vec![chunk]).unwrap();
    assert_eq!(alert.get_struct_array("ttsChunks").unwrap().len(), 1);
}

#[test]
fn unknown_keys_survive_an_edit_round_trip() {
    // a newer producer sent fields this schema version does not declare
    let wire = json!({
        "function": "GetAppServiceData",
        "messageType": "request",
        "correlationId": 7,
        "parameters": {
            "serviceType": "MEDIA",
            "futureFlag": true,
            "futureBlob": { "nested": [1, 2, 3] }
        }
    });

    let mut decoded = RpcMessage::from_tree(&GET_APP_SERVICE_DATA, &wire).unwrap();
    decoded.set("serviceType", "WEATHER").unwrap();

    let out = decoded.to_tree();
    assert_eq!(out["parameters"]["serviceType"], json!("WEATHER"));
    assert_eq!(out["parameters"]["futureFlag"], json!(true));
    assert_eq!(out["parameters"]["futureBlob"], wire["parameters"]["futureBlob"]);
    assert_eq!(out["correlationId"], json!(7));
}

#[test]
fn malformed_nested_data_never_aborts_a_read() {
    let wire = json!({
        "function": "GetAppServiceData",
        "messageType": "response",
        "correlationId": 9,
        "success": false,
        "resultCode": "GENERIC_ERROR",
        "parameters": {
            // schema violation: serviceData should be an object
            "serviceData": 123
        }
    });

    let mut decoded = RpcMessage::from_tree(&GET_APP_SERVICE_DATA_RESPONSE, &wire).unwrap();
    // the failed response still exposes its framing and readable fields
    assert_eq!(decoded.success(), Some(false));
    assert_eq!(decoded.result_code(), Some(ResultCode::GenericError));
    assert!(decoded.get_struct("serviceData").is_none());
}
