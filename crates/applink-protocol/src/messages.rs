//! Representative message and struct vocabulary.
//!
//! The full protocol defines hundreds of concrete messages and structs;
//! they are generated declarations, not logic, and live outside this crate.
//! This module carries a representative subset (the app-service family and
//! one display message) as the immutable declaration tables the generic
//! engine runs on. Each table is data only: key names, expected kinds,
//! array-ness, and (for messages) the bound function identifier and
//! category.

use crate::envelope::{MessageKind, MessageSchema};
use crate::ids::FunctionId;
use crate::schema::{ParamKind, ParamSpec, Schema};

/// Data a media service provides: track metadata and playback position.
pub static MEDIA_SERVICE_DATA: Schema = Schema {
    name: "MediaServiceData",
    params: &[
        ParamSpec::new("mediaType", ParamKind::String),
        ParamSpec::new("mediaTitle", ParamKind::String),
        ParamSpec::new("mediaArtist", ParamKind::String),
        ParamSpec::new("mediaAlbum", ParamKind::String),
        ParamSpec::new("isExplicit", ParamKind::Bool),
        ParamSpec::new("trackPlaybackProgress", ParamKind::Integer),
        ParamSpec::new("trackPlaybackDuration", ParamKind::Integer),
    ],
};

/// One forecast sample inside a weather service payload.
pub static WEATHER_DATA: Schema = Schema {
    name: "WeatherData",
    params: &[
        ParamSpec::new("weatherSummary", ParamKind::String),
        ParamSpec::new("precipProbability", ParamKind::Integer),
        // temperature objects are host-defined; carried as passthrough
        ParamSpec::new("temperature", ParamKind::Raw),
    ],
};

/// Data a weather service provides.
pub static WEATHER_SERVICE_DATA: Schema = Schema {
    name: "WeatherServiceData",
    params: &[
        ParamSpec::new("location", ParamKind::Raw),
        ParamSpec::new("currentForecast", ParamKind::Struct(&WEATHER_DATA)),
        ParamSpec::array("minuteForecast", ParamKind::Struct(&WEATHER_DATA)),
    ],
};

/// Data a navigation service provides.
pub static NAVIGATION_SERVICE_DATA: Schema = Schema {
    name: "NavigationServiceData",
    params: &[
        ParamSpec::new("timeStamp", ParamKind::Raw),
        ParamSpec::new("prompt", ParamKind::String),
        ParamSpec::new("nextInstructionDistance", ParamKind::Float),
        ParamSpec::array("instructions", ParamKind::Raw),
    ],
};

/// Current data of one app service. `serviceType` selects which of the
/// nested service-data structs is populated (e.g. MEDIA implies
/// `mediaServiceData`).
pub static APP_SERVICE_DATA: Schema = Schema {
    name: "AppServiceData",
    params: &[
        ParamSpec::new("serviceType", ParamKind::String),
        ParamSpec::new("serviceID", ParamKind::String),
        ParamSpec::new("mediaServiceData", ParamKind::Struct(&MEDIA_SERVICE_DATA)),
        ParamSpec::new("weatherServiceData", ParamKind::Struct(&WEATHER_SERVICE_DATA)),
        ParamSpec::new(
            "navigationServiceData",
            ParamKind::Struct(&NAVIGATION_SERVICE_DATA),
        ),
    ],
};

/// One chunk of text-to-speech output.
pub static TTS_CHUNK: Schema = Schema {
    name: "TTSChunk",
    params: &[
        ParamSpec::new("text", ParamKind::String),
        ParamSpec::new("type", ParamKind::String),
    ],
};

/// A soft button shown alongside an alert.
pub static SOFT_BUTTON: Schema = Schema {
    name: "SoftButton",
    params: &[
        ParamSpec::new("type", ParamKind::String),
        ParamSpec::new("text", ParamKind::String),
        ParamSpec::new("isHighlighted", ParamKind::Bool),
        ParamSpec::new("softButtonID", ParamKind::Integer),
        ParamSpec::new("systemAction", ParamKind::String),
    ],
};

/// Fetch the current data of the app service of the given type.
pub static GET_APP_SERVICE_DATA: MessageSchema = MessageSchema {
    function: FunctionId::GetAppServiceData,
    kind: MessageKind::Request,
    params: Schema {
        name: "GetAppServiceData",
        params: &[ParamSpec::new("serviceType", ParamKind::String)],
    },
};

/// Response carrying the requested app service data.
pub static GET_APP_SERVICE_DATA_RESPONSE: MessageSchema = MessageSchema {
    function: FunctionId::GetAppServiceData,
    kind: MessageKind::Response,
    params: Schema {
        name: "GetAppServiceDataResponse",
        params: &[ParamSpec::new("serviceData", ParamKind::Struct(&APP_SERVICE_DATA))],
    },
};

/// Push notification sent when an app service's data changes.
pub static ON_APP_SERVICE_DATA: MessageSchema = MessageSchema {
    function: FunctionId::OnAppServiceData,
    kind: MessageKind::Notification,
    params: Schema {
        name: "OnAppServiceData",
        params: &[ParamSpec::new("serviceData", ParamKind::Struct(&APP_SERVICE_DATA))],
    },
};

/// Show a maneuver alert, optionally speaking it and offering soft buttons.
pub static ALERT_MANEUVER: MessageSchema = MessageSchema {
    function: FunctionId::AlertManeuver,
    kind: MessageKind::Request,
    params: Schema {
        name: "AlertManeuver",
        params: &[
            ParamSpec::array("ttsChunks", ParamKind::Struct(&TTS_CHUNK)),
            ParamSpec::array("softButtons", ParamKind::Struct(&SOFT_BUTTON)),
        ],
    },
};

/// Acknowledgement of an AlertManeuver; carries no body parameters.
pub static ALERT_MANEUVER_RESPONSE: MessageSchema = MessageSchema {
    function: FunctionId::AlertManeuver,
    kind: MessageKind::Response,
    params: Schema {
        name: "AlertManeuverResponse",
        params: &[],
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpcstruct::RpcStruct;

    fn assert_unique_keys(schema: &Schema) {
        for (i, spec) in schema.params.iter().enumerate() {
            for other in &schema.params[i + 1..] {
                assert_ne!(spec.key, other.key, "duplicate key in {}", schema.name);
            }
        }
    }

    #[test]
    fn struct_tables_declare_unique_keys() {
        for schema in [
            &MEDIA_SERVICE_DATA,
            &WEATHER_DATA,
            &WEATHER_SERVICE_DATA,
            &NAVIGATION_SERVICE_DATA,
            &APP_SERVICE_DATA,
            &TTS_CHUNK,
            &SOFT_BUTTON,
        ] {
            assert_unique_keys(schema);
        }
    }

    #[test]
    fn message_tables_bind_expected_functions() {
        assert_eq!(GET_APP_SERVICE_DATA.function, FunctionId::GetAppServiceData);
        assert_eq!(GET_APP_SERVICE_DATA.kind, MessageKind::Request);
        assert_eq!(
            GET_APP_SERVICE_DATA_RESPONSE.function,
            FunctionId::GetAppServiceData
        );
        assert_eq!(GET_APP_SERVICE_DATA_RESPONSE.kind, MessageKind::Response);
        assert_eq!(ON_APP_SERVICE_DATA.kind, MessageKind::Notification);
        assert_eq!(ALERT_MANEUVER.kind, MessageKind::Request);
        assert_eq!(ALERT_MANEUVER_RESPONSE.params.params.len(), 0);
    }

    #[test]
    fn app_service_data_accessors() {
        let mut data = RpcStruct::new(&APP_SERVICE_DATA);
        data.set("serviceType", "MEDIA").unwrap();

        let mut media = RpcStruct::new(&MEDIA_SERVICE_DATA);
        media.set("mediaTitle", "Daydreaming").unwrap();
        media.set("trackPlaybackProgress", 45i64).unwrap();
        data.set("mediaServiceData", media).unwrap();

        assert_eq!(data.get_str("serviceType"), Some("MEDIA"));
        let media = data.get_struct("mediaServiceData").unwrap();
        assert_eq!(media.get_str("mediaTitle"), Some("Daydreaming"));
        assert_eq!(media.get_i64("trackPlaybackProgress"), Some(45));
    }
}
