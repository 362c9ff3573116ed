//! Protocol identifier enumerations.
//!
//! Both enumerations are closed, externally-defined tag sets. The full
//! protocol defines hundreds of function identifiers and several dozen
//! result codes; this crate carries the subset bound by the vocabulary in
//! [`crate::messages`].

use serde::{Deserialize, Serialize};

/// Function identifier: the message-type tag every concrete message binds
/// exactly one of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionId {
    /// Application registration handshake.
    RegisterAppInterface,
    /// Publish an app service to the host.
    PublishAppService,
    /// Fetch the current data of an app service.
    GetAppServiceData,
    /// Push notification carrying updated app service data.
    OnAppServiceData,
    /// Display a maneuver alert with optional TTS and soft buttons.
    AlertManeuver,
}

impl FunctionId {
    /// Wire tag for this function identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionId::RegisterAppInterface => "RegisterAppInterface",
            FunctionId::PublishAppService => "PublishAppService",
            FunctionId::GetAppServiceData => "GetAppServiceData",
            FunctionId::OnAppServiceData => "OnAppServiceData",
            FunctionId::AlertManeuver => "AlertManeuver",
        }
    }

    /// Parses a wire tag, returning `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "RegisterAppInterface" => Some(FunctionId::RegisterAppInterface),
            "PublishAppService" => Some(FunctionId::PublishAppService),
            "GetAppServiceData" => Some(FunctionId::GetAppServiceData),
            "OnAppServiceData" => Some(FunctionId::OnAppServiceData),
            "AlertManeuver" => Some(FunctionId::AlertManeuver),
            _ => None,
        }
    }
}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome tag carried by RESPONSE envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    /// The request completed successfully.
    Success,
    /// The request was rejected by the host.
    Rejected,
    /// The sender is not allowed to issue this request.
    Disallowed,
    /// The request carried data the host could not accept.
    InvalidData,
    /// The host ran out of memory processing the request.
    OutOfMemory,
    /// Unspecified failure.
    GenericError,
}

impl ResultCode {
    /// Wire tag for this result code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::Success => "SUCCESS",
            ResultCode::Rejected => "REJECTED",
            ResultCode::Disallowed => "DISALLOWED",
            ResultCode::InvalidData => "INVALID_DATA",
            ResultCode::OutOfMemory => "OUT_OF_MEMORY",
            ResultCode::GenericError => "GENERIC_ERROR",
        }
    }

    /// Parses a wire tag, returning `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SUCCESS" => Some(ResultCode::Success),
            "REJECTED" => Some(ResultCode::Rejected),
            "DISALLOWED" => Some(ResultCode::Disallowed),
            "INVALID_DATA" => Some(ResultCode::InvalidData),
            "OUT_OF_MEMORY" => Some(ResultCode::OutOfMemory),
            "GENERIC_ERROR" => Some(ResultCode::GenericError),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
