use thiserror::Error;

use crate::handler::HandlerError;

/// Descriptive class of a coded platform failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformErrorKind {
    ServiceUnavailable,
    ResourceNotFound,
    InvalidRequestContent,
    RequestTooLarge,
    UnsupportedMediaType,
    TooManyRequests,
    InvalidParameterValue,
    /// The function's VPC networking could not be set up.
    NetworkConfiguration,
    /// The function's environment could not be decrypted.
    Encryption,
    /// The deployment package or runtime is unusable.
    FunctionPackage,
    /// Any code missing from [`PLATFORM_ERROR_CODES`].
    Unclassified,
}

impl PlatformErrorKind {
    pub fn description(self) -> &'static str {
        match self {
            Self::ServiceUnavailable => "service unavailable",
            Self::ResourceNotFound => "resource not found",
            Self::InvalidRequestContent => "invalid request content",
            Self::RequestTooLarge => "payload too large",
            Self::UnsupportedMediaType => "unsupported payload type",
            Self::TooManyRequests => "rate limited",
            Self::InvalidParameterValue => "invalid parameter value",
            Self::NetworkConfiguration => "function network configuration failure",
            Self::Encryption => "function environment encryption failure",
            Self::FunctionPackage => "invalid function package",
            Self::Unclassified => "unclassified platform error",
        }
    }
}

impl std::fmt::Display for PlatformErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Platform error codes with a known classification.
pub const PLATFORM_ERROR_CODES: &[(&str, PlatformErrorKind)] = &[
    ("ServiceException", PlatformErrorKind::ServiceUnavailable),
    ("ResourceNotFoundException", PlatformErrorKind::ResourceNotFound),
    (
        "InvalidRequestContentException",
        PlatformErrorKind::InvalidRequestContent,
    ),
    ("RequestTooLargeException", PlatformErrorKind::RequestTooLarge),
    (
        "UnsupportedMediaTypeException",
        PlatformErrorKind::UnsupportedMediaType,
    ),
    ("TooManyRequestsException", PlatformErrorKind::TooManyRequests),
    (
        "InvalidParameterValueException",
        PlatformErrorKind::InvalidParameterValue,
    ),
    ("EC2UnexpectedException", PlatformErrorKind::NetworkConfiguration),
    (
        "SubnetIPAddressLimitReachedException",
        PlatformErrorKind::NetworkConfiguration,
    ),
    ("ENILimitReachedException", PlatformErrorKind::NetworkConfiguration),
    ("EC2ThrottledException", PlatformErrorKind::NetworkConfiguration),
    ("EC2AccessDeniedException", PlatformErrorKind::NetworkConfiguration),
    ("InvalidSubnetIDException", PlatformErrorKind::NetworkConfiguration),
    (
        "InvalidSecurityGroupIDException",
        PlatformErrorKind::NetworkConfiguration,
    ),
    ("KMSDisabledException", PlatformErrorKind::Encryption),
    ("KMSInvalidStateException", PlatformErrorKind::Encryption),
    ("KMSAccessDeniedException", PlatformErrorKind::Encryption),
    ("KMSNotFoundException", PlatformErrorKind::Encryption),
    ("InvalidZipFileException", PlatformErrorKind::FunctionPackage),
    ("InvalidRuntimeException", PlatformErrorKind::FunctionPackage),
];

pub fn classify_platform_code(code: &str) -> PlatformErrorKind {
    PLATFORM_ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, kind)| *kind)
        .unwrap_or(PlatformErrorKind::Unclassified)
}

#[derive(Debug, Error)]
pub enum InvokeError {
    /// Caller configuration error, raised before any call is made.
    #[error("no function name given")]
    MissingFunctionName,
    #[error("input failed to marshal: {0}")]
    Marshal(#[source] serde_json::Error),
    #[error("{code}: {message}")]
    Platform {
        kind: PlatformErrorKind,
        code: String,
        message: String,
    },
    /// Uncoded client failure, displayed exactly as the client reported it.
    #[error(transparent)]
    Transport(HandlerError),
}

impl InvokeError {
    pub(crate) fn platform(code: String, message: String) -> Self {
        Self::Platform {
            kind: classify_platform_code(&code),
            code,
            message,
        }
    }

    pub fn platform_kind(&self) -> Option<PlatformErrorKind> {
        match self {
            Self::Platform { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn platform_code(&self) -> Option<&str> {
        match self {
            Self::Platform { code, .. } => Some(code),
            _ => None,
        }
    }
}
