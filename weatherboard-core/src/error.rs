use thiserror::Error;

/// Failures of the current-conditions lookup.
///
/// Forecast and rain requests never produce these; they degrade to empty
/// results instead.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("location not found (provider answered {status})")]
    LocationNotFound { status: u16 },

    #[error("request to weather provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed weather payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl GatewayError {
    /// Text shown in the dashboard's error slot.
    pub fn user_message(&self) -> &'static str {
        match self {
            GatewayError::LocationNotFound { .. } => "도시를 찾을 수 없습니다.",
            GatewayError::Transport(_) | GatewayError::Malformed(_) => {
                "날씨 정보를 불러오는 데 실패했습니다."
            }
        }
    }
}

/// Why a geolocation source could not supply coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location unavailable")]
    Unavailable,
}

/// Recent-city store I/O errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("recent-city store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("recent-city list could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
