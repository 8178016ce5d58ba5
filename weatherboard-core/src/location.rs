use async_trait::async_trait;

use crate::{error::LocationError, model::Coordinates};

/// Supplies the device position, or reports why it can't.
#[async_trait]
pub trait GeolocationSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A fixed position, or none at all (treated as unavailable).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<Coordinates>);

#[async_trait]
impl GeolocationSource for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.0.ok_or(LocationError::Unavailable)
    }
}
