//! Geo Repository Port
//!
//! Read-only access to the store's city table and its nearest-larger-city
//! lookup function.

use async_trait::async_trait;

use crate::domain::{entities::City, errors::DomainError};

/// Repository interface for geographic lookups.
#[async_trait]
pub trait GeoRepository: Send + Sync {
    /// Case-insensitive partial match on the place name; first match wins.
    async fn find_city(&self, place: &str) -> Result<Option<City>, DomainError>;

    /// Name of the nearest larger population center within `radius_meters`
    /// of the given coordinates, if any.
    async fn nearest_big_city(
        &self,
        lat: f64,
        lng: f64,
        radius_meters: u32,
    ) -> Result<Option<String>, DomainError>;
}
