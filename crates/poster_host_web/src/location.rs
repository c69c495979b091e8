//! Browser location fragment adapter.

use poster_host::LocationService;

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Location service backed by `window.location.hash`.
pub struct WebLocationService;

impl LocationService for WebLocationService {
    fn hash(&self) -> String {
        bridge::location_hash()
    }

    fn set_hash(&self, hash: &str) {
        bridge::set_location_hash(hash);
    }
}
