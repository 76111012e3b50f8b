//! Asset-class registry: identifier -> generation/sourcing profile.

use std::collections::BTreeMap;

use crate::data::regimes::{builtin_profiles, default_source_path, fallback_profile};
use crate::domain::{AssetClass, AssetProfile};
use crate::error::{DataError, ErrorKind};

#[derive(Debug, Clone)]
pub struct AssetRegistry {
    profiles: BTreeMap<AssetClass, AssetProfile>,
}

impl AssetRegistry {
    pub fn empty() -> Self {
        Self {
            profiles: BTreeMap::new(),
        }
    }

    /// Registry preloaded with the built-in indices and metals.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for profile in builtin_profiles() {
            registry.profiles.insert(profile.asset.clone(), profile);
        }
        registry
    }

    /// Add or replace a profile. Returns the profile it replaced, if any.
    ///
    /// Profiles that cannot drive generation (see `AssetProfile::validate`)
    /// are rejected and the registry is left unchanged.
    pub fn register(&mut self, profile: AssetProfile) -> Result<Option<AssetProfile>, DataError> {
        if profile.asset.as_str().is_empty() {
            return Err(DataError::new(ErrorKind::InvalidInput, "Asset id must not be empty."));
        }
        profile.validate()?;
        Ok(self.profiles.insert(profile.asset.clone(), profile))
    }

    /// Register a sub-index that borrows its parent's regimes, rounding and
    /// currency but has its own identifier and source location.
    pub fn register_sub_index(
        &mut self,
        id: &str,
        display_name: &str,
        parent: &AssetClass,
    ) -> Result<&AssetProfile, DataError> {
        let asset = AssetClass::new(id);
        if asset.as_str().is_empty() {
            return Err(DataError::new(ErrorKind::InvalidInput, "Sub-index id must not be empty."));
        }
        let parent_profile = self.profiles.get(parent).ok_or_else(|| {
            DataError::new(
                ErrorKind::InvalidInput,
                format!("Unknown parent asset class '{parent}'."),
            )
        })?;

        let profile = AssetProfile {
            source_path: default_source_path(&asset),
            asset: asset.clone(),
            display_name: display_name.to_string(),
            ..parent_profile.clone()
        };
        profile.validate()?;
        self.profiles.insert(asset.clone(), profile);
        self.profiles
            .get(&asset)
            .ok_or_else(|| DataError::new(ErrorKind::InvalidInput, "Sub-index registration failed."))
    }

    pub fn get(&self, asset: &AssetClass) -> Option<&AssetProfile> {
        self.profiles.get(asset)
    }

    /// Registered profile, or a generic one for unknown identifiers.
    pub fn profile_or_fallback(&self, asset: &AssetClass) -> AssetProfile {
        self.profiles
            .get(asset)
            .cloned()
            .unwrap_or_else(|| fallback_profile(asset))
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetClass> {
        self.profiles.keys()
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
