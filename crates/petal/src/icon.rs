use crate::geometry::ChildIndex;
use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use parking_lot::RwLock;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

const LOOKUP_SIZE: u16 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct IconName(String);

crate::string_newtype!(IconName);

/// Actions a child button can show, in their default fan-out order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChildIcon {
    Pencil,
    At,
    Camera,
    Bell,
    Comment,
    Bolt,
    Ban,
    Code,
}

impl ChildIcon {
    /// Icon-theme name used to find an image for this action.
    pub fn theme_name(&self) -> IconName {
        IconName::from(match self {
            Self::Pencil => "document-edit-symbolic",
            Self::At => "mail-send-symbolic",
            Self::Camera => "camera-photo-symbolic",
            Self::Bell => "preferences-system-notifications-symbolic",
            Self::Comment => "user-available-symbolic",
            Self::Bolt => "weather-storm-symbolic",
            Self::Ban => "action-unavailable-symbolic",
            Self::Code => "text-x-script-symbolic",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IconError {
    #[error("at least one child icon is required")]
    Empty,
}

/// Ordered icons for the children, reused cyclically when there are more
/// children than icons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet(Vec<ChildIcon>);

impl IconSet {
    pub fn new(icons: Vec<ChildIcon>) -> Result<Self, IconError> {
        if icons.is_empty() {
            return Err(IconError::Empty);
        }
        Ok(Self(icons))
    }

    pub fn get(&self, index: ChildIndex) -> ChildIcon {
        self.0[*index % self.0.len()]
    }

    pub fn as_slice(&self) -> &[ChildIcon] {
        &self.0
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self(ChildIcon::iter().collect())
    }
}

static ICON_PATHS: OnceLock<RwLock<HashMap<IconName, Option<PathBuf>>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<IconName, Option<PathBuf>>> {
    ICON_PATHS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolves a theme icon name to a file. Lookups are cached, including misses.
pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    if let Some(hit) = cache().read().get(icon_name) {
        return hit.clone();
    }

    let found = lookup(icon_name.as_str())
        .with_size(LOOKUP_SIZE)
        .with_scale(1)
        .find();
    if found.is_none() {
        log::debug!("No theme icon found for '{}'", icon_name);
    }
    cache().write().insert(icon_name.clone(), found.clone());
    found
}

pub fn clear_cache() {
    cache().write().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_deserialization() {
        let cases = vec![
            ("\"pencil\"", ChildIcon::Pencil),
            ("\"Pencil\"", ChildIcon::Pencil),
            ("\"AT\"", ChildIcon::At),
            ("\"comment\"", ChildIcon::Comment),
            ("\"Code\"", ChildIcon::Code),
        ];

        for (json, expected) in cases {
            let deserialized: ChildIcon = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<ChildIcon>("\"rocket\"").is_err());
    }

    #[test]
    fn test_icon_display_is_lowercase() {
        assert_eq!(ChildIcon::Camera.to_string(), "camera");
        assert_eq!(serde_json::to_string(&ChildIcon::Bell).unwrap(), "\"bell\"");
    }

    #[test]
    fn test_default_icon_order() {
        let icons = IconSet::default();
        assert_eq!(icons.as_slice().len(), 8);
        assert_eq!(icons.get(ChildIndex::from(0)), ChildIcon::Pencil);
        assert_eq!(icons.get(ChildIndex::from(4)), ChildIcon::Comment);
    }

    #[test]
    fn test_icons_reused_cyclically() {
        let icons = IconSet::new(vec![ChildIcon::Bolt, ChildIcon::Ban]).unwrap();
        assert_eq!(icons.get(ChildIndex::from(2)), ChildIcon::Bolt);
        assert_eq!(icons.get(ChildIndex::from(5)), ChildIcon::Ban);
    }

    #[test]
    fn test_empty_icon_set_rejected() {
        assert_eq!(IconSet::new(Vec::new()), Err(IconError::Empty));
    }

    #[test]
    fn test_empty_icon_name_resolves_to_nothing() {
        assert_eq!(find_icon_path(&IconName::from("")), None);
    }
}
