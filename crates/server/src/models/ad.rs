//! Promotional ad types.

use iceshopz_core::AdId;
use serde::{Deserialize, Serialize};

/// A promotional banner. Independent of orders; admin-owned content.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ad {
    pub id: AdId,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub active: bool,
}

/// Payload for creating an ad.
#[derive(Debug, Deserialize)]
pub struct NewAd {
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Patch for partial ad updates; unset fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct AdPatch {
    pub title: Option<String>,
    pub image_url: Option<String>,
    /// `Some(None)` clears the link; absent leaves it unchanged.
    #[serde(default, with = "double_option")]
    pub link_url: Option<Option<String>>,
    pub active: Option<bool>,
}

impl AdPatch {
    /// Whether the patch changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.image_url.is_none()
            && self.link_url.is_none()
            && self.active.is_none()
    }
}

/// Serde helper distinguishing an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(de).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_absent_vs_null_link() {
        let patch: AdPatch = serde_json::from_str(r#"{"title": "Chocolate Week"}"#).expect("valid");
        assert_eq!(patch.link_url, None);

        let patch: AdPatch = serde_json::from_str(r#"{"link_url": null}"#).expect("valid");
        assert_eq!(patch.link_url, Some(None));

        let patch: AdPatch =
            serde_json::from_str(r#"{"link_url": "https://example.com"}"#).expect("valid");
        assert_eq!(patch.link_url, Some(Some("https://example.com".to_string())));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(AdPatch::default().is_empty());
        let patch: AdPatch = serde_json::from_str(r#"{"active": false}"#).expect("valid");
        assert!(!patch.is_empty());
    }
}
