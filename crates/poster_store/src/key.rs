//! Store key set and value coercion helpers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Keys held by the poster store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreKey {
    /// Object URL of the classic poster photo.
    PhotoUrl,
    /// Object URL of the criminal poster avatar.
    AvatarUrl,
    /// Wanted name.
    Name,
    /// Bounty amount, kept as text.
    Bounty,
    /// Name letter spacing.
    NameSpacing,
    /// Bounty letter spacing.
    BountySpacing,
    /// Photo shadow strength.
    Shadow,
    /// Photo CSS filter.
    Filter,
}

impl StoreKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::PhotoUrl,
        Self::AvatarUrl,
        Self::Name,
        Self::Bounty,
        Self::NameSpacing,
        Self::BountySpacing,
        Self::Shadow,
        Self::Filter,
    ];

    /// Stable key token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhotoUrl => "photoUrl",
            Self::AvatarUrl => "avatarUrl",
            Self::Name => "name",
            Self::Bounty => "bounty",
            Self::NameSpacing => "nameSpacing",
            Self::BountySpacing => "bountySpacing",
            Self::Shadow => "shadow",
            Self::Filter => "filter",
        }
    }

    /// Value a fresh store holds for this key.
    pub fn default_value(self) -> Value {
        match self {
            Self::PhotoUrl | Self::AvatarUrl | Self::Name | Self::Bounty | Self::Filter => {
                json!("")
            }
            Self::NameSpacing | Self::BountySpacing | Self::Shadow => json!(0),
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerces a store value to the string written into DOM attributes.
///
/// Strings pass through, `null` becomes empty, and everything else uses its JSON text.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
