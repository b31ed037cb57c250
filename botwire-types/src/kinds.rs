//! Typed views over string fields whose set of values grows with the API.
//!
//! The raw string stays in the record so that values introduced by newer
//! Bot API releases still decode; the lookups below map anything unknown to
//! an `Unknown` variant instead of failing.

use crate::types;

/// Kind of a sticker or sticker set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StickerType {
    Regular,
    Mask,
    CustomEmoji,
    /// A kind this version of the library does not know about.
    Unknown,
}

impl StickerType {
    /// The wire value, or `None` for [`StickerType::Unknown`].
    pub fn as_str(self) -> Option<&'static str> {
        Some(match self {
            Self::Regular     => "regular",
            Self::Mask        => "mask",
            Self::CustomEmoji => "custom_emoji",
            Self::Unknown     => return None,
        })
    }
}

impl From<&str> for StickerType {
    fn from(s: &str) -> Self {
        match s {
            "regular"      => Self::Regular,
            "mask"         => Self::Mask,
            "custom_emoji" => Self::CustomEmoji,
            _ => Self::Unknown,
        }
    }
}

/// The part of the face relative to which a mask is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskPoint {
    Forehead,
    Eyes,
    Mouth,
    Chin,
    Unknown,
}

impl MaskPoint {
    /// The wire value, or `None` for [`MaskPoint::Unknown`].
    pub fn as_str(self) -> Option<&'static str> {
        Some(match self {
            Self::Forehead => "forehead",
            Self::Eyes     => "eyes",
            Self::Mouth    => "mouth",
            Self::Chin     => "chin",
            Self::Unknown  => return None,
        })
    }
}

impl From<&str> for MaskPoint {
    fn from(s: &str) -> Self {
        match s {
            "forehead" => Self::Forehead,
            "eyes"     => Self::Eyes,
            "mouth"    => Self::Mouth,
            "chin"     => Self::Chin,
            _ => Self::Unknown,
        }
    }
}

impl types::Sticker {
    /// Typed view of [`types::Sticker::type`](types::Sticker).
    pub fn sticker_type(&self) -> StickerType {
        StickerType::from(self.r#type.as_str())
    }

    /// `true` for video stickers and animated stickers alike.
    pub fn is_moving(&self) -> bool {
        self.is_animated || self.is_video
    }
}

impl types::StickerSet {
    pub fn sticker_type(&self) -> StickerType {
        StickerType::from(self.sticker_type.as_str())
    }
}

impl types::MaskPosition {
    pub fn mask_point(&self) -> MaskPoint {
        MaskPoint::from(self.point.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticker_type_round_trips_known_values() {
        for ty in [StickerType::Regular, StickerType::Mask, StickerType::CustomEmoji] {
            assert_eq!(StickerType::from(ty.as_str().unwrap()), ty);
        }
    }

    #[test]
    fn unknown_values_do_not_fail() {
        assert_eq!(StickerType::from("hologram"), StickerType::Unknown);
        assert_eq!(MaskPoint::from(""), MaskPoint::Unknown);
        assert_eq!(MaskPoint::Unknown.as_str(), None);
    }
}
