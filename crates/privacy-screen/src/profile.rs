//! Device-class profile for cover sizing.
//!
//! Purely descriptive flags. The only behavior attached to a profile is
//! picking cover dimensions on hosts that cannot measure the live window;
//! hosts that can measure never consult it.

use serde::{Deserialize, Serialize};

use crate::host::CoverRect;

/// Cover dimensions per device tier, logical pixels, portrait.
const COMPACT_PHONE_COVER: (u32, u32) = (320, 568);
const PHONE_COVER: (u32, u32) = (375, 667);
const EXTENDED_PHONE_COVER: (u32, u32) = (414, 896);
const TABLET_COVER: (u32, u32) = (768, 1024);

/// Shortest side at or above which a device counts as a tablet.
const TABLET_MIN_SIDE: u32 = 768;
/// Height at or below which a phone counts as compact.
const COMPACT_MAX_HEIGHT: u32 = 568;
/// Height at or above which a phone counts as extended.
const EXTENDED_MIN_HEIGHT: u32 = 812;

/// Boolean device-class flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeviceProfile {
    pub phone: bool,
    pub tablet: bool,
    /// Small-screen phone tier.
    pub compact_screen: bool,
    /// Tall/large phone tier.
    pub extended_screen: bool,
}

impl DeviceProfile {
    /// Derive a profile from window or screen metrics (logical pixels).
    pub fn classify(width: u32, height: u32) -> Self {
        let tablet = width.min(height) >= TABLET_MIN_SIDE;
        Self {
            phone: !tablet,
            tablet,
            compact_screen: !tablet && height <= COMPACT_MAX_HEIGHT,
            extended_screen: !tablet && height >= EXTENDED_MIN_HEIGHT,
        }
    }

    /// Cover frame for this device class, anchored at the origin.
    pub fn cover_rect(&self) -> CoverRect {
        let (width, height) = if self.tablet {
            TABLET_COVER
        } else if self.compact_screen {
            COMPACT_PHONE_COVER
        } else if self.extended_screen {
            EXTENDED_PHONE_COVER
        } else {
            PHONE_COVER
        };
        CoverRect::sized(width, height)
    }
}
