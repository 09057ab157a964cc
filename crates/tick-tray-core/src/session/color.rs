use rand::Rng;

/// Channels are drawn from the upper half of the byte range so the tint is
/// always light enough for legible text overlay.
const BRIGHT_CHANNEL_MIN: u8 = 128;

/// RGB tint rendered behind the notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl HighlightColor {
    /// Draw a color uniformly at random from the bright range, each channel
    /// independent over 128..=255.
    pub fn random_bright() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            r: rng.gen_range(BRIGHT_CHANNEL_MIN..=u8::MAX),
            g: rng.gen_range(BRIGHT_CHANNEL_MIN..=u8::MAX),
            b: rng.gen_range(BRIGHT_CHANNEL_MIN..=u8::MAX),
        }
    }

    /// `#rrggbb` form for notification hints.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub(crate) fn pack(self) -> u32 {
        u32::from(self.r) << 16 | u32::from(self.g) << 8 | u32::from(self.b)
    }

    pub(crate) fn unpack(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }
}
