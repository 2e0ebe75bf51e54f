// Fixed colour sets for the two themes. Colours are 0x00RRGGBB.

use crate::types::Theme;

/// Number of mountain bands; one colour per layer.
pub const MOUNTAIN_BANDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub sky: u32,
    pub mountains: [u32; MOUNTAIN_BANDS], // index 0 = nearest layer
    pub cloud: u32,
    pub cloud_shadow: u32,
    pub star: Option<u32>,                // only the dark set has stars
}

pub const LIGHT: Palette = Palette {
    sky: 0x00_34_98_DB,
    mountains: [0x00_2E_CC_71, 0x00_27_AE_60, 0x00_1E_84_49, 0x00_19_6F_3D],
    cloud: 0x00_EC_F0_F1,
    cloud_shadow: 0x00_BD_C3_C7,
    star: None,
};

pub const DARK: Palette = Palette {
    sky: 0x00_1A_26_39,
    mountains: [0x00_34_49_5E, 0x00_2C_3E_50, 0x00_21_2F_3D, 0x00_17_20_2A],
    cloud: 0x00_34_49_5E,
    cloud_shadow: 0x00_2C_3E_50,
    star: Some(0x00_EC_F0_F1),
};

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}

#[inline]
pub fn unpack(c: u32) -> (u8, u8, u8) {
    (((c >> 16) & 0xFF) as u8, ((c >> 8) & 0xFF) as u8, (c & 0xFF) as u8)
}

#[inline]
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
