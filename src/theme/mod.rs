//! Per-OS presentation themes: the audio cue parameters and the marquee
//! phrase pool. Six categories share three themes, the same grouping the
//! page used for its audio files (Apple platforms together, desktop
//! Windows/Linux together, Android on its own).

use crate::classifier::OsCategory;

/// Parameters for a synthesized endless cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueSpec {
    /// Left-channel tone frequency in Hz.
    pub base_freq: f32,
    /// Right-channel tone frequency; the small offset produces the beat.
    pub beat_freq: f32,
    /// Noise bed mix, 0.0 to 1.0.
    pub noise_level: f32,
}

/// Everything the presentation side needs for one guessed OS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OsTheme {
    pub name: &'static str,
    pub cue: CueSpec,
    pub marquee: &'static [&'static str],
}

static APPLE_THEME: OsTheme = OsTheme {
    name: "apple",
    cue: CueSpec {
        base_freq: 432.0,
        beat_freq: 436.0,
        noise_level: 0.0,
    },
    marquee: &[
        "enjoy the apple life",
        "welcome to the walled garden",
        "it just works, mostly",
        "one ecosystem to hold them all",
    ],
};

static DESKTOP_THEME: OsTheme = OsTheme {
    name: "desktop",
    cue: CueSpec {
        base_freq: 110.0,
        beat_freq: 110.5,
        noise_level: 0.25,
    },
    marquee: &["the hard days are still ahead"],
};

static ANDROID_THEME: OsTheme = OsTheme {
    name: "android-phone",
    cue: CueSpec {
        base_freq: 523.25,
        beat_freq: 527.0,
        noise_level: 0.1,
    },
    marquee: &["the hard days are still ahead"],
};

/// Total mapping; every category has a theme.
pub fn theme_for(category: OsCategory) -> &'static OsTheme {
    match category {
        OsCategory::Ios | OsCategory::Ipados | OsCategory::Macos => &APPLE_THEME,
        OsCategory::Windows | OsCategory::Linux => &DESKTOP_THEME,
        OsCategory::Android => &ANDROID_THEME,
    }
}
