//! Audio component classification.

/// AU component type, as registered in the `AudioComponents` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// Instrument (`kAudioUnitType_MusicDevice`)
    MusicDevice,
    /// Effect that also takes MIDI input (`kAudioUnitType_MusicEffect`)
    MusicEffect,
    /// Plain audio effect (`kAudioUnitType_Effect`)
    Effect,
}

impl ComponentType {
    /// Classify a plugin. Instrument wins over MIDI input.
    pub const fn classify(is_instrument: bool, does_midi: bool) -> Self {
        if is_instrument {
            ComponentType::MusicDevice
        } else if does_midi {
            ComponentType::MusicEffect
        } else {
            ComponentType::Effect
        }
    }

    /// Four-character type code written to the plist.
    pub const fn fourcc(&self) -> &'static str {
        match self {
            ComponentType::MusicDevice => "aumu",
            ComponentType::MusicEffect => "aumf",
            ComponentType::Effect => "aufx",
        }
    }

    /// Host-facing category tag.
    ///
    /// Hosts use this to sort plugins into their browser folders.
    pub const fn tag(&self) -> &'static str {
        match self {
            ComponentType::MusicDevice => "Synth",
            ComponentType::MusicEffect | ComponentType::Effect => "Effects",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.fourcc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_is_music_device() {
        assert_eq!(ComponentType::classify(true, false), ComponentType::MusicDevice);
        // Instrument takes precedence over MIDI
        assert_eq!(ComponentType::classify(true, true), ComponentType::MusicDevice);
    }

    #[test]
    fn test_midi_effect_is_music_effect() {
        assert_eq!(ComponentType::classify(false, true), ComponentType::MusicEffect);
    }

    #[test]
    fn test_plain_effect() {
        assert_eq!(ComponentType::classify(false, false), ComponentType::Effect);
    }

    #[test]
    fn test_fourcc_codes() {
        assert_eq!(ComponentType::MusicDevice.fourcc(), "aumu");
        assert_eq!(ComponentType::MusicEffect.fourcc(), "aumf");
        assert_eq!(ComponentType::Effect.fourcc(), "aufx");
        assert_eq!(ComponentType::Effect.to_string(), "aufx");
    }

    #[test]
    fn test_tags() {
        assert_eq!(ComponentType::MusicDevice.tag(), "Synth");
        assert_eq!(ComponentType::MusicEffect.tag(), "Effects");
        assert_eq!(ComponentType::Effect.tag(), "Effects");
    }
}
