//! Plugin build configuration.
//!
//! The configuration is read from `config.toml` when the project has one,
//! otherwise from the `#define` lines of the plugin's `config.h`. Both paths
//! end up in the same serde-typed [`BuildConfig`], so a missing key is always
//! reported as `missing field` with the key name.
//!
//! # Example `config.toml`
//!
//! ```toml
//! BUNDLE_NAME = "IPlugEffect"
//! BUNDLE_MFR = "AcmeInc"
//! BUNDLE_DOMAIN = "com"
//! FULL_VER_STR = "1.0.0"
//! PLUG_VER_INT = 65536
//! PLUG_COPYRIGHT = "Copyright 2020 Acme Inc"
//! PLUG_NAME = "IPlugEffect"
//! PLUG_MFR = "AcmeInc"
//! PLUG_MFR_UID = "Acme"
//! PLUG_UID = "Ipef"
//! PLUG_IS_INSTRUMENT = false
//! PLUG_DOES_MIDI = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use toml::{Table, Value};

use crate::component::ComponentType;
use crate::error::{Error, Result};

/// File name of the TOML build configuration.
pub const CONFIG_TOML: &str = "config.toml";

/// File name of the C header build configuration.
pub const CONFIG_HEADER: &str = "config.h";

/// Build configuration shared by every plist the tool writes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildConfig {
    /// Bundle / product name.
    #[serde(rename = "BUNDLE_NAME")]
    pub bundle_name: String,
    /// Manufacturer component of the bundle identifier.
    #[serde(rename = "BUNDLE_MFR")]
    pub bundle_mfr: String,
    /// Reverse-domain prefix of the bundle identifier (e.g. "com").
    #[serde(rename = "BUNDLE_DOMAIN")]
    pub bundle_domain: String,
    /// Full version string, e.g. "1.0.0".
    #[serde(rename = "FULL_VER_STR")]
    pub full_version: String,
    /// Packed version: `(major << 16) | (minor << 8) | patch`.
    #[serde(rename = "PLUG_VER_INT")]
    pub version_int: u32,
    #[serde(rename = "PLUG_COPYRIGHT")]
    pub copyright: String,
    /// Plugin display name.
    #[serde(rename = "PLUG_NAME")]
    pub plug_name: String,
    /// Manufacturer display name.
    #[serde(rename = "PLUG_MFR")]
    pub plug_mfr: String,
    /// 4-character manufacturer code.
    #[serde(rename = "PLUG_MFR_UID")]
    pub manufacturer_code: String,
    /// 4-character subtype code.
    #[serde(rename = "PLUG_UID")]
    pub subtype_code: String,
    #[serde(rename = "PLUG_IS_INSTRUMENT", deserialize_with = "flag")]
    pub is_instrument: bool,
    #[serde(rename = "PLUG_DOES_MIDI", deserialize_with = "flag")]
    pub does_midi: bool,
}

/// Boolean keys may be written as `true`/`false` or as C-style `0`/`1`.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

impl BuildConfig {
    /// Load the configuration of the project rooted at `project_dir`.
    ///
    /// `config.toml` takes precedence over `config.h`.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let toml_path = project_dir.join(CONFIG_TOML);
        if toml_path.is_file() {
            log::debug!("Reading build configuration from {}", toml_path.display());
            let text = read_to_string(&toml_path)?;
            return Self::from_toml_str(&text).map_err(|source| Error::Config {
                path: toml_path,
                source,
            });
        }

        let header_path = project_dir.join(CONFIG_HEADER);
        if header_path.is_file() {
            log::debug!("Reading build configuration from {}", header_path.display());
            let text = read_to_string(&header_path)?;
            return Self::from_header_str(&text).map_err(|source| Error::Config {
                path: header_path,
                source,
            });
        }

        Err(Error::MissingConfig {
            project_dir: project_dir.to_path_buf(),
        })
    }

    /// Parse a TOML configuration with the canonical keys.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Parse a plugin `config.h`.
    pub fn from_header_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut table = parse_header_defines(text);
        translate_iplug_defines(&mut table);
        Value::Table(table).try_into()
    }

    pub fn component_type(&self) -> ComponentType {
        ComponentType::classify(self.is_instrument, self.does_midi)
    }

    /// `<domain>.<manufacturer>.app.<bundle-name>`
    pub fn app_bundle_id(&self) -> String {
        format!(
            "{}.{}.app.{}",
            self.bundle_domain, self.bundle_mfr, self.bundle_name
        )
    }

    /// `<domain>.<manufacturer>.app.<bundle-name>.AUv3`
    pub fn extension_bundle_id(&self) -> String {
        format!("{}.AUv3", self.app_bundle_id())
    }

    /// `<bundle-name> v<version> <copyright>`
    pub fn info_string(&self) -> String {
        format!(
            "{} v{} {}",
            self.bundle_name, self.full_version, self.copyright
        )
    }

    /// Non-fatal inconsistencies worth pointing out to the developer.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (key, code) in [
            ("PLUG_MFR_UID", &self.manufacturer_code),
            ("PLUG_UID", &self.subtype_code),
        ] {
            if code.len() != 4 || !code.is_ascii() {
                warnings.push(format!(
                    "{key} should be exactly 4 ASCII characters, got {code:?}"
                ));
            }
        }

        match pack_version(&self.full_version) {
            Ok(packed) if packed != self.version_int => warnings.push(format!(
                "PLUG_VER_INT {:#010x} does not match FULL_VER_STR {:?} ({:#010x})",
                self.version_int, self.full_version, packed
            )),
            Ok(_) => {}
            Err(e) => warnings.push(e.to_string()),
        }

        warnings
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert `major.minor.patch` to Apple's packed version integer.
pub fn pack_version(version: &str) -> Result<u32> {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 {
        return Err(Error::Version(format!(
            "expected major.minor.patch, got {version:?}"
        )));
    }

    let parse = |part: &str, max: u32| -> Result<u32> {
        part.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n <= max)
            .ok_or_else(|| {
                Error::Version(format!(
                    "component {part:?} of {version:?} out of range"
                ))
            })
    };

    let major = parse(parts[0], 0xffff)?;
    let minor = parse(parts[1], 0xff)?;
    let patch = parse(parts[2], 0xff)?;

    Ok((major << 16) | (minor << 8) | patch)
}

/// Inverse of [`pack_version`].
pub fn unpack_version(packed: u32) -> String {
    format!(
        "{}.{}.{}",
        packed >> 16,
        (packed >> 8) & 0xff,
        packed & 0xff
    )
}

/// Collect the object-like `#define`s of a C header into a TOML table.
///
/// String literals become strings, character literals become their
/// characters (`'Ipef'` -> `"Ipef"`), decimal and hex integers become
/// integers. Anything else is kept as the raw token text.
pub fn parse_header_defines(text: &str) -> Table {
    let mut table = Table::new();

    for line in text.lines() {
        let Some(rest) = line
            .trim_start()
            .strip_prefix('#')
            .and_then(|directive| directive.trim_start().strip_prefix("define"))
        else {
            continue;
        };
        if !rest.starts_with([' ', '\t']) {
            continue;
        }

        let rest = rest.trim_start();
        let name_end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let (name, value) = rest.split_at(name_end);

        // Function-like macro
        if name.is_empty() || value.starts_with('(') {
            continue;
        }

        if let Some(value) = parse_define_value(value.trim()) {
            table.insert(name.to_string(), value);
        }
    }

    table
}

fn parse_define_value(raw: &str) -> Option<Value> {
    if let Some(body) = raw.strip_prefix('"') {
        return Some(Value::String(unescape_c_string(body)));
    }

    if let Some(body) = raw.strip_prefix('\'') {
        let end = body.find('\'')?;
        return Some(Value::String(body[..end].to_string()));
    }

    let raw = strip_comment(raw).trim();
    if raw.is_empty() {
        return None;
    }

    let int = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => raw.parse::<i64>().ok(),
    };

    Some(match int {
        Some(n) => Value::Integer(n),
        None => Value::String(raw.to_string()),
    })
}

/// Read a C string literal body up to its closing quote.
fn unescape_c_string(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => break,
            },
            _ => out.push(c),
        }
    }
    out
}

fn strip_comment(raw: &str) -> &str {
    let end = [raw.find("//"), raw.find("/*")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(raw.len());
    &raw[..end]
}

/// Derive the canonical keys from IPlug's `config.h` define names.
///
/// A canonical key that is already defined is left alone.
fn translate_iplug_defines(table: &mut Table) {
    let aliases = [
        ("PLUG_COPYRIGHT_STR", "PLUG_COPYRIGHT"),
        ("PLUG_UNIQUE_ID", "PLUG_UID"),
        ("PLUG_MFR_ID", "PLUG_MFR_UID"),
        ("PLUG_VERSION_HEX", "PLUG_VER_INT"),
        ("PLUG_VERSION_STR", "FULL_VER_STR"),
    ];
    for (from, to) in aliases {
        if !table.contains_key(to) {
            if let Some(value) = table.get(from).cloned() {
                table.insert(to.to_string(), value);
            }
        }
    }

    if !table.contains_key("FULL_VER_STR") {
        if let Some(packed) = table
            .get("PLUG_VERSION_HEX")
            .and_then(Value::as_integer)
            .and_then(|packed| u32::try_from(packed).ok())
        {
            table.insert(
                "FULL_VER_STR".to_string(),
                Value::String(unpack_version(packed)),
            );
        }
    }

    if !table.contains_key("PLUG_IS_INSTRUMENT") {
        if let Some(plug_type) = table.get("PLUG_TYPE").and_then(Value::as_integer) {
            table.insert("PLUG_IS_INSTRUMENT".to_string(), Value::Boolean(plug_type == 1));
        }
    }

    if !table.contains_key("PLUG_DOES_MIDI") {
        if let Some(midi_in) = table.get("PLUG_DOES_MIDI_IN").and_then(Value::as_integer) {
            table.insert("PLUG_DOES_MIDI".to_string(), Value::Boolean(midi_in != 0));
        }
    }
}
