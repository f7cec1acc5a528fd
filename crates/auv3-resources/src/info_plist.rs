//! Typed views of the two Info.plist files.
//!
//! The records here hold exactly the keys this tool owns. [`ExtensionInfo::apply`]
//! and [`AppInfo::apply`] merge them into the generic dictionary read from the
//! template, so keys that a developer added by hand are kept.

use std::path::Path;

use plist::{Dictionary, Value};

use crate::component::ComponentType;
use crate::config::BuildConfig;
use crate::error::{Error, Result};

/// Extension point for AUv3 plugins that ship their own view controller.
pub const EXTENSION_POINT_IDENTIFIER: &str = "com.apple.AudioUnit-UI";

/// App Store category of the standalone app.
pub const APP_CATEGORY_MUSIC: &str = "public.app-category.music";

/// Package type of an app extension bundle.
pub const EXTENSION_PACKAGE_TYPE: &str = "XPC!";

/// Package type of an application bundle.
pub const APP_PACKAGE_TYPE: &str = "APPL";

/// One entry of `NSExtensionAttributes.AudioComponents`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioComponent {
    pub description: String,
    /// 4-character manufacturer code.
    pub manufacturer: String,
    /// Objective-C factory function the host calls to instantiate the unit.
    pub factory_function: String,
    /// "Manufacturer: Plugin", as shown in host menus.
    pub name: String,
    /// 4-character subtype code.
    pub subtype: String,
    pub component_type: ComponentType,
    pub version: u32,
    pub sandbox_safe: bool,
    pub tags: Vec<String>,
}

impl AudioComponent {
    pub fn from_config(config: &BuildConfig) -> Self {
        let component_type = config.component_type();
        Self {
            description: config.plug_name.clone(),
            manufacturer: config.manufacturer_code.clone(),
            factory_function: format!("{}ViewController", config.bundle_name),
            name: format!("{}: {}", config.plug_mfr, config.plug_name),
            subtype: config.subtype_code.clone(),
            component_type,
            version: config.version_int,
            sandbox_safe: true,
            tags: vec![component_type.tag().to_string()],
        }
    }

    fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("description".into(), Value::String(self.description.clone()));
        dict.insert("manufacturer".into(), Value::String(self.manufacturer.clone()));
        dict.insert(
            "factoryFunction".into(),
            Value::String(self.factory_function.clone()),
        );
        dict.insert("name".into(), Value::String(self.name.clone()));
        dict.insert("subtype".into(), Value::String(self.subtype.clone()));
        dict.insert(
            "type".into(),
            Value::String(self.component_type.fourcc().to_string()),
        );
        dict.insert(
            "version".into(),
            Value::Integer(u64::from(self.version).into()),
        );
        dict.insert("sandboxSafe".into(), Value::Boolean(self.sandbox_safe));
        dict.insert(
            "tags".into(),
            Value::Array(self.tags.iter().cloned().map(Value::String).collect()),
        );
        dict
    }
}

/// Keys owned in `<BUNDLE_NAME>-iOS-AUv3-Info.plist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub executable: String,
    pub identifier: String,
    pub name: String,
    pub display_name: String,
    pub version: String,
    pub short_version: String,
    pub get_info_string: String,
    pub package_type: &'static str,
    pub main_storyboard: String,
    pub component: AudioComponent,
}

impl ExtensionInfo {
    pub fn from_config(config: &BuildConfig) -> Self {
        let executable = format!("{}AppExtension", config.bundle_name);
        Self {
            identifier: config.extension_bundle_id(),
            name: executable.clone(),
            display_name: executable.clone(),
            executable,
            version: config.full_version.clone(),
            short_version: config.full_version.clone(),
            get_info_string: config.info_string(),
            package_type: EXTENSION_PACKAGE_TYPE,
            main_storyboard: format!("{}-iOS-MainInterface", config.bundle_name),
            component: AudioComponent::from_config(config),
        }
    }

    /// Overwrite the owned keys of `dict`. `NSExtension` is replaced as a whole.
    pub fn apply(&self, dict: &mut Dictionary) {
        dict.insert("CFBundleExecutable".into(), Value::String(self.executable.clone()));
        dict.insert("CFBundleIdentifier".into(), Value::String(self.identifier.clone()));
        dict.insert("CFBundleName".into(), Value::String(self.name.clone()));
        dict.insert(
            "CFBundleDisplayName".into(),
            Value::String(self.display_name.clone()),
        );
        dict.insert("CFBundleVersion".into(), Value::String(self.version.clone()));
        dict.insert(
            "CFBundleShortVersionString".into(),
            Value::String(self.short_version.clone()),
        );
        dict.insert(
            "CFBundleGetInfoString".into(),
            Value::String(self.get_info_string.clone()),
        );
        dict.insert(
            "CFBundlePackageType".into(),
            Value::String(self.package_type.to_string()),
        );
        dict.insert("NSExtension".into(), Value::Dictionary(self.ns_extension()));
    }

    fn ns_extension(&self) -> Dictionary {
        let mut attributes = Dictionary::new();
        attributes.insert(
            "AudioComponents".into(),
            Value::Array(vec![Value::Dictionary(self.component.to_dictionary())]),
        );

        let mut extension = Dictionary::new();
        extension.insert("NSExtensionAttributes".into(), Value::Dictionary(attributes));
        extension.insert(
            "NSExtensionMainStoryboard".into(),
            Value::String(self.main_storyboard.clone()),
        );
        extension.insert(
            "NSExtensionPointIdentifier".into(),
            Value::String(EXTENSION_POINT_IDENTIFIER.to_string()),
        );
        extension
    }
}

/// Keys owned in `<BUNDLE_NAME>-iOS-Info.plist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub executable: String,
    pub identifier: String,
    pub name: String,
    pub version: String,
    pub short_version: String,
    pub package_type: &'static str,
    pub category: &'static str,
}

impl AppInfo {
    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            executable: config.bundle_name.clone(),
            identifier: config.app_bundle_id(),
            name: config.bundle_name.clone(),
            version: config.full_version.clone(),
            short_version: config.full_version.clone(),
            package_type: APP_PACKAGE_TYPE,
            category: APP_CATEGORY_MUSIC,
        }
    }

    pub fn apply(&self, dict: &mut Dictionary) {
        dict.insert("CFBundleExecutable".into(), Value::String(self.executable.clone()));
        dict.insert("CFBundleIdentifier".into(), Value::String(self.identifier.clone()));
        dict.insert("CFBundleName".into(), Value::String(self.name.clone()));
        dict.insert("CFBundleVersion".into(), Value::String(self.version.clone()));
        dict.insert(
            "CFBundleShortVersionString".into(),
            Value::String(self.short_version.clone()),
        );
        dict.insert(
            "CFBundlePackageType".into(),
            Value::String(self.package_type.to_string()),
        );
        dict.insert(
            "LSApplicationCategoryType".into(),
            Value::String(self.category.to_string()),
        );
    }
}

/// Read a plist (XML or binary) whose root is a dictionary.
pub fn read_plist_dictionary(path: &Path) -> Result<Dictionary> {
    let value = Value::from_file(path).map_err(|source| Error::Plist {
        path: path.to_path_buf(),
        source,
    })?;
    value.into_dictionary().ok_or_else(|| Error::NotADictionary {
        path: path.to_path_buf(),
    })
}

/// Write `dict` to `path` as an XML plist, replacing the file.
pub fn write_plist_dictionary(path: &Path, dict: Dictionary) -> Result<()> {
    Value::Dictionary(dict)
        .to_file_xml(path)
        .map_err(|source| Error::Plist {
            path: path.to_path_buf(),
            source,
        })
}
