use std::fs;
use std::path::Path;

use auv3_resources::{prepare_ios_resources, BuildConfig, Error, ProjectLayout};
use plist::{Dictionary, Value};

const CONFIG_H: &str = r#"#pragma once

#define PLUG_NAME "Foo"
#define PLUG_MFR "Acme"
#define PLUG_VERSION_HEX 0x00010203
#define PLUG_VERSION_STR "1.2.3"
#define PLUG_UNIQUE_ID 'Foox'
#define PLUG_MFR_ID 'Acme'
#define PLUG_COPYRIGHT_STR "(c)2020"

#define BUNDLE_NAME "Foo"
#define BUNDLE_MFR "AcmeInc"
#define BUNDLE_DOMAIN "com"

#define PLUG_TYPE 0
#define PLUG_DOES_MIDI_IN 1
"#;

const AUV3_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleDevelopmentRegion</key>
    <string>en</string>
    <key>CFBundleIdentifier</key>
    <string>com.example.placeholder</string>
    <key>CFBundleVersion</key>
    <string>0.0.1</string>
    <key>NSExtension</key>
    <dict>
        <key>NSExtensionPointIdentifier</key>
        <string>com.apple.AudioUnit</string>
    </dict>
</dict>
</plist>
"#;

fn write_project(dir: &Path) {
    fs::write(dir.join("config.h"), CONFIG_H).unwrap();
    let resources = dir.join("resources");
    fs::create_dir_all(&resources).unwrap();
    fs::write(resources.join("Foo-iOS-AUv3-Info.plist"), AUV3_TEMPLATE).unwrap();

    // The app template is stored in binary form; output is always XML.
    let mut app = Dictionary::new();
    app.insert("UILaunchStoryboardName".into(), Value::String("Foo-iOS-LaunchScreen".into()));
    app.insert("UIFileSharingEnabled".into(), Value::Boolean(true));
    Value::Dictionary(app)
        .to_file_binary(resources.join("Foo-iOS-Info.plist"))
        .unwrap();
}

fn read(path: &Path) -> Dictionary {
    Value::from_file(path).unwrap().into_dictionary().unwrap()
}

fn string<'a>(dict: &'a Dictionary, key: &str) -> &'a str {
    dict.get(key).and_then(Value::as_string).unwrap()
}

#[test]
fn test_prepare_from_config_header() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let config = BuildConfig::load(dir.path()).unwrap();
    let layout = ProjectLayout::new(dir.path(), &config);
    let report = prepare_ios_resources(&layout, &config).unwrap();
    assert_eq!(report.written, vec![layout.extension_plist.clone(), layout.app_plist.clone()]);

    let auv3 = read(&layout.extension_plist);
    assert_eq!(string(&auv3, "CFBundleIdentifier"), "com.AcmeInc.app.Foo.AUv3");
    assert_eq!(string(&auv3, "CFBundleVersion"), "1.2.3");
    assert_eq!(string(&auv3, "CFBundleShortVersionString"), "1.2.3");
    assert_eq!(string(&auv3, "CFBundleGetInfoString"), "Foo v1.2.3 (c)2020");
    assert_eq!(string(&auv3, "CFBundleDevelopmentRegion"), "en");

    let component = auv3
        .get("NSExtension")
        .and_then(Value::as_dictionary)
        .and_then(|ext| ext.get("NSExtensionAttributes"))
        .and_then(Value::as_dictionary)
        .and_then(|attrs| attrs.get("AudioComponents"))
        .and_then(Value::as_array)
        .unwrap();
    assert_eq!(component.len(), 1);
    let component = component[0].as_dictionary().unwrap();
    assert_eq!(string(component, "type"), "aumf");
    assert_eq!(
        component.get("tags").and_then(Value::as_array).unwrap(),
        &vec![Value::String("Effects".into())]
    );

    let app = read(&layout.app_plist);
    assert_eq!(string(&app, "CFBundleIdentifier"), "com.AcmeInc.app.Foo");
    assert_eq!(string(&app, "CFBundleVersion"), "1.2.3");
    assert_eq!(string(&app, "CFBundleShortVersionString"), "1.2.3");
    assert_eq!(string(&app, "LSApplicationCategoryType"), "public.app-category.music");
    assert_eq!(string(&app, "UILaunchStoryboardName"), "Foo-iOS-LaunchScreen");
    assert_eq!(app.get("UIFileSharingEnabled").and_then(Value::as_boolean), Some(true));

    let written = fs::read_to_string(&layout.app_plist).unwrap();
    assert!(written.starts_with("<?xml"));
}

#[test]
fn test_prepare_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());

    let config = BuildConfig::load(dir.path()).unwrap();
    let layout = ProjectLayout::new(dir.path(), &config);
    prepare_ios_resources(&layout, &config).unwrap();
    let first = read(&layout.extension_plist);
    prepare_ios_resources(&layout, &config).unwrap();
    assert_eq!(read(&layout.extension_plist), first);
}

#[test]
fn test_config_toml_takes_precedence() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path());
    fs::write(
        dir.path().join("config.toml"),
        r#"
BUNDLE_NAME = "Foo"
BUNDLE_MFR = "AcmeInc"
BUNDLE_DOMAIN = "org"
FULL_VER_STR = "2.0.0"
PLUG_VER_INT = 131072
PLUG_COPYRIGHT = "(c)2021"
PLUG_NAME = "Foo"
PLUG_MFR = "Acme"
PLUG_MFR_UID = "Acme"
PLUG_UID = "Foox"
PLUG_IS_INSTRUMENT = true
PLUG_DOES_MIDI = true
"#,
    )
    .unwrap();

    let config = BuildConfig::load(dir.path()).unwrap();
    assert_eq!(config.bundle_domain, "org");

    let layout = ProjectLayout::new(dir.path(), &config);
    let report = prepare_ios_resources(&layout, &config).unwrap();
    assert_eq!(report.extension.component.component_type.fourcc(), "aumu");
    assert_eq!(report.extension.component.tags, ["Synth"]);
    assert_eq!(report.app.identifier, "org.AcmeInc.app.Foo");
}

#[test]
fn test_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        BuildConfig::load(dir.path()),
        Err(Error::MissingConfig { .. })
    ));
}

#[test]
fn test_missing_key_names_field() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.h"),
        CONFIG_H.replace("#define BUNDLE_MFR \"AcmeInc\"\n", ""),
    )
    .unwrap();

    let err = BuildConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains("BUNDLE_MFR"), "{err}");
}
