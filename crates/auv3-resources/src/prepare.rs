//! iOS resource preparation.
//!
//! Rewrites the two Info.plist templates that live in a plugin project's
//! `resources/` directory:
//!
//! ```text
//! MyPlugin/
//! ├── config.h                        # or config.toml
//! └── resources/
//!     ├── MyPlugin-iOS-AUv3-Info.plist   # app extension (NSExtension + AudioComponents)
//!     └── MyPlugin-iOS-Info.plist        # standalone container app
//! ```

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::Result;
use crate::info_plist::{read_plist_dictionary, write_plist_dictionary, AppInfo, ExtensionInfo};
use crate::xcconfig::XcConfig;

/// Resources directory name, relative to the project root.
pub const RESOURCES_DIR: &str = "resources";

/// Location of the shared iOS xcconfig, relative to the project root.
pub const COMMON_IOS_XCCONFIG: &str = "../../common-ios.xcconfig";

/// Paths of the files a run touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub project_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub extension_plist: PathBuf,
    pub app_plist: PathBuf,
}

impl ProjectLayout {
    pub fn new(project_dir: &Path, config: &BuildConfig) -> Self {
        let resources_dir = project_dir.join(RESOURCES_DIR);
        Self {
            project_dir: project_dir.to_path_buf(),
            extension_plist: resources_dir
                .join(format!("{}-iOS-AUv3-Info.plist", config.bundle_name)),
            app_plist: resources_dir.join(format!("{}-iOS-Info.plist", config.bundle_name)),
            resources_dir,
        }
    }

    /// Default location of the shared iOS xcconfig for this project.
    pub fn common_xcconfig(&self) -> PathBuf {
        self.project_dir.join(COMMON_IOS_XCCONFIG)
    }
}

/// What a run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareReport {
    pub extension: ExtensionInfo,
    pub app: AppInfo,
    pub written: Vec<PathBuf>,
}

/// Overwrite the owned fields of both plists in place.
///
/// The extension plist is written before the app plist is read, so a failure
/// on the second file leaves the first one already updated.
pub fn prepare_ios_resources(
    layout: &ProjectLayout,
    config: &BuildConfig,
) -> Result<PrepareReport> {
    let extension = ExtensionInfo::from_config(config);
    let mut dict = read_plist_dictionary(&layout.extension_plist)?;
    extension.apply(&mut dict);
    write_plist_dictionary(&layout.extension_plist, dict)?;
    log::debug!(
        "Wrote {} ({} {})",
        layout.extension_plist.display(),
        extension.identifier,
        extension.component.component_type
    );

    let app = AppInfo::from_config(config);
    let mut dict = read_plist_dictionary(&layout.app_plist)?;
    app.apply(&mut dict);
    write_plist_dictionary(&layout.app_plist, dict)?;
    log::debug!("Wrote {} ({})", layout.app_plist.display(), app.identifier);

    Ok(PrepareReport {
        extension,
        app,
        written: vec![layout.extension_plist.clone(), layout.app_plist.clone()],
    })
}

/// Read the deployment target from the xcconfig at `path`.
///
/// The value is informational only; it is not written into either plist.
pub fn load_deployment_target(path: &Path) -> Result<Option<String>> {
    let xcconfig = XcConfig::load(path)?;
    let target = xcconfig.deployment_target().map(str::to_string);
    log::debug!("Deployment target from {}: {:?}", path.display(), target);
    Ok(target)
}
