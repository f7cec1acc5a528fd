//! Populates the Info.plist files of an iOS AUv3 plugin project.
//!
//! A plugin project carries two plist templates in `resources/`: one for the
//! AUv3 app extension and one for the standalone container app. This crate
//! reads the project's build configuration, derives bundle identifiers,
//! version strings and the `AudioComponents` entry from it, and writes both
//! templates back in place.
//!
//! ```ignore
//! use auv3_resources::{prepare_ios_resources, BuildConfig, ProjectLayout};
//!
//! let config = BuildConfig::load(project_dir)?;
//! let layout = ProjectLayout::new(project_dir, &config);
//! prepare_ios_resources(&layout, &config)?;
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod info_plist;
pub mod prepare;
pub mod xcconfig;

pub use component::ComponentType;
pub use config::BuildConfig;
pub use error::{Error, Result};
pub use info_plist::{AppInfo, AudioComponent, ExtensionInfo};
pub use prepare::{load_deployment_target, prepare_ios_resources, PrepareReport, ProjectLayout};
pub use xcconfig::XcConfig;
