//! One-time asset loading with per-layer degradation.
//!
//! A missing or undecodable asset only disables the draw step of the layer
//! that needs it; loading never fails as a whole.

use std::path::Path;

use image::RgbaImage;

use crate::error::{EngineError, EngineResult};
use crate::mesh::Mesh;

/// Assets consumed by the layers, each optional
#[derive(Debug, Clone, Default)]
pub struct SceneAssets {
    /// Source image for the flag point cloud
    pub flag: Option<RgbaImage>,

    /// Mesh whose faces carry the goggle stars
    pub goggles: Option<Mesh>,
}

impl SceneAssets {
    pub fn new(flag: Option<RgbaImage>, goggles: Option<Mesh>) -> Self {
        Self { flag, goggles }
    }

    /// Load whichever paths are given; failures are logged and leave `None`
    pub fn load(flag_path: Option<&Path>, goggles_path: Option<&Path>) -> Self {
        let flag = flag_path.and_then(|path| match load_image(path) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("flag layer disabled: {}", e);
                None
            }
        });

        let goggles = goggles_path.and_then(|path| match Mesh::load_obj(path) {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                log::warn!("goggles layer disabled: {}", e);
                None
            }
        });

        Self { flag, goggles }
    }
}

/// Decode any format the `image` crate supports into RGBA8
pub fn load_image(path: &Path) -> EngineResult<RgbaImage> {
    let image = image::open(path)
        .map_err(|e| EngineError::asset(format!("{}: {}", path.display(), e)))?
        .to_rgba8();
    log::info!(
        "image: {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}
