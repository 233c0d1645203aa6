//! Reloadable heightmap resource

use std::cell::{Ref, RefCell};
use std::path::{Path, PathBuf};

use lodge_core::{LodgeError, Result};

use crate::heightmap::Heightmap;
use crate::signal::ChangeSignal;

/// A heightmap image that can change after the builder is pointed at it.
///
/// Share it as `Rc<HeightmapSource>`; every [`replace`](Self::replace) or
/// [`reload`](Self::reload) fires [`changed`](Self::changed).
#[derive(Default)]
pub struct HeightmapSource {
    path: Option<PathBuf>,
    image: RefCell<Option<Heightmap>>,
    changed: ChangeSignal,
}

impl HeightmapSource {
    /// A source with no image. Regenerating from it yields a flat field.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_heightmap(heightmap: Heightmap) -> Self {
        Self {
            path: None,
            image: RefCell::new(Some(heightmap)),
            changed: ChangeSignal::new(),
        }
    }

    /// Load from an image file, remembering the path for [`reload`](Self::reload).
    pub fn open(path: &Path) -> Result<Self> {
        let heightmap = Heightmap::from_image(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            image: RefCell::new(Some(heightmap)),
            changed: ChangeSignal::new(),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn heightmap(&self) -> Ref<'_, Option<Heightmap>> {
        self.image.borrow()
    }

    pub fn changed(&self) -> &ChangeSignal {
        &self.changed
    }

    /// Swap in a new image (or none) and notify subscribers.
    pub fn replace(&self, heightmap: Option<Heightmap>) {
        *self.image.borrow_mut() = heightmap;
        self.changed.emit();
    }

    /// Re-read the image from disk and notify subscribers.
    ///
    /// On failure the current image is kept and nobody is notified.
    pub fn reload(&self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| LodgeError::ImageError("heightmap source has no file path".into()))?;
        let heightmap = Heightmap::from_image(path)?;
        self.replace(Some(heightmap));
        Ok(())
    }
}
