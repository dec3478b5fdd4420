use crate::image_classifier::interface::ImageFile;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const THUMBNAIL_MAX_SIDE: u32 = 256;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("{} is not an image file", .path.display())]
    NotAnImage { path: PathBuf },

    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, PartialEq)]
pub struct Thumbnail {
    pub width: usize,
    pub height: usize,
    pub rgba: Arc<[u8]>,
}

impl fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thumbnail({}x{})", self.width, self.height)
    }
}

/// A chosen file, loaded and ready to be shown and uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub path: PathBuf,
    pub file: ImageFile,
    pub dimensions: Option<(u32, u32)>,
    pub thumbnail: Option<Thumbnail>,
}

impl Preview {
    pub fn summary(&self) -> String {
        match self.dimensions {
            Some((width, height)) => format!(
                "{} ({}x{}, {} bytes)",
                self.file.name,
                width,
                height,
                self.file.bytes.len()
            ),
            None => format!("{} ({} bytes)", self.file.name, self.file.bytes.len()),
        }
    }
}

pub fn image_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

/// Formats the local decoder cannot handle still preview, just without pixels.
pub fn read_preview(path: &Path) -> Result<Preview, PreviewError> {
    let mime = image_mime(path).ok_or_else(|| PreviewError::NotAnImage {
        path: path.to_path_buf(),
    })?;

    let bytes = std::fs::read(path).map_err(|source| PreviewError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (dimensions, thumbnail) = match image::load_from_memory(&bytes) {
        Ok(decoded) => {
            let thumb = decoded
                .thumbnail(THUMBNAIL_MAX_SIDE, THUMBNAIL_MAX_SIDE)
                .to_rgba8();
            let thumbnail = Thumbnail {
                width: thumb.width() as usize,
                height: thumb.height() as usize,
                rgba: Arc::from(thumb.into_raw()),
            };
            (Some((decoded.width(), decoded.height())), Some(thumbnail))
        }
        Err(_) => (None, None),
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(Preview {
        path: path.to_path_buf(),
        file: ImageFile {
            name,
            mime: mime.to_string(),
            bytes: Arc::from(bytes),
        },
        dimensions,
        thumbnail,
    })
}
