//=========================================================================
// Asset Library
//=========================================================================
//
// Named image loading with background workers.
//
// Architecture:
//   register(name, path) ──spawns──► loader thread (read + decode)
//                                          │
//   wait_all() ◄── crossbeam channel ──────┘
//        │
//        └─► HashMap<String, RgbaImage> ◄── get(name)
//
// Pattern: register everything up front, wait_all() once before the
// first frame, then get() is an infallible in-memory lookup. A failed
// load never resolves silently: wait_all() drains every outstanding
// worker and reports the first failure.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use image::RgbaImage;
use log::{debug, warn};

//=== AssetError ==========================================================

/// Asset loading failures.
///
/// Reported by [`AssetLibrary::wait_all`]; the bootstrap layer is the
/// one expected to surface these to the user.
#[derive(Debug)]
pub enum AssetError {
    /// The file could not be read.
    Io { name: String, source: std::io::Error },

    /// The bytes were read but could not be decoded as an image.
    Decode {
        name: String,
        source: image::ImageError,
    },

    /// A loader worker vanished without reporting a result.
    WorkerLost,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { name, source } => write!(f, "asset '{}' could not be read: {}", name, source),
            Self::Decode { name, source } => {
                write!(f, "asset '{}' could not be decoded: {}", name, source)
            }
            Self::WorkerLost => write!(f, "asset loader worker disappeared"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::WorkerLost => None,
        }
    }
}

//=== AssetLibrary ========================================================

type LoadResult = (String, Result<RgbaImage, AssetError>);

/// Name-keyed store of decoded images.
pub struct AssetLibrary {
    images: HashMap<String, RgbaImage>,
    results_tx: Sender<LoadResult>,
    results_rx: Receiver<LoadResult>,
    in_flight: usize,
}

impl AssetLibrary {
    pub fn new() -> Self {
        let (results_tx, results_rx) = unbounded();
        Self {
            images: HashMap::new(),
            results_tx,
            results_rx,
            in_flight: 0,
        }
    }

    //--- Loading ----------------------------------------------------------

    /// Begins loading `path` under `name` on a background worker.
    ///
    /// Returns immediately; the result lands on the next
    /// [`wait_all`](Self::wait_all).
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let name = name.into();
        let path = path.into();
        let tx = self.results_tx.clone();

        debug!(target: "assets", "loading '{}' from {:?}", name, path);
        self.in_flight += 1;

        thread::spawn(move || {
            let result = load_image(&name, &path);
            let _ = tx.send((name, result));
        });
    }

    /// Blocks until every registered load has completed.
    ///
    /// All outstanding workers are drained even when one fails, so the
    /// library is left in a consistent state; the first failure is then
    /// returned. Completed images are retrievable via
    /// [`get`](Self::get) regardless of other assets' failures.
    pub fn wait_all(&mut self) -> Result<(), AssetError> {
        let mut failure = None;

        while self.in_flight > 0 {
            match self.results_rx.recv() {
                Ok((name, Ok(image))) => {
                    debug!(target: "assets", "'{}' loaded ({}x{})", name, image.width(), image.height());
                    self.images.insert(name, image);
                }
                Ok((name, Err(error))) => {
                    warn!(target: "assets", "'{}' failed: {}", name, error);
                    if failure.is_none() {
                        failure = Some(error);
                    }
                }
                Err(_) => return Err(AssetError::WorkerLost),
            }
            self.in_flight -= 1;
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the decoded image registered under `name`, if loaded.
    pub fn get(&self, name: &str) -> Option<&RgbaImage> {
        self.images.get(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl Default for AssetLibrary {
    fn default() -> Self {
        Self::new()
    }
}

//--- Worker ---------------------------------------------------------------

fn load_image(name: &str, path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        name: name.to_string(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        name: name.to_string(),
        source,
    })?;
    Ok(decoded.to_rgba8())
}

//=========================================================================
// Unit Tests
//=========================================================================
