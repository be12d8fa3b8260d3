//! Best-effort discovery of game install directories in Steam libraries.
//!
//! Nothing here fails: unreadable files and missing folders are recorded as
//! [`Diagnostic`]s next to whatever candidates were found.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dir::user_home;
use crate::os::OS;

/// Source of candidate game install directories.
pub trait LocatorService {
    fn discover(&self) -> Discovery;

    /// Ordered candidates, possibly empty.
    fn list_candidate_install_directories(&self) -> Vec<PathBuf> {
        self.discover().candidates
    }
}

#[derive(Clone, Debug, Default)]
pub struct Discovery {
    pub candidates: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Something discovery skipped over, and why.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub message: String,
}

impl Discovery {
    fn note(&mut self, path: &Path, message: impl Into<String>) {
        let message = message.into();
        debug!(path = %path.display(), %message, "discovery");
        self.diagnostics.push(Diagnostic {
            path: path.to_path_buf(),
            message,
        });
    }
}

/// Looks for `<library>/common/<folder_name>` across Steam libraries.
#[derive(Clone, Debug)]
pub struct SteamLocator {
    steam_roots: Vec<PathBuf>,
    folder_name: String,
    extra_dirs: Vec<PathBuf>,
}

impl SteamLocator {
    /// Locator over the platform's usual Steam install locations.
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self::with_roots(default_steam_roots(OS::current(), user_home()), folder_name)
    }

    pub fn with_roots(steam_roots: Vec<PathBuf>, folder_name: impl Into<String>) -> Self {
        Self {
            steam_roots,
            folder_name: folder_name.into(),
            extra_dirs: Vec::new(),
        }
    }

    /// Directories appended to the candidates when they exist.
    pub fn extra_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.extra_dirs = dirs;
        self
    }

    /// `steamapps` directories of every library reachable from the roots,
    /// de-duplicated in discovery order.
    fn libraries(&self, discovery: &mut Discovery) -> Vec<PathBuf> {
        let mut found = Vec::new();

        for root in &self.steam_roots {
            let vdf = root.join("steamapps").join("libraryfolders.vdf");
            if vdf.is_file() {
                match fs::read(&vdf) {
                    Ok(bytes) => {
                        for library in parse_library_folders(&String::from_utf8_lossy(&bytes)) {
                            let steamapps = library.join("steamapps");
                            if steamapps.is_dir() {
                                found.push(steamapps);
                            } else {
                                discovery.note(&steamapps, "listed library has no steamapps directory");
                            }
                        }
                    }
                    Err(e) => discovery.note(&vdf, format!("unreadable: {e}")),
                }
            }

            let default = root.join("steamapps");
            if default.is_dir() {
                found.push(default);
            } else {
                discovery.note(root, "not a Steam root");
            }
        }

        dedup(found)
    }
}

impl LocatorService for SteamLocator {
    fn discover(&self) -> Discovery {
        let mut discovery = Discovery::default();

        let mut hits = Vec::new();
        for library in self.libraries(&mut discovery) {
            let game = library.join("common").join(&self.folder_name);
            if game.is_dir() {
                hits.push(game);
            }
        }

        for extra in &self.extra_dirs {
            if extra.is_dir() {
                hits.push(extra.clone());
            } else {
                discovery.note(extra, "configured directory does not exist");
            }
        }

        discovery.candidates = dedup(hits);
        discovery
    }
}

/// Library paths listed in a text `libraryfolders.vdf`.
pub fn parse_library_folders(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.to_ascii_lowercase().starts_with("\"path\""))
        .filter_map(|line| line.split('"').nth(3))
        .map(|path| PathBuf::from(path.replace("\\\\", "\\")))
        .collect()
}

/// Usual Steam install roots for `os`.
pub fn default_steam_roots(os: OS, home: Option<PathBuf>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    match os {
        OS::Windows => {
            if let Some(home) = &home {
                roots.push(home.join("AppData").join("Local").join("Steam"));
            }
            roots.push(PathBuf::from(r"C:\Program Files (x86)\Steam"));
            roots.push(PathBuf::from(r"C:\Program Files\Steam"));
        }
        OS::Macos => {
            if let Some(home) = &home {
                roots.push(home.join("Library").join("Application Support").join("Steam"));
            }
        }
        OS::Linux | OS::Unknown => {
            if let Some(home) = &home {
                roots.push(home.join(".local").join("share").join("Steam"));
                roots.push(home.join(".steam").join("steam"));
            }
        }
    }
    roots
}

/// Unity `StreamingAssets` directory of an install rooted at `root`.
///
/// `data_dir` is the player's data folder name on Windows and Linux
/// (`<exe stem>_Data`). macOS bundles use a fixed layout instead.
pub fn streaming_assets_dir(os: OS, root: &Path, data_dir: &str) -> PathBuf {
    match os {
        OS::Macos if root.extension().is_some_and(|ext| ext == "app") => root
            .join("Contents")
            .join("Resources")
            .join("Data")
            .join("StreamingAssets"),
        OS::Macos => root.join("Data").join("StreamingAssets"),
        _ => root.join(data_dir).join("StreamingAssets"),
    }
}

fn dedup(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        if !out.contains(&path) {
            out.push(path);
        }
    }
    out
}
