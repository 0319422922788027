use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use url::Url;

use crate::config::FetchConfig;
use crate::data::error::ImportError;
use crate::data::loader;
use crate::data::model::Product;

// ---------------------------------------------------------------------------
// Import sources
// ---------------------------------------------------------------------------

/// Where a catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    /// A spreadsheet, CSV or JSON file picked by the user.
    File(PathBuf),
    /// A public shared-sheet link as pasted by the user.
    SharedSheet(String),
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportSource::File(path) => write!(f, "{}", path.display()),
            ImportSource::SharedSheet(link) => write!(f, "{link}"),
        }
    }
}

/// Turn a shared Google Sheets link into its CSV export URL.
///
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=<gid>` becomes
/// `https://docs.google.com/spreadsheets/d/<id>/export?format=csv&gid=<gid>`.
/// Published (`/d/e/...`) links and other http(s) URLs are returned as-is.
pub fn csv_export_url(input: &str) -> Result<Url, ImportError> {
    let trimmed = input.trim();
    let invalid = || ImportError::InvalidUrl(trimmed.to_string());

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if url.host_str() != Some("docs.google.com") {
        return Ok(url);
    }

    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
    let id = match segments.as_slice() {
        ["spreadsheets", "d", "e", ..] => None,
        ["spreadsheets", "d", id, ..] if !id.is_empty() => Some(id.to_string()),
        _ => return Err(invalid()),
    };
    let Some(id) = id else {
        return Ok(url);
    };

    let gid = url
        .query_pairs()
        .find(|(k, _)| *k == "gid")
        .map(|(_, v)| v.into_owned())
        .or_else(|| {
            url.fragment()
                .and_then(|frag| frag.split('&').find_map(|kv| kv.strip_prefix("gid=")))
                .map(str::to_string)
        })
        .filter(|g| !g.is_empty());

    let mut export = format!("https://docs.google.com/spreadsheets/d/{id}/export?format=csv");
    if let Some(gid) = gid {
        export.push_str("&gid=");
        export.push_str(&gid);
    }
    Url::parse(&export).map_err(|_| invalid())
}

// ---------------------------------------------------------------------------
// Running imports
// ---------------------------------------------------------------------------

/// Run one import to completion on the calling thread.
pub fn run_import(source: &ImportSource, config: &FetchConfig) -> Result<Vec<Product>, ImportError> {
    match source {
        ImportSource::File(path) => loader::load_file(path),
        ImportSource::SharedSheet(link) => {
            let url = csv_export_url(link)?;
            loader::fetch_csv(&url, config)
        }
    }
}

/// Handle to an import running on a worker thread.
pub struct PendingImport {
    source: ImportSource,
    rx: Receiver<Result<Vec<Product>, ImportError>>,
}

impl PendingImport {
    pub fn source(&self) -> &ImportSource {
        &self.source
    }

    /// Non-blocking poll. `None` while the worker is still busy.
    pub fn try_finish(&self) -> Option<Result<Vec<Product>, ImportError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ImportError::Aborted)),
        }
    }

    /// Block until the worker reports back.
    pub fn wait(self) -> Result<Vec<Product>, ImportError> {
        self.rx.recv().unwrap_or(Err(ImportError::Aborted))
    }
}

/// Start `source` on a background thread so the caller (the UI loop) can
/// keep rendering while bytes are read or fetched.
pub fn spawn_import(source: ImportSource, config: FetchConfig) -> PendingImport {
    let (tx, rx) = mpsc::channel();
    let job = source.clone();
    thread::spawn(move || {
        log::debug!("Import of {job} started");
        // The receiver may be gone if the app closed mid-import.
        let _ = tx.send(run_import(&job, &config));
    });
    PendingImport { source, rx }
}
