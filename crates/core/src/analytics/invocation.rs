//! Builds worker command lines from validated job requests.
//!
//! Workers are Python scripts launched through a configured interpreter.
//! Building an invocation is total: requests are pre-validated by the
//! HTTP layer, so every request maps to exactly one command line.

use std::path::{Path, PathBuf};

use super::request::{DataSource, GeneratePredictions, MarketBasketParams};

/// A fully assembled worker command: program plus ordered arguments.
///
/// Derived deterministically from a job request and never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Assembles [`WorkerInvocation`]s for both job kinds.
///
/// Holds the interpreter, the two worker script paths, and the upload
/// directory used to resolve dataset overrides. Constructed once from
/// configuration and shared by all requests.
#[derive(Debug, Clone)]
pub struct InvocationBuilder {
    python_bin: PathBuf,
    forecast_script: PathBuf,
    market_basket_script: PathBuf,
    upload_dir: PathBuf,
}

impl InvocationBuilder {
    pub fn new(
        python_bin: PathBuf,
        forecast_script: PathBuf,
        market_basket_script: PathBuf,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            python_bin,
            forecast_script,
            market_basket_script,
            upload_dir,
        }
    }

    /// Build the forecast worker command line.
    ///
    /// The scope flag is always emitted explicitly (`all` or a destination
    /// id). The `--csv_file` flag is appended only when the request names
    /// an uploaded dataset AND that file still exists on disk -- the upload
    /// may have been deleted between upload and use, in which case the
    /// worker falls back to the live database. The returned [`DataSource`]
    /// records which source the worker was actually pointed at.
    pub fn forecast(&self, req: &GeneratePredictions) -> (WorkerInvocation, DataSource) {
        let mut args = vec![
            self.forecast_script.to_string_lossy().into_owned(),
            "--model".to_string(),
            req.model_type.as_str().to_string(),
            "--destination".to_string(),
            req.destination_id.to_string(),
            "--days".to_string(),
            req.forecast_days.to_string(),
        ];

        let mut source = DataSource::Database;
        if req.use_uploaded_csv {
            if let Some(path) = self.resolve_dataset(req.csv_filename.as_deref()) {
                args.push("--csv_file".to_string());
                args.push(path.to_string_lossy().into_owned());
                source = DataSource::UploadedDataset;
            }
        }

        (
            WorkerInvocation {
                program: self.python_bin.clone(),
                args,
            },
            source,
        )
    }

    /// Build the market-basket worker command line.
    pub fn market_basket(&self, params: &MarketBasketParams) -> WorkerInvocation {
        WorkerInvocation {
            program: self.python_bin.clone(),
            args: vec![
                self.market_basket_script.to_string_lossy().into_owned(),
                "--min_support".to_string(),
                params.min_support.to_string(),
                "--min_confidence".to_string(),
                params.min_confidence.to_string(),
                "--min_lift".to_string(),
                params.min_lift.to_string(),
            ],
        }
    }

    /// Resolve an uploaded dataset filename to a path under the upload dir.
    ///
    /// Returns `None` when no filename was given, the name carries path
    /// components (a client must not be able to point the worker outside
    /// the upload directory), or the file no longer exists.
    fn resolve_dataset(&self, filename: Option<&str>) -> Option<PathBuf> {
        let filename = filename?;
        let is_bare_name =
            Path::new(filename).file_name() == Some(std::ffi::OsStr::new(filename));
        if filename.is_empty() || !is_bare_name {
            return None;
        }
        let path = self.upload_dir.join(filename);
        path.is_file().then_some(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
