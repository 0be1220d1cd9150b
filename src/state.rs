use std::path::Path;

use anyhow::Context;

use corr_studio::analysis::insights::{summarize, Insights};
use corr_studio::analysis::CorrelationMethod;
use corr_studio::config::StudioConfig;
use corr_studio::data::classify::{coverage_report, ColumnCoverage};
use corr_studio::data::loader::read_csv_file;
use corr_studio::export::{self, ExportFormat};
use corr_studio::Session;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: StudioConfig,

    /// Current analysis revision (None until a file loads).
    pub session: Option<Session>,

    /// Method to apply to the next upload, and the one shown in the toggle.
    pub method: CorrelationMethod,

    /// Derived from `session`, rebuilt whenever it is replaced.
    pub insights: Option<Insights>,
    pub coverage: Vec<(String, ColumnCoverage)>,

    /// File name of the loaded data, for the status bar.
    pub source_name: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            method: config.default_method,
            config,
            session: None,
            insights: None,
            coverage: Vec::new(),
            source_name: None,
            status_message: None,
        }
    }

    /// Read and analyse a CSV file. A failure keeps the previous session.
    pub fn load_path(&mut self, path: &Path) {
        let result = read_csv_file(path).and_then(|text| {
            let next = match &self.session {
                Some(current) => current.with_upload(&text),
                None => Session::from_text(&text, self.method),
            };
            next.with_context(|| format!("analysing {}", path.display()))
        });

        match result {
            Ok(session) => {
                log::info!(
                    "Loaded {} rows with numeric columns {:?}",
                    session.dataset().len(),
                    session.numeric_columns()
                );
                self.source_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
                self.status_message = Some(format!(
                    "Found {} numeric columns with {} rows.",
                    session.numeric_columns().len(),
                    session.dataset().len()
                ));
                self.set_session(session);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Switch the correlation method, recomputing the matrix if data is loaded.
    pub fn set_method(&mut self, method: CorrelationMethod) {
        if method == self.method {
            return;
        }
        self.method = method;
        if let Some(current) = &self.session {
            log::debug!("recomputing matrix with {method}");
            let next = current.with_method(method);
            self.set_session(next);
        }
    }

    /// Write the current matrix to `path`.
    pub fn export(&mut self, path: &Path, format: ExportFormat) {
        let Some(session) = &self.session else {
            return;
        };
        match export::save(session.matrix(), path, format, &self.config.export) {
            Ok(()) => {
                log::info!("Exported {} to {}", format.extension(), path.display());
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn set_session(&mut self, session: Session) {
        self.insights = Some(summarize(session.matrix(), &self.config.insights));
        self.coverage = coverage_report(session.dataset());
        self.method = session.method();
        self.session = Some(session);
    }

    pub fn is_error(&self) -> bool {
        self.status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_then_switch_method() {
        let file = csv_file("x,y\n1,1\n2,8\n3,27\n4,64");
        let mut state = AppState::new(StudioConfig::default());
        state.load_path(file.path());

        let session = state.session.as_ref().unwrap();
        assert_eq!(session.method(), CorrelationMethod::Pearson);
        assert_eq!(state.coverage.len(), 2);
        assert!(!state.is_error());

        state.set_method(CorrelationMethod::Spearman);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.revision(), 1);
        assert_eq!(session.matrix().get(0, 1), 1.0);
        assert!(state.insights.as_ref().unwrap().strongest_positive.is_some());
    }

    #[test]
    fn test_failed_load_keeps_previous_session() {
        let good = csv_file("a,b\n1,2\n2,3");
        let bad = csv_file("a,b\n1,x\n2,y");
        let mut state = AppState::new(StudioConfig::default());
        state.load_path(good.path());
        state.load_path(bad.path());

        assert!(state.is_error());
        assert_eq!(state.session.as_ref().unwrap().revision(), 0);
        assert!(state
            .status_message
            .as_deref()
            .unwrap()
            .contains("at least 2 numeric columns"));
    }

    #[test]
    fn test_method_set_before_upload_is_used() {
        let file = csv_file("a,b\n1,2\n2,3\n3,1");
        let mut state = AppState::new(StudioConfig::default());
        state.set_method(CorrelationMethod::Spearman);
        state.load_path(file.path());
        assert_eq!(
            state.session.as_ref().unwrap().method(),
            CorrelationMethod::Spearman
        );
    }
}
