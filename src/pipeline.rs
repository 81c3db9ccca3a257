// =============================================================================
// Analysis Pipeline — fetch → compute → report → render → package
// =============================================================================
//
// One run is sequential and independent of every other run. Any failure
// aborts the run and no output is produced; the caller shows the single
// user-facing message from `AnalysisError::user_message()` and nothing is
// retried.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::analysis::{render_report, Analysis, IndicatorEngine};
use crate::error::AnalysisError;
use crate::market_data::PriceSource;
use crate::render::{extension_for, ChartRenderer, DocumentArtifact, DocumentBuilder, ImageArtifact};

/// Everything a successful run produces.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub run_id: Uuid,
    pub analysis: Analysis,
    pub report: String,
    pub chart: Option<ImageArtifact>,
    pub document: Option<DocumentArtifact>,
}

pub struct Pipeline {
    source: Box<dyn PriceSource>,
    engine: IndicatorEngine,
    chart_renderer: Option<Box<dyn ChartRenderer>>,
    document_builder: Option<Box<dyn DocumentBuilder>>,
}

impl Pipeline {
    pub fn new(source: Box<dyn PriceSource>) -> Self {
        Self {
            source,
            engine: IndicatorEngine::new(),
            chart_renderer: None,
            document_builder: None,
        }
    }

    pub fn with_chart_renderer(mut self, renderer: Box<dyn ChartRenderer>) -> Self {
        self.chart_renderer = Some(renderer);
        self
    }

    /// The document embeds the chart, so it is only built when a chart
    /// renderer is configured too.
    pub fn with_document_builder(mut self, builder: Box<dyn DocumentBuilder>) -> Self {
        self.document_builder = Some(builder);
        self
    }

    /// Run one analysis for `ticker` using history from `start` onwards.
    pub fn run(&self, ticker: &str, start: NaiveDate) -> std::result::Result<AnalysisOutput, AnalysisError> {
        let run_id = Uuid::new_v4();
        let _span = info_span!("analysis", %run_id, ticker).entered();

        let result = self.run_stages(run_id, ticker, start);
        match &result {
            Ok(output) => info!(
                scenario = %output.analysis.scenario,
                chart = output.chart.is_some(),
                document = output.document.is_some(),
                "Analysis completed"
            ),
            Err(e) => warn!(kind = e.kind(), error = %e, "Analysis failed"),
        }
        result
    }

    fn run_stages(
        &self,
        run_id: Uuid,
        ticker: &str,
        start: NaiveDate,
    ) -> std::result::Result<AnalysisOutput, AnalysisError> {
        // ── 1. Fetch ─────────────────────────────────────────────────────────
        let prices = self
            .source
            .fetch(ticker, start)?
            .ok_or_else(|| AnalysisError::EmptyData {
                ticker: ticker.to_string(),
            })?;
        debug!(points = prices.len(), "Price series fetched");

        // ── 2. Compute ───────────────────────────────────────────────────────
        let analysis = self.engine.analyze(ticker, &prices)?;

        // ── 3. Report text ───────────────────────────────────────────────────
        let report = render_report(&analysis);

        // ── 4. Chart ─────────────────────────────────────────────────────────
        let chart = match &self.chart_renderer {
            Some(renderer) => Some(renderer.render(&analysis)?),
            None => None,
        };

        // ── 5. Document ──────────────────────────────────────────────────────
        let document = match (&self.document_builder, &chart) {
            (Some(builder), Some(image)) => Some(builder.build(&report, image)?),
            (Some(_), None) => {
                debug!("Document builder configured without a chart renderer, skipping");
                None
            }
            (None, _) => None,
        };

        Ok(AnalysisOutput {
            run_id,
            analysis,
            report,
            chart,
            document,
        })
    }
}

// =============================================================================
// Artifact output
// =============================================================================

/// Write every artifact of a successful run under `output_dir`:
///
/// - `reports/report_<TICKER>.txt` — the report text
/// - `reports/analysis_<TICKER>.json` — snapshot, scenario and all series
/// - `plots/chart_<TICKER>.<ext>` — when a chart was rendered
/// - `reports/report_<TICKER>.<ext>` — when a document was built
///
/// Files are first written to a staging directory named after the run id,
/// then moved into place. On failure nothing from this run is left behind.
/// Returns the written paths in the order above.
pub fn write_artifacts(output: &AnalysisOutput, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    let stem = file_stem(&output.analysis.ticker);

    let json = serde_json::to_string_pretty(&output.analysis)
        .context("failed to serialise analysis to JSON")?;

    let reports = Path::new("reports");
    let mut files: Vec<(PathBuf, &[u8])> = vec![
        (reports.join(format!("report_{stem}.txt")), output.report.as_bytes()),
        (reports.join(format!("analysis_{stem}.json")), json.as_bytes()),
    ];
    if let Some(chart) = &output.chart {
        let name = format!("chart_{stem}.{}", extension_for(&chart.media_type));
        files.push((Path::new("plots").join(name), chart.bytes.as_slice()));
    }
    if let Some(doc) = &output.document {
        let name = format!("report_{stem}.{}", extension_for(&doc.media_type));
        files.push((reports.join(name), doc.bytes.as_slice()));
    }

    let staging = output_dir.join(format!(".staging-{}", output.run_id));
    let result =
        stage_files(&staging, &files).and_then(|()| publish_files(&staging, output_dir, &files));

    match fs::remove_dir_all(&staging) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(dir = %staging.display(), error = %e, "Failed to remove staging directory"),
    }

    let written = result?;
    info!(run_id = %output.run_id, files = written.len(), dir = %output_dir.display(), "Artifacts written");
    Ok(written)
}

fn stage_files(staging: &Path, files: &[(PathBuf, &[u8])]) -> Result<()> {
    for (relative, bytes) in files {
        let path = staging.join(relative);
        create_parent(&path)?;
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Move staged files into `output_dir`. Files already moved are removed again
/// if a later move fails.
fn publish_files(
    staging: &Path,
    output_dir: &Path,
    files: &[(PathBuf, &[u8])],
) -> Result<Vec<PathBuf>> {
    let mut published: Vec<PathBuf> = Vec::with_capacity(files.len());

    for (relative, _) in files {
        let target = output_dir.join(relative);
        let moved = create_parent(&target).and_then(|()| {
            fs::rename(staging.join(relative), &target)
                .with_context(|| format!("failed to move {} into place", target.display()))
        });

        if let Err(e) = moved {
            for path in &published {
                if let Err(err) = fs::remove_file(path) {
                    warn!(path = %path.display(), error = %err, "Failed to remove partial artifact");
                }
            }
            return Err(e);
        }
        published.push(target);
    }

    Ok(published)
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))
        }
        None => Ok(()),
    }
}

/// Tickers like `ITX.MC` are kept as-is; path separators are replaced.
fn file_stem(ticker: &str) -> String {
    ticker
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}
