use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use uuid::Uuid;

use super::Dataset;
use crate::clusterer::{Cluster, ClusterRun, StdbscanParams, Thresholds};

pub const REPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub manifest: ReportManifest,
    pub params: StdbscanParams,
    pub thresholds: Thresholds,
    pub stats: ReportStats,
    pub clusters: Vec<Cluster>,
    pub assignments: Vec<AssignmentEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportManifest {
    pub version: String,
    pub generator: String,
    pub run_id: Uuid,
    pub created_at: String,
    /// SHA-256 of the raw input document, hex encoded
    pub input_sha256: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportStats {
    pub records: usize,
    /// Reported cluster count (at least 1)
    pub clusters: usize,
    pub discovered_clusters: usize,
    pub noise: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentEntry {
    pub index: usize,
    pub id: String,
    pub cluster: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl RunReport {
    /// Assemble a report for one finished run
    pub fn new(dataset: &Dataset, params: &StdbscanParams, run: &ClusterRun) -> Self {
        let model = &run.model;
        let ids = dataset.records.ids();

        let assignments = model
            .labeled_records(params.remove_unlabeled)
            .into_iter()
            .map(|(index, cluster)| AssignmentEntry {
                index,
                id: ids[index].clone(),
                cluster,
                label: run.labels.as_ref().map(|labels| labels[index].clone()),
            })
            .collect();

        Self {
            manifest: ReportManifest {
                version: REPORT_VERSION.to_string(),
                generator: format!("stdbscan v{}", env!("CARGO_PKG_VERSION")),
                run_id: Uuid::new_v4(),
                created_at: Utc::now().to_rfc3339(),
                input_sha256: dataset.input_sha256.clone(),
            },
            params: params.clone(),
            thresholds: run.thresholds,
            stats: ReportStats {
                records: model.len(),
                clusters: model.num_clusters(),
                discovered_clusters: model.discovered_clusters(),
                noise: model.noise().len(),
            },
            clusters: model.clusters(),
            assignments,
        }
    }
}

/// Write a report as pretty JSON to `output`, or stdout when `None`
pub fn write_report(report: &RunReport, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

    match output {
        Some(path) => {
            eprintln!("[report] Writing report to: {}", path.display());
            let mut file = File::create(path)
                .context(format!("Failed to create report file: {}", path.display()))?;
            file.write_all(json.as_bytes())
                .context("Failed to write report")?;
            file.write_all(b"\n")?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
