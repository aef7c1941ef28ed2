//! Pipeline wiring: result table in, collection document out.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::info;

use verein_extract::{build_members, map_header, read_csv_table};
use verein_model::{DuplicatePolicy, Member, Originator};
use verein_sepa::{
    ContributionScheme, DocumentOptions, assemble_document, check_originator, group_members,
};

use crate::types::CollectionResult;

/// Everything one collection run needs, resolved from profile and flags.
#[derive(Debug)]
pub struct CollectRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub originator: Originator,
    pub scheme: ContributionScheme,
    pub duplicates: DuplicatePolicy,
    pub with_bom: bool,
    pub include_inactive: bool,
    pub include_contribution_free: bool,
    pub dry_run: bool,
}

/// Run the pipeline: read, map, build, filter, group, assemble, write.
pub fn run_collection(request: &CollectRequest) -> Result<CollectionResult> {
    let issues = check_originator(&request.originator);
    if !issues.is_empty() {
        let detail: Vec<String> = issues
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect();
        bail!("profile is not usable: {}", detail.join("; "));
    }

    let table = read_csv_table(&request.input)
        .with_context(|| format!("read member table: {}", request.input.display()))?;
    if table.headers.is_empty() {
        bail!("member table {} has no header row", request.input.display());
    }
    info!(
        rows = table.rows.len(),
        columns = table.headers.len(),
        "result table read"
    );

    let mapping = map_header(&table.headers)?;
    let report = build_members(&table, &mapping, request.duplicates)?;
    info!(
        members = report.members.len(),
        warnings = report.warnings.len(),
        skipped_rows = report.skipped_rows,
        "members built"
    );

    let mut filtered_inactive = 0usize;
    let mut filtered_contribution_free = 0usize;
    let mut considered: Vec<Member> = Vec::with_capacity(report.members.len());
    for member in &report.members {
        if !member.is_active && !request.include_inactive {
            filtered_inactive += 1;
            continue;
        }
        if member.is_contribution_free && !request.include_contribution_free {
            filtered_contribution_free += 1;
            continue;
        }
        considered.push(member.clone());
    }

    let grouping = group_members(&considered, &request.originator.pmt_inf_id, request.scheme)?;
    if grouping.groups.is_empty() {
        bail!(
            "no collectible members: {} considered, {} excluded for missing or invalid IBANs",
            considered.len(),
            grouping.skipped.len()
        );
    }
    info!(
        groups = grouping.groups.len(),
        transactions = grouping.transaction_count(),
        excluded = grouping.skipped.len(),
        "collection grouped"
    );

    let bytes = assemble_document(
        &request.originator,
        &grouping.groups,
        Local::now().naive_local(),
        &DocumentOptions {
            with_bom: request.with_bom,
        },
    )?;

    let output = if request.dry_run {
        None
    } else {
        let path = request
            .output
            .clone()
            .unwrap_or_else(|| request.input.with_extension("xml"));
        fs::write(&path, &bytes)
            .with_context(|| format!("write collection document: {}", path.display()))?;
        info!(path = %path.display(), bytes = bytes.len(), "document written");
        Some(path)
    };

    Ok(CollectionResult {
        members_built: report.members.len(),
        considered: considered.len(),
        filtered_inactive,
        filtered_contribution_free,
        skipped_rows: report.skipped_rows,
        warnings: report.warnings,
        control_sum: grouping.control_sum(),
        transactions: grouping.transaction_count(),
        grouping,
        output,
    })
}
