use anyhow::Context as _;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::cli::context::Context;
use crate::cli::utils::{output_success, write_bytes};
use crate::cli::OutputFormat;
use crate::models::ExportEntity;

pub async fn export(entity: ExportEntity, output: Option<PathBuf>, ctx: &Context) -> anyhow::Result<()> {
    let csv = ctx.app.transfer.export(entity).await?;
    write_bytes(output.as_deref(), &csv)?;

    if let Some(path) = output {
        output_success(
            &ctx.format,
            &format!("Exported {} to {}", entity, path.display()),
            Some(json!({ "path": path, "bytes": csv.len() })),
        )?;
    }
    Ok(())
}

pub async fn import(entity: ExportEntity, file: &Path, ctx: &Context) -> anyhow::Result<()> {
    let csv = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("import.csv");

    let result = ctx.app.transfer.import(entity, file_name, csv).await?;

    output_success(
        &ctx.format,
        &format!("Imported {} {} ({} skipped)", result.imported, entity, result.skipped),
        Some(json!({ "result": result })),
    )?;
    if matches!(ctx.format, OutputFormat::Text) {
        for error in &result.errors {
            eprintln!("  {}", error);
        }
    }
    Ok(())
}
