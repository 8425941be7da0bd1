//! Appraisal review CLI
//!
//! Runs field extraction and the cross-document review workflows from
//! the command line. Subcommands that talk to the model require
//! `GEMINI_API_KEY` in the environment; `sections` works offline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use appraisal_core::{fields_for, DocumentExtractor, Section};
use appraisal_extract::{ExtractorConfig, HtmlFieldReader, LlmExtractor};
use appraisal_review::workflows::{comparison_query, contextual_query};
use appraisal_review::{
    audit_revision, compare_field_maps, d1004_review, escalation_review, report, report_profile,
    revision_gap_check, validate,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(
    name = "appraisal",
    about = "Review appraisal reports against their paired documents",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Machine-readable JSON
    Json,
    /// Reviewer-facing markdown
    Markdown,
}

#[derive(Subcommand)]
enum Command {
    /// Extract one catalog section from a document
    Extract {
        /// Path to the report PDF
        #[arg(short, long)]
        pdf: PathBuf,

        /// Section key, e.g. "subject" or "sales_grid"
        #[arg(short, long)]
        section: String,

        /// Replace the catalog-built instruction with a custom one
        #[arg(long)]
        instruction: Option<String>,
    },

    /// Audit a revised report against the old version it replaces
    Audit {
        /// The revised report PDF
        #[arg(long)]
        revised: PathBuf,

        /// The old report PDF
        #[arg(long)]
        old: PathBuf,

        /// Order form HTML for three-way cross-checks
        #[arg(long)]
        order_form: Option<PathBuf>,

        /// Engagement letter PDF for the fee check
        #[arg(long)]
        engagement_letter: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Review a 1004D form against the original report
    #[command(name = "review-1004d")]
    Review1004d {
        /// The original appraisal report PDF
        #[arg(long)]
        original: PathBuf,

        /// The 1004D form PDF
        #[arg(long)]
        form: PathBuf,

        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Check whether a resubmission addresses the order's rejection reason
    RevisionCheck {
        /// The resubmitted report PDF
        #[arg(long)]
        revised: PathBuf,

        /// Order form HTML carrying the rejection reason
        #[arg(long)]
        order_form: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Run the escalation checklist for a delivered report
    Escalation {
        /// The delivered report PDF
        #[arg(long)]
        report: PathBuf,

        /// Order form HTML
        #[arg(long)]
        order_form: PathBuf,

        /// Purchase contract PDF
        #[arg(long)]
        purchase_contract: Option<PathBuf>,

        /// Engagement letter PDF
        #[arg(long)]
        engagement_letter: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Compare an order form against the report's intake profile
    CompareOrder {
        /// The report PDF
        #[arg(long)]
        report: PathBuf,

        /// Order form HTML
        #[arg(long)]
        order_form: PathBuf,

        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Ask a free-text question across one or more documents
    Analyze {
        /// The question to answer
        #[arg(short, long)]
        query: String,

        /// Documents to analyze; for revised-vs-old questions pass the
        /// revised report first
        #[arg(required = true)]
        documents: Vec<PathBuf>,

        /// JSON file of pre-extracted data to cross-reference
        #[arg(long)]
        context: Option<PathBuf>,
    },

    /// List the extraction catalog
    Sections {
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "appraisal_extract=info"
                        .parse()
                        .expect("directive is compile-time constant"),
                )
                .add_directive(
                    "appraisal_review=info"
                        .parse()
                        .expect("directive is compile-time constant"),
                ),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Extract {
            pdf,
            section,
            instruction,
        } => extract(&pdf, &section, instruction.as_deref()).await,
        Command::Audit {
            revised,
            old,
            order_form,
            engagement_letter,
            format,
        } => {
            audit(
                &revised,
                &old,
                order_form.as_deref(),
                engagement_letter.as_deref(),
                format,
            )
            .await
        }
        Command::Review1004d {
            original,
            form,
            format,
        } => review_1004d(&original, &form, format).await,
        Command::RevisionCheck {
            revised,
            order_form,
            format,
        } => revision_check(&revised, order_form.as_deref(), format).await,
        Command::Escalation {
            report,
            order_form,
            purchase_contract,
            engagement_letter,
            format,
        } => {
            escalation(
                &report,
                &order_form,
                purchase_contract.as_deref(),
                engagement_letter.as_deref(),
                format,
            )
            .await
        }
        Command::CompareOrder {
            report,
            order_form,
            format,
        } => compare_order(&report, &order_form, format).await,
        Command::Analyze {
            query,
            documents,
            context,
        } => analyze(&query, &documents, context.as_deref()).await,
        Command::Sections { format } => sections(format),
    }
}

fn extractor() -> Result<LlmExtractor> {
    LlmExtractor::new(ExtractorConfig::from_env())
        .context("failed to initialize the extraction client")
}

/// JSON mode keeps stdout machine-readable even on failure.
fn fail(format: OutputFormat, err: anyhow::Error) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", json!({ "error": err.to_string() }));
    }
    Err(err)
}

fn emit<T: serde::Serialize>(
    format: OutputFormat,
    outcome: &T,
    markdown: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Markdown => print!("{}", markdown()),
    }
    Ok(())
}

async fn extract(pdf: &Path, section: &str, instruction: Option<&str>) -> Result<()> {
    let section: Section = section.parse()?;
    let extractor = extractor()?;
    let documents = [pdf.to_path_buf()];
    let fields = extractor.extract(&documents, section, instruction).await?;

    let mut payload = json!({ "fields": fields });
    if section == Section::SaleHistory {
        payload["checks"] = serde_json::to_value(validate::sale_history_checks(&fields))?;
    }
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn audit(
    revised: &Path,
    old: &Path,
    order_form: Option<&Path>,
    engagement_letter: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let extractor = extractor()?;
    let order = order_form.map(|path| HtmlFieldReader::new().read_path(path));
    let outcome =
        match audit_revision(&extractor, revised, old, order.as_ref(), engagement_letter).await {
            Ok(outcome) => outcome,
            Err(err) => return fail(format, err.into()),
        };
    emit(format, &outcome, || report::audit_report(&outcome))
}

async fn review_1004d(original: &Path, form: &Path, format: OutputFormat) -> Result<()> {
    let extractor = extractor()?;
    let outcome = match d1004_review(&extractor, original, form).await {
        Ok(outcome) => outcome,
        Err(err) => return fail(format, err.into()),
    };
    emit(format, &outcome, || report::d1004_report(&outcome))
}

async fn revision_check(
    revised: &Path,
    order_form: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let extractor = extractor()?;
    let html = match order_form {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read order form {}", path.display()))?,
        ),
        None => None,
    };
    let outcome = match revision_gap_check(&extractor, revised, html.as_deref()).await {
        Ok(outcome) => outcome,
        Err(err) => return fail(format, err.into()),
    };
    emit(format, &outcome, || report::revision_report(&outcome))
}

async fn escalation(
    report_path: &Path,
    order_form: &Path,
    purchase_contract: Option<&Path>,
    engagement_letter: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let extractor = extractor()?;
    let order = HtmlFieldReader::new().read_path(order_form);
    let outcome = match escalation_review(
        &extractor,
        report_path,
        &order,
        purchase_contract,
        engagement_letter,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(err) => return fail(format, err.into()),
    };
    emit(format, &outcome, || report::escalation_report(&outcome))
}

async fn compare_order(report_path: &Path, order_form: &Path, format: OutputFormat) -> Result<()> {
    let extractor = extractor()?;
    let order = HtmlFieldReader::new().read_path(order_form);
    let profile = match report_profile(&extractor, report_path).await {
        Ok(profile) => profile,
        Err(err) => return fail(format, err.into()),
    };
    let rows = compare_field_maps(&order, &profile, "Order Form", "Appraisal Report");
    emit(format, &rows, || {
        report::comparison_report(&rows, "Order Form", "Appraisal Report")
    })
}

async fn analyze(query: &str, documents: &[PathBuf], context: Option<&Path>) -> Result<()> {
    let extractor = extractor()?;
    let instruction = match context {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read context file {}", path.display()))?;
            let value: Value = serde_json::from_str(&raw)
                .with_context(|| format!("context file {} is not valid JSON", path.display()))?;
            contextual_query(query, &value)
        }
        None if documents.len() >= 2 => comparison_query(query),
        None => query.to_string(),
    };
    let fields = extractor
        .extract(documents, Section::CustomAnalysis, Some(&instruction))
        .await?;
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

fn sections(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let sections: Vec<Value> = Section::ALL
                .iter()
                .map(|section| {
                    json!({
                        "key": section.key(),
                        "title": section.title(),
                        "fields": fields_for(*section).len(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "sections": sections }))?
            );
        }
        OutputFormat::Markdown => {
            println!("| Section | Title | Fields |");
            println!("|---------|-------|--------|");
            for section in Section::ALL {
                println!(
                    "| {} | {} | {} |",
                    section.key(),
                    section.title(),
                    fields_for(section).len()
                );
            }
        }
    }
    Ok(())
}
