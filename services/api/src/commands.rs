use crate::infra::read_listing_state;
use clap::Args;
use estatehub::error::AppError;
use estatehub::failures::{ApiFailure, ErrorHandler, TracingNotifier};
use estatehub::listings::{
    FormDataPayload, FormValue, ListingSubmissionService, PreparedListing, SubmissionError,
    ValidationReport,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ListingInputArgs {
    /// JSON file holding the accumulated wizard state
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ListingPreviewArgs {
    #[command(flatten)]
    pub(crate) source: ListingInputArgs,
    /// Print the multipart field list instead of the JSON payload
    #[arg(long)]
    pub(crate) multipart: bool,
    /// Also write the encoded multipart body to this file
    #[arg(long, requires = "multipart")]
    pub(crate) body_out: Option<PathBuf>,
    /// Boundary used when encoding the multipart body
    #[arg(long, default_value = DEFAULT_BOUNDARY)]
    pub(crate) boundary: String,
}

const DEFAULT_BOUNDARY: &str = "estatehub-form-boundary";

#[derive(Args, Debug)]
pub(crate) struct ErrorClassifyArgs {
    /// HTTP status returned by the API, if any
    #[arg(long)]
    pub(crate) status: Option<u16>,
    /// Error message from the response body or transport
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Transport error code such as ERR_NETWORK or ECONNABORTED
    #[arg(long)]
    pub(crate) code: Option<String>,
}

pub(crate) fn run_listing_validate(args: ListingInputArgs) -> Result<(), AppError> {
    let state = read_listing_state(&args.input)?;
    let report = ListingSubmissionService::new().validate(&state);
    render_validation(&report);
    Ok(())
}

pub(crate) fn run_listing_preview(args: ListingPreviewArgs) -> Result<(), AppError> {
    let ListingPreviewArgs {
        source,
        multipart,
        body_out,
        boundary,
    } = args;
    let state = read_listing_state(&source.input)?;

    let prepared = match ListingSubmissionService::new().prepare(&state) {
        Ok(prepared) => prepared,
        Err(err) => {
            ErrorHandler::handle_validation_errors(err.errors(), &TracingNotifier);
            let SubmissionError::Invalid { report } = &err;
            render_validation(report);
            return Err(AppError::from(err));
        }
    };

    render_preview(&prepared, multipart)?;

    if let Some(path) = body_out {
        let body = prepared.form_data.encode(&boundary)?;
        std::fs::write(&path, &body)?;
        println!(
            "Wrote {} bytes to {} ({})",
            body.len(),
            path.display(),
            FormDataPayload::content_type(&boundary)
        );
    }
    Ok(())
}

pub(crate) fn run_error_classify(args: ErrorClassifyArgs) {
    let failure = ApiFailure {
        status: args.status,
        message: args.message,
        code: args.code,
    };
    let outcome = ErrorHandler::handle_api_error(&failure, &TracingNotifier);

    println!("Category: {:?}", outcome.category);
    println!("Message:  {}", outcome.message);
    match outcome.redirect {
        Some(path) => println!("Redirect: {path}"),
        None => println!("Redirect: none"),
    }
}

fn render_validation(report: &ValidationReport) {
    if report.is_valid {
        println!("Listing is ready to submit");
        return;
    }

    println!("Listing has {} problem(s):", report.errors.len());
    for error in &report.errors {
        println!("- {error}");
    }
}

fn render_preview(prepared: &PreparedListing, multipart: bool) -> Result<(), AppError> {
    if !multipart {
        println!("{}", serde_json::to_string_pretty(&prepared.payload)?);
        return Ok(());
    }

    println!("Multipart fields ({} parts)", prepared.form_data.len());
    for field in prepared.form_data.fields() {
        match &field.value {
            FormValue::Text { value } => {
                println!("- {} = {}", field.key, value)
            }
            FormValue::File {
                file_name,
                content_type,
                bytes,
            } => println!(
                "- {} <- {} ({}, {} bytes)",
                field.key,
                file_name,
                content_type,
                bytes.len()
            ),
        }
    }
    Ok(())
}
