//! S3 object commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use skyvault_aws::AwsHelper;
use std::io::Write;
use std::path::PathBuf;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum S3Commands {
    /// Download an object
    Get(GetArgs),

    /// Upload a file as an object
    Put(PutArgs),

    /// Create a time-limited download link
    Presign(PresignArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Object key
    pub key: String,

    /// S3 bucket (defaults to S3_BUCKET_NAME)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Write to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub file: PathBuf,

    /// Object key
    pub key: String,

    /// S3 bucket (defaults to S3_BUCKET_NAME)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Content type (defaults to text/plain)
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct PresignArgs {
    /// Object key
    pub key: String,

    /// Link lifetime in minutes (at most 10080)
    #[arg(long, allow_negative_numbers = true)]
    pub expiry_mins: i64,

    /// S3 bucket (defaults to S3_BUCKET_NAME)
    #[arg(long)]
    pub bucket: Option<String>,
}

pub async fn run(cmd: S3Commands) -> Result<()> {
    let helper = AwsHelper::from_env();
    match cmd {
        S3Commands::Get(args) => get(&helper, args).await,
        S3Commands::Put(args) => put(&helper, args).await,
        S3Commands::Presign(args) => presign(&helper, args).await,
    }
}

async fn get(helper: &AwsHelper, args: GetArgs) -> Result<()> {
    let spinner = output::spinner("Downloading...");
    let result = helper.get_file_from_s3(&args.key, args.bucket.as_deref()).await;
    spinner.finish_and_clear();

    let body = result.with_context(|| format!("Failed to download {}", args.key))?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &body)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!(
                "Wrote {} bytes to {}",
                body.len(),
                path.display()
            ));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&body)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

async fn put(helper: &AwsHelper, args: PutArgs) -> Result<()> {
    let body = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let size = body.len();

    let spinner = output::spinner("Uploading...");
    let result = helper
        .put_file_to_s3(
            body,
            &args.key,
            args.content_type.as_deref(),
            args.bucket.as_deref(),
        )
        .await;
    spinner.finish_and_clear();

    result.with_context(|| format!("Failed to upload {}", args.file.display()))?;
    output::success(&format!("Uploaded {} ({} bytes)", args.key, size));
    Ok(())
}

async fn presign(helper: &AwsHelper, args: PresignArgs) -> Result<()> {
    let url = helper
        .generate_presigned_s3_url_download(&args.key, args.expiry_mins, args.bucket.as_deref())
        .await
        .with_context(|| format!("Failed to presign {}", args.key))?;

    println!("{}", url);
    Ok(())
}
