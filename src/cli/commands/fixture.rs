use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use serde_json::{json, Map, Value};

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;
use crate::fixtures::{self, FixtureOptions, DEFAULT_POSTS, DEFAULT_STUDENTS};

#[derive(Subcommand)]
pub enum FixtureCommands {
    #[command(about = "Generate a fresh document of synthetic data")]
    Generate {
        #[arg(long, help = "Output file (defaults to DB_PATH)")]
        output: Option<PathBuf>,
        #[arg(long, help = "Seed for reproducible output")]
        seed: Option<u64>,
        #[arg(long, help = "Number of posts", default_value_t = DEFAULT_POSTS)]
        posts: usize,
        #[arg(long, help = "Number of students", default_value_t = DEFAULT_STUDENTS)]
        students: usize,
    },
}

pub async fn handle(cmd: FixtureCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FixtureCommands::Generate { output, seed, posts, students } => {
            handle_generate(output, seed, posts, students, output_format).await
        }
    }
}

async fn handle_generate(
    output: Option<PathBuf>,
    seed: Option<u64>,
    posts: usize,
    students: usize,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let path = output.unwrap_or_else(|| config::config().storage.db_path.clone());

    let options = FixtureOptions { seed, posts, students, ..FixtureOptions::default() };
    let document = fixtures::generate(&options);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let bytes = serde_json::to_vec_pretty(&document)?;
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    let mut counts = Map::new();
    for (name, value) in &document {
        if let Value::Array(items) = value {
            counts.insert(name.clone(), json!(items.len()));
        }
    }

    let mut data = Map::new();
    data.insert("path".into(), json!(path.display().to_string()));
    data.insert("seed".into(), json!(seed));
    data.insert("collections".into(), Value::Object(counts));

    output_success(
        output_format,
        &format!("Generated {} posts and {} students in {}", posts, students, path.display()),
        Some(data),
    )
}
