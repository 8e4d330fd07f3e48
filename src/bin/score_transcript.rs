//! Score a transcript from a file (or `-` for stdin) and print a summary plus a per-criterion table.
//!
//! Usage: score-transcript <path|-> [duration_sec] [--json]

use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Context};
use rubric_scorer::{engine_from_env, ScoreResult};

const DEFAULT_DURATION_SEC: f64 = 52.0;

struct Args {
    path: String,
    duration_sec: f64,
    json: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut json = false;
    for a in std::env::args().skip(1) {
        match a.as_str() {
            "--json" => json = true,
            "-h" | "--help" => bail!("usage: score-transcript <path|-> [duration_sec] [--json]"),
            _ => positional.push(a),
        }
    }
    let Some(path) = positional.first().cloned() else {
        bail!("usage: score-transcript <path|-> [duration_sec] [--json]");
    };
    let duration_sec = match positional.get(1) {
        Some(s) => s
            .parse::<f64>()
            .with_context(|| format!("invalid duration `{s}`"))?,
        None => DEFAULT_DURATION_SEC,
    };
    Ok(Args {
        path,
        duration_sec,
        json,
    })
}

fn read_transcript(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("reading transcript from stdin")?;
        Ok(s)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading transcript {path}"))
    }
}

fn render(res: &ScoreResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Words: {} · Duration: {}s · WPM: {}\n",
        res.words, res.duration_sec, res.wpm
    ));
    out.push_str(&format!(
        "Base rubric score: {} · Semantic (0–10): {}\n",
        res.base_rubric_score, res.semantic_score_0_10
    ));
    out.push_str(&format!(
        "Overall Score: {} / {}\n\n",
        res.overall_score, res.max_score
    ));

    let width = res
        .criteria
        .iter()
        .map(|c| c.criterion.chars().count())
        .max()
        .unwrap_or(9)
        .max("Criterion".len());
    out.push_str(&format!("{:<width$}  {:>9}  Detail\n", "Criterion", "Score"));
    for c in &res.criteria {
        let pad = width - c.criterion.chars().count();
        out.push_str(&format!(
            "{}{}  {:>9}  {}\n",
            c.criterion,
            " ".repeat(pad),
            format!("{} / {}", c.score, c.max_score),
            c.detail
        ));
    }
    out
}

fn run() -> anyhow::Result<ExitCode> {
    let args = parse_args()?;
    let transcript = read_transcript(&args.path)?;
    if transcript.trim().is_empty() {
        tracing::warn!("empty transcript; paste a transcript first");
        eprintln!("Please provide a non-empty transcript.");
        return Ok(ExitCode::FAILURE);
    }

    let engine = engine_from_env()?;
    let res = engine.score(&transcript, args.duration_sec);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&res)?);
    } else {
        print!("{}", render(&res));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
