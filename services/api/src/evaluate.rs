use crate::infra::parse_timestamp;
use chrono::{DateTime, Utc};
use clap::Args;
use reputation::error::AppError;
use reputation::scoring::{DomainPayloads, Evaluation, ReputationEngine, ScoringRules};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Social profile payload (JSON file). Omit to score the domain as empty.
    #[arg(long)]
    pub(crate) social: Option<PathBuf>,
    /// Wallet activity payload (JSON file)
    #[arg(long)]
    pub(crate) wallet: Option<PathBuf>,
    /// Messaging groups container (JSON file)
    #[arg(long)]
    pub(crate) groups: Option<PathBuf>,
    /// Messaging messages container (JSON file)
    #[arg(long)]
    pub(crate) messages: Option<PathBuf>,
    /// Evaluation instant (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Scoring rules JSON replacing the standard tables
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Pretty-print the evaluation
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let pretty = args.pretty;
    let evaluation = evaluate_files(&args)?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&evaluation)?
    } else {
        serde_json::to_string(&evaluation)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn evaluate_files(args: &EvaluateArgs) -> Result<Evaluation, AppError> {
    let rules = match &args.rules {
        Some(path) => ScoringRules::from_path(path)?,
        None => ScoringRules::standard(),
    };

    let payloads = DomainPayloads {
        social: read_payload(args.social.as_deref())?,
        wallet: read_payload(args.wallet.as_deref())?,
        messaging_groups: read_payload(args.groups.as_deref())?,
        messaging_messages: read_payload(args.messages.as_deref())?,
    };

    let as_of = args.as_of.unwrap_or_else(Utc::now);
    Ok(ReputationEngine::new(rules).evaluate(&payloads, as_of))
}

fn read_payload(path: Option<&Path>) -> Result<Value, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Value::Null),
    }
}
