use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use textriage::{ArtifactStore, Category, Classifier};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the model artifact; defaults to the artifact store location
    #[arg(long)]
    model: Option<PathBuf>,

    /// Path to the vocabulary file; defaults to the artifact store location
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Skip model inference and classify with rules alone
    #[arg(long)]
    rule_only: bool,

    /// Emit one JSON object per message instead of plain text
    #[arg(long)]
    json: bool,

    /// Sender id to attribute the messages to
    #[arg(long, default_value = "UNKNOWN")]
    sender: String,

    /// Messages to classify; built-in samples are used when none are given
    messages: Vec<String>,
}

const SAMPLE_MESSAGES: &[(&str, &str)] = &[
    ("VM-ACMEBK", "Your OTP is 482916. Do not share it with anyone."),
    ("AD-HDFCBK", "INR 12,500 credited to a/c XX4821 on 03-06."),
    ("BP-LOANIN", "Reminder: your EMI of Rs 4,200 and loan statement are due Friday."),
    ("VK-STYLEU", "MEGA SALE! Flat 60% off on sneakers. Use code STEP60."),
    ("TX-WINBIG", "CONGRATULATIONS WINNER!! Claim your free prize NOW, guaranteed!"),
    ("FRIEND", "hey, thanks for coming! see you tomorrow?"),
    ("DM-NEWSLT", "Your weekly newsletter is here. Reply STOP to unsubscribe."),
];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = Classifier::builder();
    if args.rule_only {
        builder = builder.rule_only();
    } else if args.model.is_some() || args.vocab.is_some() {
        if let Some(model) = &args.model {
            builder = builder.with_model_file(model);
        }
        if let Some(vocab) = &args.vocab {
            builder = builder.with_vocab_file(vocab);
        }
    } else {
        let store = ArtifactStore::new_default()?;
        builder = builder.with_artifact_store(&store);
    }

    let engine = builder.build();
    let engine_info = engine.info();
    info!(
        "engine ready: vocab_size={} model_loaded={} max_len={}",
        engine_info.vocab_size, engine_info.model_loaded, engine_info.max_sequence_length
    );

    let owned: Vec<(String, String)> = if args.messages.is_empty() {
        SAMPLE_MESSAGES
            .iter()
            .map(|(sender, body)| (sender.to_string(), body.to_string()))
            .collect()
    } else {
        args.messages
            .iter()
            .map(|body| (args.sender.clone(), body.clone()))
            .collect()
    };

    for (sender, body) in &owned {
        let result = engine.classify(body, sender);

        if args.json {
            println!("{}", serde_json::to_string(&result)?);
            continue;
        }

        println!("[{}] {}", sender, body);
        println!(
            "  category={} spam={} important={}",
            result.category, result.is_spam, result.is_important
        );
        if matches!(result.category, Category::Offer | Category::Coupon) {
            println!("  offer_subcategory={}", engine.offer_subcategory(body));
        }
        if let Some(scores) = &result.confidence_scores {
            let mut sorted: Vec<_> = scores.iter().collect();
            sorted.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
            println!("  confidence:");
            for (category, score) in sorted {
                println!("    {}: {:.1}%", category, score * 100.0);
            }
        }
    }

    Ok(())
}
