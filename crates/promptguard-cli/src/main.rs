//! PromptGuard CLI - scan prompts and responses from the terminal.
//!
//! The neural collaborators live outside the core, so the CLI wires in
//! offline stand-ins that let the full pipeline run without a model
//! download: a unigram-character pseudo-perplexity (2^entropy, following
//! the identity perplexity = 2^H for the character unigram model) and a
//! neutral classifier that always reports 0.0. Swap in real scorers for
//! production deployments.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use promptguard_core::{
    GuardConfig, IntentClassifier, PerplexityScorer, PromptGuard, ScanDecision, ScanStatus,
    ScorerError,
};
use promptguard_heuristics::StatisticalAnalyzer;

#[derive(Parser)]
#[command(name = "promptguard")]
#[command(about = "PromptGuard - Runtime firewall for LLM traffic")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Scan a single prompt
    Scan {
        /// The prompt text to screen
        prompt: String,
    },
    /// Scan a model response for leakage and policy violations
    ScanOutput {
        /// The response text to screen
        response: String,
    },
    /// Interactive scan loop (default)
    Repl,
    /// Validate the default configuration
    Check,
}

/// Pseudo-perplexity of the character unigram model: 2^H(text). Tracks
/// the real scorer's shape (fluent text low, gibberish high).
struct CharPerplexity {
    stats: StatisticalAnalyzer,
}

impl PerplexityScorer for CharPerplexity {
    fn score(&self, text: &str) -> Result<f64, ScorerError> {
        if text.trim().is_empty() {
            return Ok(0.0);
        }
        Ok(2f64.powf(self.stats.calculate_entropy(text)))
    }
}

/// Classifier stand-in; reports no malicious intent.
struct NeutralClassifier;

impl IntentClassifier for NeutralClassifier {
    fn probability(&self, _text: &str) -> Result<f64, ScorerError> {
        Ok(0.0)
    }
}

fn build_guard() -> Result<PromptGuard> {
    let guard = PromptGuard::new(
        GuardConfig::default(),
        Box::new(CharPerplexity {
            stats: StatisticalAnalyzer::new(),
        }),
        Box::new(NeutralClassifier),
    )?;
    Ok(guard)
}

fn print_decision(decision: &ScanDecision) {
    match decision.status {
        ScanStatus::Block => {
            println!("BLOCKED");
            if let Some(reason) = &decision.reason {
                println!("  reason: {reason}");
            }
        }
        ScanStatus::Pass => {
            println!("PASSED");
        }
    }
    if let Some(risk) = decision.total_risk {
        println!("  total risk: {risk:.4}");
    }
    if let Some(b) = &decision.breakdown {
        println!(
            "  breakdown: heuristic={:.1} perplexity={:.2} bert={:.4} raw_ppl={:.2} entropy={:.2}",
            b.heuristic_score, b.perplexity_norm, b.bert_prob, b.raw_perplexity, b.entropy
        );
        if let Some(excerpt) = &b.analyzed_excerpt {
            println!("  analyzed: {excerpt}");
        }
    }
    if let Some(warning) = &decision.warnings {
        println!("  warning: {warning}");
    }
}

fn repl(guard: &PromptGuard) -> Result<()> {
    println!("PromptGuard interactive scanner. Type 'exit' to quit.");
    let stdin = io::stdin();
    loop {
        print!("prompt >> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        match guard.scan_input(input) {
            Ok(decision) => print_decision(&decision),
            // Fail-closed: a scan that cannot complete is reported as a
            // failure, never shown as PASSED.
            Err(e) => eprintln!("scan failed: {e}"),
        }
        println!("----------------------------------------");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    match cli.command {
        Some(Commands::Scan { prompt }) => {
            let guard = build_guard()?;
            print_decision(&guard.scan_input(&prompt)?);
        }
        Some(Commands::ScanOutput { response }) => {
            let guard = build_guard()?;
            print_decision(&guard.scan_output(&response));
        }
        Some(Commands::Check) => {
            GuardConfig::default().validate()?;
            println!("configuration OK");
        }
        Some(Commands::Repl) | None => {
            let guard = build_guard()?;
            repl(&guard)?;
        }
    }

    Ok(())
}
