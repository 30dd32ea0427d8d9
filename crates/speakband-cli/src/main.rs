use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use speakband_analysis::{Analyzer, GrammarCheck, LanguageToolClient};
use speakband_core::{
    AnswerReport, DescriptorTable, FeedbackComposer, GrammarCheckConfig, GrammarCheckOutcome,
    TestReport, TestSubmission,
};

#[derive(Parser)]
#[command(name = "speakband")]
#[command(about = "SpeakBand - IELTS speaking band estimation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single transcript
    Score {
        /// Transcript file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Inline transcript text instead of a file
        #[arg(short, long)]
        text: Option<String>,

        /// Skip the external grammar check
        #[arg(long)]
        skip_grammar: bool,

        /// LanguageTool endpoint URL
        #[arg(long)]
        api_url: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Score a full test from a JSON submission file
    Batch {
        /// Submission file with testId, questions and answers
        file: PathBuf,

        /// Skip the external grammar check
        #[arg(long)]
        skip_grammar: bool,

        /// LanguageTool endpoint URL
        #[arg(long)]
        api_url: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

/// Stand-in checker for `--skip-grammar`: reports success with no issues
/// so grammar accuracy is judged on structure alone.
struct SkippedCheck;

#[async_trait]
impl GrammarCheck for SkippedCheck {
    async fn check(&self, _text: &str) -> GrammarCheckOutcome {
        GrammarCheckOutcome::ok(Vec::new())
    }
}

fn get_languagetool_url() -> Option<String> {
    std::env::var("LANGUAGETOOL_URL").ok()
}

fn build_analyzer(skip_grammar: bool, api_url: Option<String>) -> Result<Analyzer> {
    let descriptors = DescriptorTable::builtin()?;
    let composer = FeedbackComposer::new(descriptors);

    let checker: Arc<dyn GrammarCheck> = if skip_grammar {
        Arc::new(SkippedCheck)
    } else {
        let mut config = GrammarCheckConfig::default();
        if let Some(url) = api_url.or_else(get_languagetool_url) {
            config.api_url = url;
        }
        Arc::new(LanguageToolClient::new(config)?)
    };

    Ok(Analyzer::new(checker, composer))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { file, text, skip_grammar, api_url, format } => {
            cmd_score(file.as_deref(), text.as_deref(), skip_grammar, api_url, &format).await?
        }
        Commands::Batch { file, skip_grammar, api_url, format } => {
            cmd_batch(&file, skip_grammar, api_url, &format).await?
        }
    }

    Ok(())
}

fn read_transcript(file: Option<&Path>, text: Option<&str>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

async fn cmd_score(
    file: Option<&Path>,
    text: Option<&str>,
    skip_grammar: bool,
    api_url: Option<String>,
    format: &str,
) -> Result<()> {
    let transcript = read_transcript(file, text)?;
    let analyzer = build_analyzer(skip_grammar, api_url)?;
    let report = analyzer.analyze(&transcript).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_report(&report),
    }

    Ok(())
}

async fn cmd_batch(
    file: &Path,
    skip_grammar: bool,
    api_url: Option<String>,
    format: &str,
) -> Result<()> {
    let submission: TestSubmission = serde_json::from_str(&std::fs::read_to_string(file)?)?;
    let analyzer = build_analyzer(skip_grammar, api_url)?;
    let report = analyzer.run_test(&submission).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_test_report(&report),
    }

    Ok(())
}

fn print_report(report: &AnswerReport) {
    println!();
    println!("Band Scores:");
    println!("{:-<40}", "");
    println!("  Fluency & Coherence:  {}", report.scores.fluency);
    println!("  Lexical Resource:     {}", report.scores.lexical);
    println!("  Grammar:              {}", report.scores.grammar);
    println!("  Pronunciation:        {}", report.scores.pronunciation);
    println!("  Overall:              {}", report.scores.overall);
    println!();
    println!("  Words:           {}", report.metrics.word_count);
    println!("  Unique words:    {}", report.metrics.unique_word_count);
    println!("  Sentences:       {}", report.metrics.sentence_count);
    println!("  Grammar errors:  {}", report.grammar_error_count);
    if !report.grammar_check_success {
        println!("  Grammar check:   unavailable");
    }
    println!();
    println!("{}", report.feedback);
}

fn print_test_report(report: &TestReport) {
    for entry in &report.feedbacks {
        println!();
        println!("{}", entry.feedback);
        println!("{:-<60}", "");
    }

    println!();
    match &report.summary {
        Some(summary) => {
            println!("Test Summary:");
            println!("{:-<40}", "");
            println!("  Fluency & Coherence:  {}", summary.fluency);
            println!("  Lexical Resource:     {}", summary.lexical);
            println!("  Grammar:              {}", summary.grammar);
            println!("  Pronunciation:        {}", summary.pronunciation);
            println!("  Overall:              {}", summary.overall);
            println!();
            println!("  Questions answered:  {}", summary.questions_answered);
            println!("  Total words:         {}", summary.total_words);
            println!("  Total errors:        {}", summary.total_errors);
        }
        None => {
            println!("No questions answered; no summary available.");
        }
    }
    println!();
}
