//! Subcommand implementations.

use anyhow::Context;
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tflow_core::config::{mask_secret, REQUIRED_VARS};
use tflow_core::validation::validate_recent_limit;
use tflow_core::{CoreConfig, PatientInfo, SymptomText, TriageService, VitalsReading};
use tflow_groq::GroqClient;
use tflow_supabase::SupabaseStore;

/// Builds the triage service from the environment.
fn service() -> anyhow::Result<TriageService> {
    let cfg = CoreConfig::from_env()?;
    let provider = GroqClient::new(cfg.provider())?;
    let store = SupabaseStore::new(cfg.store())?;
    Ok(TriageService::new(Arc::new(provider), Arc::new(store)))
}

fn patient_info_with_age(age: Option<u32>) -> PatientInfo {
    let mut info = PatientInfo::new();
    if let Some(age) = age {
        info.insert("age".into(), age.into());
    }
    info
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

/// Where the result was stored, or that storing it failed.
fn storage_line(record_id: Option<&str>, what: &str) -> String {
    match record_id {
        Some(id) => format!("Stored with ID: {id}"),
        None => format!("Database storage failed, but {what} completed"),
    }
}

fn mark(flag: bool) -> &'static str {
    if flag {
        "ABNORMAL"
    } else {
        "ok"
    }
}

pub async fn triage(symptoms: &str, use_ai: bool, age: Option<u32>) -> anyhow::Result<()> {
    let symptoms = SymptomText::new(symptoms)?;
    let outcome = service()?
        .triage_patient(&symptoms, patient_info_with_age(age), use_ai)
        .await;

    println!("Triage result: {}", outcome.triage_level);
    println!("{}", storage_line(outcome.record_id.as_deref(), "triage"));
    Ok(())
}

pub async fn vitals(pulse: i32, systolic: i32, diastolic: i32) -> anyhow::Result<()> {
    let reading = VitalsReading::new(pulse, systolic, diastolic)?;
    let outcome = service()?
        .flag_vitals(&reading, PatientInfo::new())
        .await;

    println!("Pulse:        {}", mark(outcome.flags.pulse_flag()));
    println!("Systolic BP:  {}", mark(outcome.flags.systolic_flag()));
    println!("Diastolic BP: {}", mark(outcome.flags.diastolic_flag()));
    println!(
        "Any abnormal: {}",
        if outcome.flags.any_flag() { "YES" } else { "NO" }
    );
    println!("{}", storage_line(outcome.record_id.as_deref(), "vitals check"));
    Ok(())
}

pub async fn records(limit: i64) -> anyhow::Result<()> {
    let limit = validate_recent_limit(limit)?;
    let service = service()?;

    println!("=== Recent {limit} triage records ===");
    for (i, record) in service.recent_triage(limit).await.iter().enumerate() {
        println!(
            "{}. {} - {}",
            i + 1,
            record.triage_level,
            preview(&record.symptoms, 60)
        );
        println!("   {} (AI: {})", record.created_at, record.use_ai);
    }

    println!();
    println!("=== Recent {limit} vitals records ===");
    for (i, record) in service.recent_vitals(limit).await.iter().enumerate() {
        println!(
            "{}. [{}] Pulse: {}, BP: {}/{}",
            i + 1,
            if record.any_flag { "FLAGGED" } else { "normal" },
            record.pulse,
            record.systolic_bp,
            record.diastolic_bp
        );
        println!("   {}", record.created_at);
    }
    Ok(())
}

/// Non-empty, trimmed lines of a batch file.
fn batch_lines(contents: &str) -> Vec<&str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

pub async fn batch(file: &Path) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("File not found: {}", file.display()))?;
    let lines = batch_lines(&contents);
    let service = service()?;

    let mut processed = 0usize;
    for (i, line) in lines.iter().enumerate() {
        let batch_id = i + 1;
        println!("Processing {batch_id}/{}: {}", lines.len(), preview(line, 50));

        let symptoms = match SymptomText::new(line) {
            Ok(symptoms) => symptoms,
            Err(e) => {
                println!("  skipped: {e}");
                continue;
            }
        };

        let mut info = PatientInfo::new();
        info.insert("batch_id".into(), batch_id.into());
        let outcome = service.triage_patient(&symptoms, info, true).await;
        println!("  {}", outcome.triage_level);
        processed += 1;
    }

    println!();
    println!("Processed {processed} cases");
    Ok(())
}

fn is_quit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q")
}

/// Prints `label` and reads one line from stdin; `None` at end of input.
fn prompt(label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub async fn interactive() -> anyhow::Result<()> {
    let service = service()?;

    println!("=== T-Flow AI Medical Triage ===");
    println!("Enter patient symptoms (or 'quit' to exit):");

    while let Some(input) = prompt("\nSymptoms: ")? {
        if is_quit(&input) {
            println!("Goodbye!");
            break;
        }

        let symptoms = match SymptomText::new(&input) {
            Ok(symptoms) => symptoms,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let age = prompt("Patient age (optional): ")?.and_then(|line| line.parse::<u32>().ok());

        let outcome = service
            .triage_patient(&symptoms, patient_info_with_age(age), true)
            .await;

        println!("\nTriage result: {}", outcome.triage_level);
        println!("{}", storage_line(outcome.record_id.as_deref(), "triage"));
    }
    Ok(())
}

pub async fn check() -> anyhow::Result<()> {
    println!("=== Configuration ===");
    let mut missing = 0;
    for key in REQUIRED_VARS {
        match std::env::var(key).ok().filter(|v| !v.trim().is_empty()) {
            Some(value) => println!("{key}: {}", mask_secret(&value)),
            None => {
                println!("{key}: missing");
                missing += 1;
            }
        }
    }
    if missing > 0 {
        anyhow::bail!("{missing} required environment variable(s) missing");
    }

    println!();
    println!("=== Store connection ===");
    service()?
        .probe_store()
        .await
        .context("store connection failed")?;
    println!("Store connection successful");
    Ok(())
}
