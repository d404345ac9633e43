//! `roastify`: run every prompt-engineering demonstration against Gemini.
//!
//! Takes no flags. Configuration comes from the YAML file named by
//! `ROASTIFY_CONFIG` (defaults otherwise) and the key from `GEMINI_API_KEY`.
//! Individual call failures are reported and do not change the exit code;
//! a provider that fails its health check stops the run before any call.

use anyhow::Context;

use roastify_core::ComplianceReport;
use roastify_runtime::{gemini_runner, DemoReport, DemoRun, Evaluation, RuntimeConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs on stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env().context("loading runtime configuration")?;
    let runner = gemini_runner(&config).context("configuring the Gemini provider")?;
    if !runner.health_check().await {
        anyhow::bail!("Gemini provider is not ready: check the configured API key");
    }

    let run = runner.run_all().await;
    print_run(&run);
    Ok(())
}

fn print_run(run: &DemoRun) {
    for report in &run.reports {
        print_report(report);
    }

    println!("== Temperature sweep ==");
    for report in &run.temperature.steps {
        print_report(report);
    }
    match (&run.temperature.analysis, &run.temperature.analysis_error) {
        (Some(analysis), _) => println!(
            "   {} (length spread {}, metaphor diversity {}, tone consistency {})",
            analysis.summary,
            analysis.length_variation,
            analysis.metaphor_diversity,
            analysis.tone_consistency
        ),
        (None, Some(error)) => println!("   {error}"),
        (None, None) => {}
    }

    println!("== Top P sweep ==");
    for report in &run.top_p.steps {
        print_report(report);
    }
    match (&run.top_p.analysis, &run.top_p.analysis_error) {
        (Some(analysis), _) => println!(
            "   {} (vocabulary {}, quality score {}, diversity score {})",
            analysis.summary,
            analysis.vocabulary_diversity,
            analysis.quality_score,
            analysis.diversity_score
        ),
        (None, Some(error)) => println!("   {error}"),
        (None, None) => {}
    }

    if let Some(comparison) = &run.comparison {
        println!("== Top P vs Temperature ==");
        println!("   Top P: {}", comparison.top_p_advantage);
        println!("   Temperature: {}", comparison.temperature_advantage);
        println!("   Recommendation: {}", comparison.recommendation);
    }

    println!(
        "Completed {} calls, {} failed",
        run.all_reports().count(),
        run.failures()
    );
}

fn print_report(report: &DemoReport) {
    let status = if report.is_success() { "OK" } else { "FAILED" };
    println!(
        "[{status}] {} ({} ms)",
        report.label, report.metrics.duration_ms
    );

    if let Some(error) = &report.error {
        println!("   error: {error}");
        return;
    }
    if let Some(response) = &report.response {
        println!("   response: {}", response.trim());
    }
    if let Some(usage) = &report.usage {
        println!(
            "   tokens: prompt {}, candidates {}, total {}",
            usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
        );
    }
    match &report.evaluation {
        Some(Evaluation::Structured(verdict)) => {
            println!("   valid: {} ({})", verdict.is_valid, verdict.reason);
            if let Some(parsed) = &verdict.parsed {
                if let Ok(pretty) = serde_json::to_string_pretty(parsed) {
                    println!("   parsed: {pretty}");
                }
            }
        }
        Some(Evaluation::Compliance(compliance)) => print_compliance(compliance),
        Some(evaluation) => {
            println!("   valid: {} ({})", evaluation.passed(), evaluation.reason())
        }
        None => {}
    }
}

fn print_compliance(report: &ComplianceReport) {
    println!("   {}", report.feedback);
    for (check, passed) in &report.checks {
        println!("     {check}: {}", if *passed { "pass" } else { "fail" });
    }
}
