//! Sequential demonstration runner.
//!
//! Walks every prompting strategy in order. Each step renders a template,
//! sends it together with the template's out-of-band generation settings,
//! times the call with [`measure_async`], evaluates whatever came back and
//! logs the outcome. A failed call is recorded in its report and the run
//! moves on to the next step.
//!
//! Calls are strictly one at a time. There is no timeout beyond what the
//! provider itself enforces.

use serde::Serialize;
use std::sync::Arc;

use roastify_core::{
    analyze_temperature_impact, analyze_top_p_impact, basic_correctness_check,
    compare_top_p_vs_temperature, temperature_point, top_p_point, validate_rtfc_compliance,
    validate_structured_output, AnalysisError, ComplianceReport, CorrectnessVerdict,
    DynamicPrompt, GenerationSettings, MultiShotPrompt, OneShotPrompt, PromptTemplate,
    RenderedPrompt, SamplingComparison, SamplingPoint, StopSequencePrompt, Strategy,
    StructuredOutputPrompt, StructuredVerdict, SystemUserPrompt, TemperatureImpact,
    TemperaturePrompt, TopPImpact, TopPPrompt, ZeroShotPrompt,
};

use crate::config::DemoSettings;
use crate::metrics::{measure_async, OperationMetrics, UsageMetadata};
use crate::providers::{GenerateRequest, GenerativeModel};

/// Verdict produced for one response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Evaluation {
    Correctness(CorrectnessVerdict),
    Structured(StructuredVerdict),
    Compliance(ComplianceReport),
}

impl Evaluation {
    pub fn passed(&self) -> bool {
        match self {
            Evaluation::Correctness(v) => v.is_likely_valid,
            Evaluation::Structured(v) => v.is_valid,
            Evaluation::Compliance(r) => r.is_compliant,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Evaluation::Correctness(v) => &v.reason,
            Evaluation::Structured(v) => &v.reason,
            Evaluation::Compliance(r) => &r.feedback,
        }
    }
}

/// Everything recorded for one model call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub strategy: Strategy,

    /// Human-readable step name, e.g.
    /// "Temperature 0.3 (Low: Consistent, predictable outputs)".
    pub label: String,

    /// Sweep point this step sampled at; sweeps only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<SamplingPoint>,

    pub prompt: RenderedPrompt,
    pub generation_settings: GenerationSettings,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,

    /// Set when the call failed; `response` and `evaluation` are then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub metrics: OperationMetrics,
}

impl DemoReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// A sampling sweep: one report per value plus the batch analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport<A> {
    pub steps: Vec<DemoReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<A>,

    /// Why `analysis` is missing, e.g. too few successful calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
}

impl<A> SweepReport<A> {
    fn new(steps: Vec<DemoReport>, analysis: Result<A, AnalysisError>) -> Self {
        match analysis {
            Ok(analysis) => Self {
                steps,
                analysis: Some(analysis),
                analysis_error: None,
            },
            Err(e) => Self {
                steps,
                analysis: None,
                analysis_error: Some(e.to_string()),
            },
        }
    }

    /// Texts of the calls that succeeded, in sweep order.
    pub fn responses(&self) -> Vec<String> {
        successful_responses(&self.steps)
    }
}

/// Outcome of a full run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoRun {
    pub reports: Vec<DemoReport>,
    pub temperature: SweepReport<TemperatureImpact>,
    pub top_p: SweepReport<TopPImpact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<SamplingComparison>,
}

impl DemoRun {
    /// Every individual call, sweeps included.
    pub fn all_reports(&self) -> impl Iterator<Item = &DemoReport> {
        self.reports
            .iter()
            .chain(self.temperature.steps.iter())
            .chain(self.top_p.steps.iter())
    }

    pub fn failures(&self) -> usize {
        self.all_reports().filter(|r| !r.is_success()).count()
    }
}

fn successful_responses(steps: &[DemoReport]) -> Vec<String> {
    steps.iter().filter_map(|r| r.response.clone()).collect()
}

/// Runs each prompting strategy against one model.
pub struct DemoRunner {
    model: Arc<dyn GenerativeModel>,
    settings: DemoSettings,
}

impl DemoRunner {
    pub fn new(model: Arc<dyn GenerativeModel>, settings: DemoSettings) -> Self {
        Self { model, settings }
    }

    pub fn settings(&self) -> &DemoSettings {
        &self.settings
    }

    /// Ask the model whether it can serve calls before any are made.
    pub async fn health_check(&self) -> bool {
        let healthy = self.model.health_check().await;
        if !healthy {
            tracing::warn!(
                provider = self.model.name(),
                model = self.model.model(),
                "Provider failed its health check"
            );
        }
        healthy
    }

    fn subject(&self) -> &str {
        &self.settings.subject
    }

    pub async fn zero_shot(&self) -> DemoReport {
        self.run_step(Strategy::ZeroShot.label().to_string(), &ZeroShotPrompt)
            .await
    }

    pub async fn dynamic(&self) -> DemoReport {
        let template = DynamicPrompt::for_subject(self.subject());
        self.run_step(Strategy::Dynamic.label().to_string(), &template)
            .await
    }

    pub async fn one_shot(&self) -> DemoReport {
        let template = OneShotPrompt::for_subject(self.subject());
        self.run_step(Strategy::OneShot.label().to_string(), &template)
            .await
    }

    pub async fn multi_shot(&self) -> DemoReport {
        let template = MultiShotPrompt::for_subject(self.subject());
        self.run_step(Strategy::MultiShot.label().to_string(), &template)
            .await
    }

    pub async fn stop_sequence(&self) -> DemoReport {
        let template = StopSequencePrompt::for_subject(self.subject());
        self.run_step(Strategy::StopSequence.label().to_string(), &template)
            .await
    }

    pub async fn structured_output(&self) -> DemoReport {
        let template = StructuredOutputPrompt::for_subject(self.subject());
        self.run_step(Strategy::StructuredOutput.label().to_string(), &template)
            .await
    }

    pub async fn system_user(&self) -> DemoReport {
        let template = SystemUserPrompt::for_subject(self.subject());
        self.run_step(Strategy::SystemUser.label().to_string(), &template)
            .await
    }

    /// One call per configured temperature, then the impact analysis.
    pub async fn temperature_sweep(&self) -> SweepReport<TemperatureImpact> {
        let mut steps = Vec::with_capacity(self.settings.temperatures.len());
        for &temperature in &self.settings.temperatures {
            let template = TemperaturePrompt::new(self.subject(), temperature);
            let point = temperature_point(temperature);
            let mut report = self
                .run_step(sweep_label("Temperature", &point), &template)
                .await;
            report.sampling = Some(point);
            steps.push(report);
        }

        let analysis = analyze_temperature_impact(&successful_responses(&steps));
        log_analysis(Strategy::Temperature, &analysis);
        SweepReport::new(steps, analysis)
    }

    /// One call per configured top-p value, then the impact analysis.
    pub async fn top_p_sweep(&self) -> SweepReport<TopPImpact> {
        let mut steps = Vec::with_capacity(self.settings.top_ps.len());
        for &top_p in &self.settings.top_ps {
            let template = TopPPrompt::new(self.subject(), top_p);
            let point = top_p_point(top_p);
            let mut report = self.run_step(sweep_label("Top P", &point), &template).await;
            report.sampling = Some(point);
            steps.push(report);
        }

        let analysis = analyze_top_p_impact(&successful_responses(&steps));
        log_analysis(Strategy::TopP, &analysis);
        SweepReport::new(steps, analysis)
    }

    /// Every demonstration, one after another.
    pub async fn run_all(&self) -> DemoRun {
        tracing::info!(
            provider = self.model.name(),
            model = self.model.model(),
            subject = %self.subject(),
            "Starting demonstration run"
        );

        let reports = vec![
            self.zero_shot().await,
            self.dynamic().await,
            self.one_shot().await,
            self.multi_shot().await,
            self.stop_sequence().await,
            self.structured_output().await,
            self.system_user().await,
        ];
        let temperature = self.temperature_sweep().await;
        let top_p = self.top_p_sweep().await;

        let comparison =
            match compare_top_p_vs_temperature(&top_p.responses(), &temperature.responses()) {
                Ok(comparison) => {
                    tracing::info!(
                        recommendation = %comparison.recommendation,
                        "Compared top-p and temperature sweeps"
                    );
                    Some(comparison)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping top-p vs temperature comparison");
                    None
                }
            };

        let run = DemoRun {
            reports,
            temperature,
            top_p,
            comparison,
        };
        tracing::info!(
            calls = run.all_reports().count(),
            failures = run.failures(),
            "Demonstration run finished"
        );
        run
    }

    /// Render, call, evaluate and log one template.
    async fn run_step<T>(&self, label: String, template: &T) -> DemoReport
    where
        T: PromptTemplate + ?Sized,
    {
        let strategy = template.strategy();
        let prompt = template.render();
        let generation_settings = template.generation_settings();
        let request = GenerateRequest::text(prompt.as_str())
            .with_generation_config(generation_settings.clone());

        let operation_name = match (generation_settings.temperature, generation_settings.top_p) {
            (Some(t), _) => format!("{}_{t}", strategy.id()),
            (_, Some(p)) => format!("{}_{p}", strategy.id()),
            _ => strategy.id().to_string(),
        };

        let result = measure_async(&operation_name, || self.model.generate_content(request)).await;
        let metrics = result.metrics;

        match result.outcome {
            Ok(response) => {
                let evaluation = self.evaluate(strategy, response.text());
                tracing::info!(
                    step = %label,
                    duration_ms = metrics.duration_ms,
                    passed = evaluation.passed(),
                    reason = %evaluation.reason(),
                    "Evaluated response"
                );
                DemoReport {
                    strategy,
                    label,
                    sampling: None,
                    prompt,
                    generation_settings,
                    response: Some(response.text),
                    usage: response.usage_metadata,
                    evaluation: Some(evaluation),
                    error: None,
                    metrics,
                }
            }
            Err(e) => {
                tracing::warn!(step = %label, error = %e, "Demonstration step failed");
                DemoReport {
                    strategy,
                    label,
                    sampling: None,
                    prompt,
                    generation_settings,
                    response: None,
                    usage: None,
                    evaluation: None,
                    error: Some(e.to_string()),
                    metrics,
                }
            }
        }
    }

    fn evaluate(&self, strategy: Strategy, text: &str) -> Evaluation {
        match strategy {
            Strategy::StructuredOutput => Evaluation::Structured(validate_structured_output(text)),
            Strategy::SystemUser => {
                Evaluation::Compliance(validate_rtfc_compliance(text, self.subject()))
            }
            _ => Evaluation::Correctness(basic_correctness_check(text)),
        }
    }
}

fn sweep_label(control: &str, point: &SamplingPoint) -> String {
    format!(
        "{control} {} ({}: {})",
        point.value, point.name, point.description
    )
}

fn log_analysis<A: std::fmt::Debug>(strategy: Strategy, analysis: &Result<A, AnalysisError>) {
    match analysis {
        Ok(a) => tracing::info!(sweep = %strategy, analysis = ?a, "Sweep analyzed"),
        Err(e) => tracing::warn!(sweep = %strategy, error = %e, "Sweep not analyzed"),
    }
}
