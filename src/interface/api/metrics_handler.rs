//! Prometheus metrics handler

use crate::application::DispatchOutcome;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Describe metrics
    describe_counter!(
        "calls_initiated_total",
        "Outbound call requests by result"
    );
    describe_counter!(
        "callback_events_total",
        "Callback events received, by dispatch outcome"
    );
    describe_counter!(
        "playback_commands_total",
        "Playback commands issued to the provider, by result"
    );
    describe_counter!(
        "playback_outcomes_total",
        "Playback completion events reported by the provider"
    );

    Ok(handle)
}

/// HTTP metrics handler
pub async fn metrics_handler(
    axum::extract::State(prometheus_handle): axum::extract::State<PrometheusHandle>,
) -> Response {
    let metrics = prometheus_handle.render();
    (StatusCode::OK, metrics).into_response()
}

/// Record an outbound call request
pub fn record_call_initiated(result: &str) {
    counter!("calls_initiated_total", "result" => result.to_string()).increment(1);
}

/// Record the outcome of one callback event
pub fn record_dispatch_outcome(outcome: &DispatchOutcome) {
    counter!("callback_events_total", "outcome" => outcome.label()).increment(1);

    match outcome {
        DispatchOutcome::PlaybackStarted { .. } => {
            counter!("playback_commands_total", "result" => "accepted").increment(1);
        }
        DispatchOutcome::CommandFailed { .. } => {
            counter!("playback_commands_total", "result" => "failed").increment(1);
        }
        DispatchOutcome::PlaybackCompleted { .. } => {
            counter!("playback_outcomes_total", "outcome" => "completed").increment(1);
        }
        DispatchOutcome::PlaybackFailed { .. } => {
            counter!("playback_outcomes_total", "outcome" => "failed").increment(1);
        }
        DispatchOutcome::Ignored { .. } | DispatchOutcome::DecodeFailed { .. } => {}
    }
}
