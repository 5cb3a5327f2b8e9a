//! AWS Lambda handler for running savings-matching projections
//!
//! Accepts an enrollment as a JSON POST body, or as shared-link query
//! parameters on a GET request, and returns the projection result as JSON.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::NaiveDate;
use enlistment_savings::{
    share, AccrualEngine, AccrualResult, Assumptions, DepositPlan, Enrollment, EngineError,
    ServiceBranch,
};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input enrollment for the projection
#[derive(Debug, Deserialize)]
struct ProjectionRequest {
    /// Enlistment date (ISO)
    start_date: Option<NaiveDate>,

    /// Service branch token: army, navy, airforce, marine
    branch: Option<String>,

    /// Monthly deposit per bucket year, canonical KRW
    #[serde(default)]
    deposits: BTreeMap<i32, f64>,
}

impl ProjectionRequest {
    fn into_enrollment(self) -> Result<Enrollment, EngineError> {
        let start_date = self.start_date.ok_or(EngineError::MissingStartDate)?;
        let branch: ServiceBranch = self.branch.ok_or(EngineError::MissingBranch)?.parse()?;
        let deposits = DepositPlan::from_amounts(self.deposits);

        Ok(Enrollment::new(0, start_date, branch, deposits))
    }
}

/// Output from the projection
#[derive(Debug, Serialize)]
struct ProjectionResponse {
    result: AccrualResult,
    execution_time_ms: u64,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &ProjectionResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // GET carries a shared link; POST carries the JSON input contract
    let enrollment = if event.method().as_str() == "GET" {
        let params = event.query_string_parameters();
        share::from_pairs(params.iter())
    } else {
        let body_str = match event.body() {
            Body::Text(s) => s.clone(),
            Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
            Body::Empty => "{}".to_string(),
        };

        match serde_json::from_str::<ProjectionRequest>(&body_str) {
            Ok(request) => request.into_enrollment(),
            Err(e) => {
                return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
            }
        }
    };

    let enrollment = match enrollment {
        Ok(e) => e,
        Err(e) => {
            return Ok(error_response(400, &e.to_string()));
        }
    };

    let engine = AccrualEngine::new(Assumptions::default_statutory());
    let result = match engine.run(&enrollment) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(500, &e.to_string()));
        }
    };

    let response = ProjectionResponse {
        result,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
