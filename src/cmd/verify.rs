use crate::reports;
use clap::Args;
use seatforge::api::{GenerateRequest, GenerateResult};
use seatforge::error::{SeatForgeError, SfResult};
use seatforge::verifier::Verifier;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    #[arg(short, long)]
    pub request: String,

    /// Result JSON produced by `run --output`.
    #[arg(long)]
    pub result: String,
}

pub fn run(args: VerifyArgs) -> SfResult<()> {
    info!("📂 Loading Request: {}", args.request);
    let request = GenerateRequest::load_from_file(&args.request)?;
    info!("📂 Loading Result: {}", args.result);
    let result = GenerateResult::load_from_file(&args.result)?;

    let verifier = Verifier::from_request(&request)?;
    let report = verifier.verify(&result);

    reports::print_plan("CLAIMED PLAN", &result.best_plan);
    reports::print_score_details(&report.details, &request.scores);

    if report.is_valid() {
        println!("VERIFIED: score {}", report.calculated_score);
        Ok(())
    } else {
        for issue in &report.issues {
            println!("ISSUE: {}", issue);
        }
        Err(SeatForgeError::Validation(format!(
            "claimed score {}, recalculated {}, {} placement issue(s)",
            report.claimed_score,
            report.calculated_score,
            report.issues.len()
        )))
    }
}
