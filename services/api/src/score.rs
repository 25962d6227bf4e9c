use crate::infra::build_scoring_stack;
use clap::Args;
use credit_engine::config::AppConfig;
use credit_engine::error::AppError;
use credit_engine::scoring::{ApplicationFacts, Decision};
use credit_engine::telemetry;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Requested loan amount
    #[arg(long)]
    pub(crate) amount: f64,
    /// Up-front down payment
    #[arg(long, default_value_t = 0.0)]
    pub(crate) down_payment: f64,
    /// Repayment term in months
    #[arg(long)]
    pub(crate) term: u32,
    /// Net monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// Recurring monthly charges
    #[arg(long, default_value_t = 0.0)]
    pub(crate) charges: f64,
    /// Monthly payments on other outstanding credits
    #[arg(long, default_value_t = 0.0)]
    pub(crate) other_credits: f64,
    /// Include borrower insurance in the simulated installment
    #[arg(long)]
    pub(crate) insurance: bool,
}

impl From<ScoreArgs> for ApplicationFacts {
    fn from(args: ScoreArgs) -> Self {
        ApplicationFacts {
            loan_amount: args.amount,
            down_payment: args.down_payment,
            term_months: args.term,
            insurance: args.insurance,
            monthly_income: args.income,
            monthly_charges: args.charges,
            other_credit_payments: args.other_credits,
        }
    }
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let (_, engine) = build_scoring_stack(&config);
    let facts = ApplicationFacts::from(args);

    let result = tokio::task::spawn_blocking(move || engine.evaluate(&facts))
        .await
        .map_err(|err| AppError::Io(std::io::Error::other(err)))??;

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("result unavailable: {err}"),
    }

    match result.decision {
        Decision::Accept => println!(
            "Pre-approved: solvency score {} / 1000",
            result.solvency_score
        ),
        Decision::Reject => println!(
            "Declined: debt-to-income ratio {:.1}%",
            result.debt_to_income_ratio
        ),
    }

    Ok(())
}
