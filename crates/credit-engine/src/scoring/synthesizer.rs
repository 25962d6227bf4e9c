use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::calibration::DirectionMap;
use super::domain::{AffordabilityMetrics, ApplicationFacts, FeatureVector, FEATURE_COUNT, SALIENT_INDICES};

/// Annual nominal interest rate applied to every simulated installment.
pub const INTEREST_RATE: f64 = 0.039;
/// Annual insurance premium rate, applied only when the insurance flag is set.
pub const INSURANCE_RATE: f64 = 0.009;

/// Floor on the financed amount; prevents degenerate installments when the
/// down payment covers the whole loan.
const FINANCED_AMOUNT_FLOOR: f64 = 1_000.0;

/// Distinct prime multipliers combining the rounded facts into the base
/// vector seed. Changing any single field changes the seed.
const LOAN_AMOUNT_WEIGHT: u64 = 769;
const DOWN_PAYMENT_WEIGHT: u64 = 7_681;
const TERM_MONTHS_WEIGHT: u64 = 12_289;
const INSURANCE_WEIGHT: u64 = 40_961;
const MONTHLY_INCOME_WEIGHT: u64 = 65_537;
const MONTHLY_CHARGES_WEIGHT: u64 = 786_433;
const OTHER_CREDITS_WEIGHT: u64 = 5_767_169;

const AMPLITUDE_BASE: f64 = 2.0;
const AMPLITUDE_SPAN: f64 = 4.0;
const LOW_RISK_CUTOFF: f64 = 0.25;
const HIGH_RISK_CUTOFF: f64 = 0.75;
const NUDGE_FACTOR: f64 = 0.35;

/// Derive the installment, obligation, and income metrics from the facts.
/// Pure arithmetic; the debt-to-income ratio saturates at 100 when no income
/// is declared.
pub fn affordability(facts: &ApplicationFacts) -> AffordabilityMetrics {
    let financed_amount = (facts.loan_amount - facts.down_payment).max(FINANCED_AMOUNT_FLOOR);
    let term = f64::from(facts.term_months.max(1));

    let mut annual_rate = INTEREST_RATE;
    if facts.insurance {
        annual_rate += INSURANCE_RATE;
    }
    let monthly_installment = financed_amount / term * (1.0 + annual_rate / 12.0 * term);

    let total_monthly_obligations =
        facts.monthly_charges + facts.other_credit_payments + monthly_installment;

    let debt_to_income_ratio = if facts.monthly_income > 0.0 {
        total_monthly_obligations / facts.monthly_income * 100.0
    } else {
        100.0
    };

    AffordabilityMetrics {
        financed_amount,
        monthly_installment,
        total_monthly_obligations,
        debt_to_income_ratio,
        disposable_income: facts.monthly_income - total_monthly_obligations,
    }
}

/// Business risk assessment in [0, 1], averaging the debt-to-income band and
/// the disposable-income band.
pub fn risk_score(metrics: &AffordabilityMetrics) -> f64 {
    let ratio_band: f64 = if metrics.debt_to_income_ratio <= 33.0 {
        0.0
    } else if metrics.debt_to_income_ratio <= 45.0 {
        0.5
    } else {
        1.0
    };

    let disposable_band = if metrics.disposable_income < 600.0 {
        1.0
    } else if metrics.disposable_income < 1_200.0 {
        0.5
    } else {
        0.0
    };

    ((ratio_band + disposable_band) / 2.0).clamp(0.0, 1.0)
}

fn feature_seed(facts: &ApplicationFacts) -> u64 {
    let rounded = |value: f64| value.round().max(0.0) as u64;

    let components = [
        (rounded(facts.loan_amount), LOAN_AMOUNT_WEIGHT),
        (rounded(facts.down_payment), DOWN_PAYMENT_WEIGHT),
        (u64::from(facts.term_months), TERM_MONTHS_WEIGHT),
        (u64::from(facts.insurance), INSURANCE_WEIGHT),
        (rounded(facts.monthly_income), MONTHLY_INCOME_WEIGHT),
        (rounded(facts.monthly_charges), MONTHLY_CHARGES_WEIGHT),
        (rounded(facts.other_credit_payments), OTHER_CREDITS_WEIGHT),
    ];

    components.iter().fold(0u64, |seed, (value, weight)| {
        seed.wrapping_add(value.wrapping_mul(*weight))
    })
}

/// Box-Muller standard normal draw. Two uniform draws per sample, in index
/// order, so a given seed always reproduces the same sequence.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * std::f64::consts::PI * u2;
    r * theta.cos()
}

/// Build the synthetic feature vector for the facts.
///
/// The 190 non-salient positions are seeded noise; the salient positions are
/// shifted along their calibrated directions so the oracle's prediction
/// tracks the business risk assessment.
pub fn synthesize(
    facts: &ApplicationFacts,
    directions: &DirectionMap,
) -> (FeatureVector, AffordabilityMetrics) {
    let metrics = affordability(facts);
    let risk = risk_score(&metrics);

    let mut rng = StdRng::seed_from_u64(feature_seed(facts));
    let mut values = Vec::with_capacity(FEATURE_COUNT);
    for _ in 0..FEATURE_COUNT {
        values.push(standard_normal(&mut rng));
    }
    let mut features = FeatureVector::new(values);

    let amplitude = AMPLITUDE_BASE + AMPLITUDE_SPAN * risk;
    for &index in &SALIENT_INDICES {
        let Some(sign) = directions.sign(index) else {
            continue;
        };
        let sign = f64::from(sign);
        let shift = if risk <= LOW_RISK_CUTOFF {
            -sign * amplitude
        } else if risk >= HIGH_RISK_CUTOFF {
            sign * amplitude
        } else {
            sign * amplitude * NUDGE_FACTOR
        };
        features.values_mut()[index] += shift;
    }

    (features, metrics)
}
