use calc_rs::credit::{
    AnnuityPayment, DAYS_PER_MONTH, DAYS_PER_YEAR, credit_annuity, credit_differentiated,
    differentiated_schedule,
};
use calc_rs::error::CreditError;
use calc_rs::assert_approx_eq;

#[test]
fn test_annuity_identities() {
    let cases = [
        (100_000.0, 12.0, 12.0),
        (250_000.0, 360.0, 4.5),
        (5_000.0, 6.0, 19.9),
        (1.0, 1.0, 0.01),
    ];
    for (principal, months, rate) in cases {
        let plan = credit_annuity(principal, months, rate).unwrap();
        println!("{} / {} / {}% => {:?}", principal, months, rate, plan);
        assert_eq!(plan.overpayment, plan.monthly_payment * months - principal);
        assert_eq!(plan.total_payment, principal + plan.overpayment);
        assert!(plan.overpayment > 0.0);
    }
}

#[test]
fn test_annuity_known_values() {
    let plan = credit_annuity(100_000.0, 12.0, 12.0).unwrap();
    assert_approx_eq!(plan.monthly_payment, 8884.878867834166, 1e-6);
    assert_approx_eq!(plan.overpayment, 6618.546414009988, 1e-5);

    // One month: principal plus a month of interest
    let plan = credit_annuity(1200.0, 1.0, 12.0).unwrap();
    assert_approx_eq!(plan.monthly_payment, 1212.0, 1e-9);
}

#[test]
fn test_differentiated_matches_schedule() {
    let schedule = differentiated_schedule(300_000.0, 24.0, 9.5).unwrap();
    let plan = credit_differentiated(300_000.0, 24.0, 9.5).unwrap();

    assert_eq!(schedule.len(), 24);
    assert_eq!(plan.first_payment, schedule[0].payment);
    assert_eq!(plan.last_payment, schedule[23].payment);
    let total: f64 = schedule.iter().map(|i| i.payment).sum();
    assert_eq!(plan.total_payment, total);
    assert_eq!(plan.overpayment, total - 300_000.0);
}

#[test]
fn test_differentiated_first_month_interest() {
    let schedule = differentiated_schedule(120_000.0, 12.0, 10.0).unwrap();
    let first = schedule[0];
    assert_approx_eq!(first.principal, 10_000.0);
    assert_approx_eq!(first.interest, 120_000.0 * 0.10 * DAYS_PER_MONTH / DAYS_PER_YEAR);
    assert_approx_eq!(first.balance, 110_000.0);
    assert!(schedule.last().unwrap().balance.abs() < 1e-6);
}

#[test]
fn test_differentiated_pays_more_interest_up_front() {
    let annuity = credit_annuity(100_000.0, 12.0, 12.0).unwrap();
    let plan = credit_differentiated(100_000.0, 12.0, 12.0).unwrap();
    assert!(plan.first_payment > annuity.monthly_payment);
    assert!(plan.last_payment < annuity.monthly_payment);
    assert!(plan.overpayment < annuity.overpayment);
}

#[test]
fn test_invalid_inputs() {
    let cases = [
        (0.0, 12.0, 5.0, "principal"),
        (-100.0, 12.0, 5.0, "principal"),
        (f64::NAN, 12.0, 5.0, "principal"),
        (1000.0, 0.0, 5.0, "months"),
        (1000.0, f64::INFINITY, 5.0, "months"),
        (1000.0, 12.0, 0.0, "rate"),
        (1000.0, 12.0, -3.0, "rate"),
    ];
    for (principal, months, rate, field) in cases {
        for result in [
            credit_annuity(principal, months, rate).map(|_| ()),
            credit_differentiated(principal, months, rate).map(|_| ()),
        ] {
            match result {
                Err(CreditError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected {} to be rejected, got {:?}", field, other),
            }
        }
    }
}

#[test]
fn test_results_serialize_to_json() {
    let plan = credit_annuity(100_000.0, 12.0, 12.0).unwrap();
    let json = serde_json::to_value(plan).unwrap();
    assert!(json.get("monthly_payment").is_some());
    assert!(json.get("overpayment").is_some());
    assert!(json.get("total_payment").is_some());

    let back: AnnuityPayment = serde_json::from_value(json).unwrap();
    assert_eq!(back, plan);

    let schedule = differentiated_schedule(1000.0, 2.0, 10.0).unwrap();
    let json = serde_json::to_string(&schedule).unwrap();
    assert!(json.starts_with("[{\"month\":1,"));
}
