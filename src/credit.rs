//! Loan repayment calculations.
//!
//! Two schemes are supported. An annuity loan is repaid in equal monthly
//! payments. A differentiated loan repays an equal share of the principal each
//! month plus interest on the balance still owed, so payments shrink over time.
//!
//! Inputs are the principal, the term in months and the annual interest rate in
//! percent. All three must be finite and strictly positive.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::CreditError;
use crate::functions::pow;

/// Average days per month used to prorate differentiated interest.
pub const DAYS_PER_MONTH: f64 = 30.4166666666667;
pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityPayment {
    pub monthly_payment: f64,
    /// Interest paid over the whole term.
    pub overpayment: f64,
    pub total_payment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferentiatedPayment {
    pub first_payment: f64,
    pub last_payment: f64,
    /// Interest paid over the whole term.
    pub overpayment: f64,
    pub total_payment: f64,
}

/// One month of a differentiated repayment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based month number.
    pub month: u64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Principal still owed after this payment.
    pub balance: f64,
}

fn validate(field: &'static str, value: f64) -> Result<f64, CreditError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CreditError::InvalidInput { field, value })
    }
}

fn validate_all(principal: f64, months: f64, rate: f64) -> Result<(), CreditError> {
    validate("principal", principal)?;
    validate("months", months)?;
    validate("rate", rate)?;
    Ok(())
}

fn finite(values: &[f64]) -> Result<(), CreditError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CreditError::NonFiniteResult)
    }
}

/// Equal monthly payments.
///
/// With monthly rate `r = rate / 12 / 100` and `n` months the payment is
/// `r * (1 + r)^n / ((1 + r)^n - 1) * principal`.
///
/// ```
/// use calc_rs::credit::credit_annuity;
///
/// let plan = credit_annuity(100_000.0, 12.0, 12.0).unwrap();
/// assert!((plan.monthly_payment - 8884.88).abs() < 0.01);
/// assert_eq!(plan.total_payment, 100_000.0 + plan.overpayment);
/// ```
pub fn credit_annuity(
    principal: f64,
    months: f64,
    annual_rate_percent: f64,
) -> Result<AnnuityPayment, CreditError> {
    validate_all(principal, months, annual_rate_percent)?;

    let r = annual_rate_percent / 12.0 / 100.0;
    let growth = pow(1.0 + r, months);
    let monthly_payment = r * growth / (growth - 1.0) * principal;
    let overpayment = monthly_payment * months - principal;
    let total_payment = overpayment + principal;

    finite(&[monthly_payment, overpayment, total_payment])?;
    Ok(AnnuityPayment {
        monthly_payment,
        overpayment,
        total_payment,
    })
}

/// Walks a differentiated loan one month at a time.
///
/// A fractional term is rounded up to whole months: the last month still
/// repays a full share, leaving a negative balance.
struct Installments {
    rate: f64,
    share: f64,
    balance: f64,
    months: f64,
    month: u64,
}

impl Installments {
    fn new(principal: f64, months: f64, annual_rate_percent: f64) -> Self {
        Self {
            rate: annual_rate_percent / 100.0,
            share: principal / months,
            balance: principal,
            months,
            month: 0,
        }
    }
}

impl Iterator for Installments {
    type Item = Result<Installment, CreditError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.month as f64 >= self.months {
            return None;
        }

        let interest = self.balance * self.rate * DAYS_PER_MONTH / DAYS_PER_YEAR;
        let payment = interest + self.share;
        self.balance -= self.share;
        self.month += 1;

        Some(finite(&[payment, self.balance]).map(|()| Installment {
            month: self.month,
            payment,
            interest,
            principal: self.share,
            balance: self.balance,
        }))
    }
}

/// Month-by-month breakdown of a differentiated loan.
///
/// Each month repays `principal / months` and pays interest of
/// `balance * rate / 100 * DAYS_PER_MONTH / DAYS_PER_YEAR` on the balance owed at
/// the start of that month. A fractional term is rounded up to whole months: the
/// last month still repays a full share, leaving a negative balance.
///
/// The schedule holds one entry per month. Use [`credit_differentiated`] when
/// only the totals are needed.
pub fn differentiated_schedule(
    principal: f64,
    months: f64,
    annual_rate_percent: f64,
) -> Result<Vec<Installment>, CreditError> {
    validate_all(principal, months, annual_rate_percent)?;
    Installments::new(principal, months, annual_rate_percent).collect()
}

/// Equal principal shares with interest on the declining balance.
///
/// Runs in constant memory whatever the term. The totals are summed month by
/// month in the same order as [`differentiated_schedule`], so they match the
/// sum of its payments exactly.
pub fn credit_differentiated(
    principal: f64,
    months: f64,
    annual_rate_percent: f64,
) -> Result<DifferentiatedPayment, CreditError> {
    validate_all(principal, months, annual_rate_percent)?;

    let mut first_payment = None;
    let mut last_payment = 0.0;
    let mut total_payment = 0.0;
    for installment in Installments::new(principal, months, annual_rate_percent) {
        let installment = installment?;
        first_payment.get_or_insert(installment.payment);
        last_payment = installment.payment;
        total_payment += installment.payment;
    }

    // A positive term always yields at least one month.
    let first_payment = first_payment.ok_or(CreditError::NonFiniteResult)?;
    let overpayment = total_payment - principal;

    finite(&[total_payment, overpayment])?;
    Ok(DifferentiatedPayment {
        first_payment,
        last_payment,
        overpayment,
        total_payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annuity_reference_loan() {
        let plan = credit_annuity(100_000.0, 12.0, 12.0).unwrap();
        assert!((plan.monthly_payment - 8884.88).abs() < 0.01);
        assert_eq!(plan.overpayment, plan.monthly_payment * 12.0 - 100_000.0);
        assert_eq!(plan.total_payment, plan.overpayment + 100_000.0);
    }

    #[test]
    fn test_differentiated_reference_loan() {
        let plan = credit_differentiated(100_000.0, 12.0, 12.0).unwrap();
        assert!((plan.first_payment - 9333.33).abs() < 0.01);
        assert!((plan.last_payment - 8416.67).abs() < 0.01);
        assert!((plan.overpayment - 6500.0).abs() < 0.01);
        assert!((plan.total_payment - 106_500.0).abs() < 0.01);
    }

    #[test]
    fn test_schedule_shape() {
        let schedule = differentiated_schedule(1200.0, 12.0, 10.0).unwrap();
        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].month, 1);
        assert_eq!(schedule[11].month, 12);
        assert!(schedule.iter().all(|i| i.principal == 100.0));
        assert!(schedule.windows(2).all(|w| w[1].payment < w[0].payment));
        assert!(schedule[11].balance.abs() < 1e-9);
    }

    #[test]
    fn test_fractional_term_rounds_up() {
        let schedule = differentiated_schedule(1000.0, 2.5, 10.0).unwrap();
        assert_eq!(schedule.len(), 3);
        assert!(schedule[2].balance < 0.0);
    }

    #[test]
    fn test_long_term_runs_without_a_schedule() {
        let months = 1e8;
        let plan = credit_differentiated(1000.0, months, 5.0).unwrap();
        assert!(plan.first_payment > plan.last_payment);
        assert!((plan.last_payment - 1000.0 / months).abs() < 1e-6);
        assert!(plan.overpayment > 0.0);
        assert_eq!(plan.total_payment, plan.overpayment + 1000.0);
    }

    #[test]
    fn test_term_beyond_u32_is_not_an_overflow() {
        let mut months = Installments {
            month: u32::MAX as u64,
            ..Installments::new(1.0, 5e9, 1.0)
        };
        let installment = months.next().unwrap().unwrap();
        assert_eq!(installment.month, u32::MAX as u64 + 1);
    }

    #[test]
    fn test_rejects_non_positive_input() {
        assert_eq!(
            credit_annuity(0.0, 12.0, 5.0),
            Err(CreditError::InvalidInput { field: "principal", value: 0.0 })
        );
        assert_eq!(
            credit_annuity(1000.0, -1.0, 5.0),
            Err(CreditError::InvalidInput { field: "months", value: -1.0 })
        );
        assert_eq!(
            credit_differentiated(1000.0, 12.0, 0.0),
            Err(CreditError::InvalidInput { field: "rate", value: 0.0 })
        );
        assert!(matches!(
            differentiated_schedule(f64::INFINITY, 12.0, 5.0),
            Err(CreditError::InvalidInput { field: "principal", .. })
        ));
    }

    #[test]
    fn test_non_finite_result() {
        assert_eq!(
            credit_annuity(f64::MAX, 12.0, 12.0),
            Err(CreditError::NonFiniteResult)
        );
        assert_eq!(
            credit_annuity(1000.0, 1e6, 1000.0),
            Err(CreditError::NonFiniteResult)
        );
    }
}
