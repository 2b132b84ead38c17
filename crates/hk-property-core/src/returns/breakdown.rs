use serde::{Deserialize, Serialize};

use crate::types::{Money, PaymentType};

/// Components of the upfront cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostComponent {
    PropertyPrice,
    DownPayment,
    StampDuty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    pub component: CostComponent,
    pub amount: Money,
}

/// Monthly income and outgoings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowComponent {
    RentalIncome,
    Expenses,
    ManagementFee,
    Rates,
    Mortgage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowLine {
    pub component: CashFlowComponent,
    pub amount: Money,
}

/// Upfront cost split into the buyer's equity and stamp duty.
pub fn cost_breakdown(
    payment_type: PaymentType,
    equity_outlay: Money,
    stamp_duty: Money,
) -> Vec<CostLine> {
    let equity = match payment_type {
        PaymentType::Cash => CostComponent::PropertyPrice,
        PaymentType::Mortgage => CostComponent::DownPayment,
    };
    vec![
        CostLine {
            component: equity,
            amount: equity_outlay,
        },
        CostLine {
            component: CostComponent::StampDuty,
            amount: stamp_duty,
        },
    ]
}

/// Monthly rent against each outgoing. The mortgage line only appears for
/// mortgage purchases.
pub fn cash_flow_breakdown(
    payment_type: PaymentType,
    monthly_rental: Money,
    monthly_expenses: Money,
    monthly_management_fee: Money,
    monthly_rates: Money,
    monthly_financing_payment: Money,
) -> Vec<CashFlowLine> {
    let mut lines = vec![
        CashFlowLine {
            component: CashFlowComponent::RentalIncome,
            amount: monthly_rental,
        },
        CashFlowLine {
            component: CashFlowComponent::Expenses,
            amount: monthly_expenses,
        },
        CashFlowLine {
            component: CashFlowComponent::ManagementFee,
            amount: monthly_management_fee,
        },
        CashFlowLine {
            component: CashFlowComponent::Rates,
            amount: monthly_rates,
        },
    ];
    if payment_type == PaymentType::Mortgage {
        lines.push(CashFlowLine {
            component: CashFlowComponent::Mortgage,
            amount: monthly_financing_payment,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cash_cost_breakdown() {
        let lines = cost_breakdown(PaymentType::Cash, dec!(5000000), dec!(112500));
        assert_eq!(lines[0].component, CostComponent::PropertyPrice);
        assert_eq!(lines[0].amount, dec!(5000000));
        assert_eq!(lines[1].component, CostComponent::StampDuty);
    }

    #[test]
    fn test_mortgage_cost_breakdown() {
        let lines = cost_breakdown(PaymentType::Mortgage, dec!(1500000), dec!(112500));
        assert_eq!(lines[0].component, CostComponent::DownPayment);
        assert_eq!(lines[0].amount, dec!(1500000));
    }

    #[test]
    fn test_cash_flow_breakdown_mortgage_line() {
        let cash = cash_flow_breakdown(
            PaymentType::Cash,
            dec!(15000),
            dec!(3000),
            dec!(2000),
            dec!(417),
            dec!(0),
        );
        let mortgage = cash_flow_breakdown(
            PaymentType::Mortgage,
            dec!(15000),
            dec!(3000),
            dec!(2000),
            dec!(417),
            dec!(15716),
        );
        assert_eq!(cash.len(), 4);
        assert_eq!(mortgage.len(), 5);
        assert_eq!(mortgage[4].component, CashFlowComponent::Mortgage);
        assert_eq!(mortgage[4].amount, dec!(15716));
    }
}
