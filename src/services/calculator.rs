// src/services/calculator.rs
use crate::models::{
    CalculationMode, CalculationReport, CalculatorInput, CurrentReport, InputField,
    InvalidNumericInput, ModeInput, Purchase, TargetReport, ValidatedInput,
};

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses the three always-required fields first and only then the field the active
/// mode needs. The inactive mode's field is never looked at.
pub fn validate(input: &CalculatorInput) -> Result<ValidatedInput, InvalidNumericInput> {
    let required = (
        parse_finite(&input.investment),
        parse_finite(&input.buy_price),
        parse_finite(&input.broker_commission),
    );
    let (investment_amount, buy_price, broker_commission_percent) = match required {
        (Some(investment), Some(buy_price), Some(commission)) => (investment, buy_price, commission),
        _ => return Err(InvalidNumericInput::required_fields()),
    };

    let mode = match input.mode {
        CalculationMode::Current => ModeInput::Current {
            current_price: parse_finite(&input.current_price)
                .ok_or_else(|| InvalidNumericInput::field(InputField::CurrentPrice))?,
        },
        CalculationMode::Target => ModeInput::Target {
            target_profit_percent: parse_finite(&input.target_profit)
                .ok_or_else(|| InvalidNumericInput::field(InputField::TargetProfit))?,
        },
    };

    Ok(ValidatedInput {
        investment_amount,
        buy_price,
        broker_commission_percent,
        mode,
    })
}

/// Buy leg: commission is taken out of the investment before converting to BTC.
/// A zero buy price is not guarded and yields a non-finite amount.
pub fn purchase(investment_amount: f64, buy_price: f64, broker_commission_percent: f64) -> Purchase {
    let commission_rate = broker_commission_percent / 100.0;
    let buy_commission = investment_amount * commission_rate;
    let effective_investment = investment_amount - buy_commission;
    let bitcoin_amount = effective_investment / buy_price;

    Purchase {
        commission_rate,
        buy_commission,
        effective_investment,
        bitcoin_amount,
    }
}

/// Value of the position if sold at `current_price`, net of the sell commission.
pub fn current_report(investment_amount: f64, purchase: Purchase, current_price: f64) -> CurrentReport {
    let current_value_gross = purchase.bitcoin_amount * current_price;
    let sell_commission = current_value_gross * purchase.commission_rate;
    let current_value_net = current_value_gross - sell_commission;
    let profit = current_value_net - investment_amount;
    let profit_percent = (profit / investment_amount) * 100.0;

    CurrentReport {
        purchase,
        current_value_gross,
        sell_commission,
        current_value_net,
        profit,
        profit_percent,
    }
}

/// Sell price needed to net the target profit. The buy commission is added back into the
/// net figure and the gross is grossed up by `1 / (1 - rate)` to cover the sell commission.
pub fn target_report(investment_amount: f64, purchase: Purchase, target_profit_percent: f64) -> TargetReport {
    let required_profit = investment_amount * (target_profit_percent / 100.0);
    let total_required_net = investment_amount + required_profit + purchase.buy_commission;
    let gross_required = total_required_net / (1.0 - purchase.commission_rate);
    let target_sell_price = gross_required / purchase.bitcoin_amount;
    let sell_commission = gross_required * purchase.commission_rate;

    TargetReport {
        purchase,
        target_profit_percent,
        required_profit,
        total_required_net,
        gross_required,
        target_sell_price,
        sell_commission,
    }
}

pub fn calculate(input: &ValidatedInput) -> CalculationReport {
    let purchase = purchase(
        input.investment_amount,
        input.buy_price,
        input.broker_commission_percent,
    );

    match input.mode {
        ModeInput::Current { current_price } => {
            CalculationReport::Current(current_report(input.investment_amount, purchase, current_price))
        }
        ModeInput::Target { target_profit_percent } => {
            CalculationReport::Target(target_report(input.investment_amount, purchase, target_profit_percent))
        }
    }
}

/// Validate-and-compute in one step, as triggered by the Calculate action.
pub fn run(input: &CalculatorInput) -> Result<CalculationReport, InvalidNumericInput> {
    validate(input).map(|validated| calculate(&validated))
}
