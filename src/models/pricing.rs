use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Price lookup result for one product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub product_code: String,
    pub price: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub discount_type: String,
    pub net_available: Option<Decimal>,
}

/// `get_prices` hands back a bare quote for a single input row and a list
/// otherwise (including zero rows).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PricingOutcome {
    Single(PriceQuote),
    List(Vec<PriceQuote>),
}

impl PricingOutcome {
    pub fn from_quotes(mut quotes: Vec<PriceQuote>) -> Self {
        if quotes.len() == 1 {
            if let Some(quote) = quotes.pop() {
                return PricingOutcome::Single(quote);
            }
        }
        PricingOutcome::List(quotes)
    }

    pub fn into_vec(self) -> Vec<PriceQuote> {
        match self {
            PricingOutcome::Single(quote) => vec![quote],
            PricingOutcome::List(quotes) => quotes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PricingOutcome::Single(_) => 1,
            PricingOutcome::List(quotes) => quotes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Site defaults substituted into a pricing call when the caller leaves the
/// customer, ship-to or warehouse blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingDefaults {
    pub customer_number: Option<String>,
    pub ship_to: Option<String>,
    pub warehouse: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(code: &str) -> PriceQuote {
        PriceQuote {
            product_code: code.to_string(),
            price: Some(dec!(10.50)),
            discount_amount: None,
            discount_type: String::new(),
            net_available: Some(dec!(4)),
        }
    }

    #[test]
    fn test_single_quote_is_bare() {
        let outcome = PricingOutcome::from_quotes(vec![quote("A1")]);
        assert_eq!(outcome, PricingOutcome::Single(quote("A1")));
        assert_eq!(outcome.len(), 1);
    }

    #[test]
    fn test_multiple_and_zero_quotes_are_lists() {
        let outcome = PricingOutcome::from_quotes(vec![quote("A1"), quote("A2")]);
        assert!(matches!(outcome, PricingOutcome::List(ref q) if q.len() == 2));

        let empty = PricingOutcome::from_quotes(vec![]);
        assert!(empty.is_empty());
        assert!(matches!(empty, PricingOutcome::List(_)));
    }

    #[test]
    fn test_untagged_serialization() {
        let single = serde_json::to_value(PricingOutcome::Single(quote("A1"))).unwrap();
        assert!(single.is_object());
        assert_eq!(single["product_code"], "A1");

        let list = serde_json::to_value(PricingOutcome::List(vec![quote("A1")])).unwrap();
        assert!(list.is_array());
    }
}
