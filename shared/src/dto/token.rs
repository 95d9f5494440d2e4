use serde::{Deserialize, Serialize};

/// Price block of an external token lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TokenPrice {
    #[serde(default)]
    pub value: Option<f64>,
}

/// Native-currency price block of an external token lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NativePrice {
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NativeBlock {
    #[serde(default)]
    pub price: Option<NativePrice>,
}

/// External token lookup result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExternalToken {
    #[serde(default)]
    pub price: Option<TokenPrice>,
    #[serde(default)]
    pub native: Option<NativeBlock>,
}

impl ExternalToken {
    /// `price.value`, falling back to `native.price.amount`; non-positive values are ignored.
    pub fn best_price(&self) -> Option<f64> {
        let listed = self.price.as_ref().and_then(|p| p.value);
        let native = self
            .native
            .as_ref()
            .and_then(|n| n.price.as_ref())
            .and_then(|p| p.amount);
        listed
            .filter(|v| *v > 0.0)
            .or(native.filter(|v| *v > 0.0))
    }
}
