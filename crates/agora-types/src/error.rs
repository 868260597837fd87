use thiserror::Error;

/// Errors that can occur in type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Invalid address length: expected 20, got {0}")]
    InvalidAddressLength(usize),

    #[error("Amount overflow")]
    AmountOverflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid decimal amount: {0}")]
    InvalidAmountString(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::InvalidHex(e.to_string())
    }
}

impl From<std::num::ParseIntError> for TypesError {
    fn from(e: std::num::ParseIntError) -> Self {
        TypesError::InvalidAmountString(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TypesError::InvalidAddressLength(4);
        assert!(err.to_string().contains("got 4"));
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: TypesError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, TypesError::InvalidHex(_)));
    }
}
