//! Pure per-field extraction rules.
//!
//! Each extractor is independent and stateless: required fields return an
//! explicit `Result`, defaulted fields return a [`Detected`] value carrying
//! whether an explicit phrase produced it (the confidence score needs that
//! distinction).

pub mod amount;
pub mod autopay;
pub mod currency;
pub mod installment;
pub mod late_fee;
pub mod patterns;

pub use amount::extract_amount;
pub use autopay::detect_autopay;
pub use currency::detect_currency;
pub use installment::extract_installment;
pub use late_fee::extract_late_fee;

/// A defaulted field value plus whether an explicit phrase matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detected<T> {
    pub value: T,
    pub explicit: bool,
}

impl<T> Detected<T> {
    pub fn explicit(value: T) -> Self {
        Self {
            value,
            explicit: true,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            explicit: false,
        }
    }
}
