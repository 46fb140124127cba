use thiserror::Error;

/// Failures while constructing or validating the service catalog.
///
/// These are fail-fast errors: a process that cannot assemble a coherent
/// catalog must not start quoting.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("bundle `{bundle}`: savings {savings} does not equal alacarte {alacarte} minus bundle price {bundle_price}")]
    BundleSavingsMismatch {
        bundle: String,
        bundle_price: rust_decimal::Decimal,
        alacarte: rust_decimal::Decimal,
        savings: rust_decimal::Decimal,
    },
    #[error("bundle `{bundle}` references unknown service `{service}`")]
    UnknownBundleService { bundle: String, service: String },
    #[error("discount table `{table}` is malformed: {reason}")]
    MalformedDiscountTable { table: String, reason: String },
    #[error("duplicate service id `{0}`")]
    DuplicateService(String),
}

/// Failures inside a single pricing attempt.
///
/// These never escape the public API surface: `PricingService` converts them
/// into quote-shaped error values so transports always receive structured
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Pricing calculation not available for {0}")]
    UnknownService(String),
    #[error("selections for `{service}` could not be interpreted: {reason}")]
    InvalidSelections { service: String, reason: String },
    #[error("no price row for `{service}` key `{key}`")]
    MissingRow { service: String, key: String },
}
