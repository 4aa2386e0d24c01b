// Build metadata baked in from Cargo.toml

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name; reported by GET /version.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Plain-text greeting served on GET /.
pub fn banner() -> String {
    format!("{} {}: pipeline telemetry simulator", NAME, VERSION)
}
