/// On native: intercept messages using the `log` crate and print them to STDERR. The default
/// filter is `info`; override it with `RUST_LOG`.
pub fn setup() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use env_logger::{Builder, Env};
        Builder::from_env(Env::default().default_filter_or("info")).init();
    }
}
