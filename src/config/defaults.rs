use super::mode::Mode;

const DEV_DEFAULTS: &str = "NODE_ENV=dev\nPORT=60000\nOSSURL=http://127.0.0.1:60000/";
const PROD_DEFAULTS: &str = "NODE_ENV=prod\nPORT=60000\nOSSURL=http://127.0.0.1:60000/";

/// Content written when a mode's env file does not exist yet.
///
/// Modes without registered defaults get the production defaults.
pub fn default_content(mode: &Mode) -> &'static str {
    match mode {
        Mode::Development => DEV_DEFAULTS,
        Mode::Production | Mode::Custom(_) => PROD_DEFAULTS,
    }
}
