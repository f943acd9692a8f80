mod locale;

pub use locale::{localized_name, FALLBACK_LANGUAGE};
