//! Environment variable expansion for configuration files.
//!
//! Supported forms:
//!
//! - `${VAR}`: replaced with the value of VAR, an error if VAR is unset
//! - `${VAR:-default}`: uses "default" if VAR is unset or empty
//!
//! # Examples
//!
//! ```ignore
//! unsafe { std::env::set_var("DATA_DIR", "/srv/shipments") };
//! let text = expand_env_vars("input = \"${DATA_DIR}/today.csv\"")?;
//! assert_eq!(text, "input = \"/srv/shipments/today.csv\"");
//! ```

use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::debug;

const ENV_VAR_PATTERN: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}";

pub fn expand_env_vars(content: &str) -> Result<Cow<'_, str>> {
    if !content.contains("${") {
        return Ok(Cow::Borrowed(content));
    }

    let re = Regex::new(ENV_VAR_PATTERN).context("compile env var pattern")?;

    let mut result = String::with_capacity(content.len());
    let mut last_end = 0;

    for cap in re.captures_iter(content) {
        let (Some(full), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let var_name = name.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        result.push_str(&content[last_end..full.start()]);

        match (std::env::var(var_name).ok().filter(|v| !v.is_empty()), default_value) {
            (Some(value), _) => {
                debug!("Expanded env var ${{{}}}", var_name);
                result.push_str(&value);
            }
            (None, Some(default)) => {
                debug!("Env var ${{{}}} not set, using default: {}", var_name, default);
                result.push_str(default);
            }
            (None, None) => bail!(
                "Environment variable '{}' is not set and no default provided",
                var_name
            ),
        }

        last_end = full.end();
    }

    result.push_str(&content[last_end..]);
    Ok(Cow::Owned(result))
}
