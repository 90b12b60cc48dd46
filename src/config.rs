
use crate::error::{Error, Result};
use std::{env, sync::OnceLock};

const DEFAULT_OUTPUT: &str = "inst.bin";
const DEFAULT_LOG: &str = "warn";

pub fn config() -> &'static Config {
    static INSTANCE: OnceLock<Config> = OnceLock::new();

    INSTANCE.get_or_init(|| {
        Config::load_from_env().unwrap_or_else(|e| {
            panic!("FATAL - UNABLE TO LOAD CONFIG - Cause: {e:?}")
        })
    })
}

#[allow(non_snake_case)]
#[derive(Debug)]
pub struct Config {
    pub OUTPUT_PATH: String,
    pub LOG_FILTER: String,
}

impl Config {
    fn load_from_env() -> Result<Config> {
        Ok(Config {
            OUTPUT_PATH: get_env_or("BAGER_OUTPUT", DEFAULT_OUTPUT)?,
            LOG_FILTER: get_env_or("BAGER_LOG", DEFAULT_LOG)?,
        })
    }
}

/// Unset falls back to `default`; set but not unicode is an error.
fn get_env_or(name: &'static str, default: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) | Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(env::VarError::NotUnicode(_)) => Err(Error::ConfigInvalidEnv(name)),
    }
}
