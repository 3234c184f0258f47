use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};

pub const DEFAULT_INSTALL_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

pub fn with_retry<T, Operation>(label: &str, operation: Operation) -> Result<T>
where
    Operation: FnMut() -> Result<T>,
{
    with_retry_and_sleeper(
        label,
        DEFAULT_INSTALL_ATTEMPTS,
        DEFAULT_RETRY_DELAY,
        operation,
        thread::sleep,
    )
}

pub(crate) fn with_retry_and_sleeper<T, Operation, Sleep>(
    label: &str,
    max_attempts: u32,
    delay_between: Duration,
    mut operation: Operation,
    mut sleep: Sleep,
) -> Result<T>
where
    Operation: FnMut() -> Result<T>,
    Sleep: FnMut(Duration),
{
    let mut last_error = None;
    for attempt in 1..=max_attempts {
        match operation() {
            Ok(value) => return Ok(value),
            Err(err) => last_error = Some(err),
        }
        if attempt < max_attempts {
            sleep(delay_between);
        }
    }

    let detail = last_error
        .map(|err| format!(": {err}"))
        .unwrap_or_default();
    Err(anyhow!("{label} failed after {max_attempts} attempts{detail}"))
}
