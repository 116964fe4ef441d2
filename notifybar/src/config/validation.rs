//! Setting value validation.

use notify_render::Template;
use notify_render::formatter::is_valid_time_format;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "NOTIFYBAR_VIEWPORT_WIDTH" | "NOTIFYBAR_SHIFT_AMOUNT" => validate_int_range(value, 1, 1000)?,
        "NOTIFYBAR_SHIFT_STRIDE" => validate_int_range(value, 1, 100)?,
        "NOTIFYBAR_DEFAULT_TIMEOUT_MS" => validate_int_range(value, 0, 86_400_000)?,
        "NOTIFYBAR_DOUBLE_ON_LONG_BODY" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        "NOTIFYBAR_TIME_FORMAT" => {
            if !is_valid_time_format(value) {
                return Err("invalid strftime pattern".into());
            }
        }
        "NOTIFYBAR_FORMAT" => {
            Template::parse(value).map_err(|e| e.to_string())?;
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
