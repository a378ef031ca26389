use anyhow::{Context, Result, bail};
use prize_wheel_engine::{OptionStore, PrizeOption, WheelConfig};
use std::path::Path;

/// Parse `label=weight` pairs separated by commas into an ordered option list.
///
/// Ids are assigned from 1 in the order given. A bare label gets weight 0.
pub fn parse_option_list(list: &str) -> Result<Vec<PrizeOption>> {
    let mut options = Vec::new();
    for (token, id) in list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .zip(1u32..)
    {
        let (label, weight) = match token.rsplit_once('=') {
            Some((label, raw)) => {
                let raw = raw.trim();
                let weight = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|weight| weight.is_finite())
                    .with_context(|| format!("option '{token}' has a non-numeric weight '{raw}'"))?;
                (label.trim(), weight)
            }
            None => (token, 0.0),
        };
        if label.is_empty() {
            bail!("option '{token}' is missing a label");
        }
        options.push(PrizeOption::new(id, label, weight));
    }
    Ok(options)
}

/// Load a JSON wheel config from disk, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<WheelConfig> {
    let Some(path) = path else {
        return Ok(WheelConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    WheelConfig::from_json_str(&raw)
        .with_context(|| format!("invalid config in {}", path.display()))
}

/// Assemble the store the simulation spins against.
pub fn build_store(options: Option<&str>, config: WheelConfig, even: bool) -> Result<OptionStore> {
    let list = match options {
        Some(list) => parse_option_list(list)?,
        None => OptionStore::default_options(),
    };
    let mut store = OptionStore::new(list, config).context("option list rejected")?;
    if even {
        store.even_distribute();
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_weights_in_order() {
        let options = parse_option_list("Mug=60, Hat = 40 ,Try Again").unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0], PrizeOption::new(1, "Mug", 60.0));
        assert_eq!(options[1], PrizeOption::new(2, "Hat", 40.0));
        assert_eq!(options[2], PrizeOption::new(3, "Try Again", 0.0));
    }

    #[test]
    fn labels_may_contain_equals_signs() {
        let options = parse_option_list("a=b=25,c=75").unwrap();
        assert_eq!(options[0].text, "a=b");
        assert!((options[0].probability - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_numeric_weight() {
        let err = parse_option_list("Mug=lots,Hat=40").unwrap_err();
        assert!(err.to_string().contains("non-numeric"));
    }

    #[test]
    fn rejects_missing_label() {
        assert!(parse_option_list("=50,Hat=50").is_err());
    }

    #[test]
    fn build_store_defaults_to_stock_wheel() {
        let store = build_store(None, WheelConfig::default(), false).unwrap();
        assert_eq!(store.len(), 5);
        assert!(store.is_valid_total());
    }

    #[test]
    fn build_store_can_even_out_weights() {
        let store = build_store(Some("a,b,c"), WheelConfig::default(), true).unwrap();
        assert!(store.is_valid_total());
    }

    #[test]
    fn build_store_rejects_single_option() {
        assert!(build_store(Some("solo=100"), WheelConfig::default(), false).is_err());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), WheelConfig::default());
        assert!(load_config(Some(Path::new("/nonexistent/wheel.json"))).is_err());
    }
}
