use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::{LoadArgs, OutputFormat};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use lmpdeck::core::io::lammps::Strictness;
use lmpdeck::engine::config::LoadConfigBuilder;

pub fn build_config(args: &LoadArgs, format: Option<OutputFormat>) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let file_config = apply_set_values(file_config, &args.set_values)?;

    let strictness = match (args.strictness.strict, args.strictness.lenient) {
        (true, false) => Strictness::Strict,
        (false, true) => Strictness::Lenient,
        _ => file_config
            .parser
            .and_then(|p| p.strictness)
            .unwrap_or(defaults.strictness),
    };

    let consistency_checks = if args.no_checks {
        false
    } else {
        file_config
            .validation
            .and_then(|v| v.consistency_checks)
            .unwrap_or(defaults.consistency_checks)
    };

    let output_format = format
        .or(file_config.output.and_then(|o| o.format))
        .unwrap_or(defaults.output_format);

    let load = LoadConfigBuilder::new()
        .strictness(strictness)
        .consistency_checks(consistency_checks)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        load,
        output_format,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "parser.strictness" => {
                config
                    .parser
                    .get_or_insert_with(Default::default)
                    .strictness = Some(value_str.parse().map_err(|e| {
                    CliError::Config(format!("Invalid value for {}: {}", key, e))
                })?);
            }
            "validation.consistency-checks" => {
                config
                    .validation
                    .get_or_insert_with(Default::default)
                    .consistency_checks = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
                })?);
            }
            "output.format" => {
                config.output.get_or_insert_with(Default::default).format =
                    Some(OutputFormat::from_str(value_str, true).map_err(|_| {
                        CliError::Config(format!(
                            "Invalid output format for {}: {} (expected summary, toml or script)",
                            key, value_str
                        ))
                    })?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StrictnessFlags;
    use std::fs;
    use tempfile::tempdir;

    fn write_settings(text: &str) -> (tempfile::TempDir, LoadArgs) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deck.toml");
        fs::write(&path, text).unwrap();
        let args = LoadArgs {
            config: Some(path),
            ..Default::default()
        };
        (dir, args)
    }

    #[test]
    fn defaults_apply_without_a_settings_file() {
        let app = build_config(&LoadArgs::default(), None).unwrap();
        assert_eq!(app.load.strictness, Strictness::Strict);
        assert!(app.load.consistency_checks);
        assert_eq!(app.output_format, OutputFormat::Summary);
    }

    #[test]
    fn settings_file_values_are_read() {
        let (_dir, args) = write_settings(
            r#"
            [parser]
            strictness = "lenient"

            [validation]
            consistency-checks = false

            [output]
            format = "toml"
            "#,
        );
        let app = build_config(&args, None).unwrap();
        assert_eq!(app.load.strictness, Strictness::Lenient);
        assert!(!app.load.consistency_checks);
        assert_eq!(app.output_format, OutputFormat::Toml);
    }

    #[test]
    fn unknown_settings_keys_are_rejected() {
        let (_dir, args) = write_settings("[parser]\nmode = \"lenient\"\n");
        let err = build_config(&args, None).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn set_values_override_the_file() {
        let (_dir, mut args) = write_settings("[parser]\nstrictness = \"lenient\"\n");
        args.set_values = vec![
            "parser.strictness=strict".into(),
            "output.format=script".into(),
        ];
        let app = build_config(&args, None).unwrap();
        assert_eq!(app.load.strictness, Strictness::Strict);
        assert_eq!(app.output_format, OutputFormat::Script);
    }

    #[test]
    fn explicit_flags_override_set_values() {
        let args = LoadArgs {
            strictness: StrictnessFlags {
                strict: false,
                lenient: true,
            },
            no_checks: true,
            set_values: vec![
                "parser.strictness=strict".into(),
                "validation.consistency-checks=true".into(),
                "output.format=script".into(),
            ],
            ..Default::default()
        };
        let app = build_config(&args, Some(OutputFormat::Toml)).unwrap();
        assert_eq!(app.load.strictness, Strictness::Lenient);
        assert!(!app.load.consistency_checks);
        assert_eq!(app.output_format, OutputFormat::Toml);
    }

    #[test]
    fn malformed_set_values_are_reported() {
        for bad in ["parser.strictness", "parser.strictness=loose", "nope=1", "validation.consistency-checks=maybe"] {
            let args = LoadArgs {
                set_values: vec![bad.into()],
                ..Default::default()
            };
            assert!(
                matches!(build_config(&args, None), Err(CliError::Config(_))),
                "{bad} should be rejected"
            );
        }
    }
}
