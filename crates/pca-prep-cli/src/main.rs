use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use pca_prep::Correction;
use pca_prep_cli::commands;
use pca_prep_cli::config::{correction_from_matches, resolve_cov_mat_config, CliOverrides};

fn correction_arg() -> Arg {
    Arg::new("correction")
        .long("correction")
        .help("Divisor for averaging: n (population) or n - 1 (sample).")
        .value_parser(["population", "sample"])
        .value_hint(ValueHint::Other)
}

fn data_arg(help: &'static str) -> Arg {
    Arg::new("data")
        .short('d')
        .long("data")
        .help(help)
        .required(true)
        .value_parser(clap::builder::NonEmptyStringValueParser::new())
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("PCA_PREP_LOG", "error,pca_prep=info"))
        .init();

    let matches = Command::new("pca-prep")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("Mean-centering, variance and covariance statistics for PCA preprocessing")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("demo").about("Print worked example computations"))
        .subcommand(
            Command::new("center")
                .about("Mean-center every dimension of a dataset")
                .arg(data_arg("Dataset as a JSON array of numeric arrays, e.g. '[[1,2,3],[4,5,6]]'")),
        )
        .subcommand(
            Command::new("variance")
                .about("Variance of a single dimension")
                .arg(data_arg("Dimension as a JSON numeric array, e.g. '[1,2,3]'"))
                .arg(correction_arg()),
        )
        .subcommand(
            Command::new("covariance")
                .about("Covariance of two equal-length dimensions")
                .arg(
                    Arg::new("x")
                        .long("x")
                        .help("First dimension as a JSON numeric array")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("y")
                        .long("y")
                        .help("Second dimension as a JSON numeric array")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(correction_arg()),
        )
        .subcommand(
            Command::new("cov-mat")
                .about("Covariance matrix of a dataset")
                .arg(data_arg("Dataset as a JSON array of equal-length numeric arrays"))
                .arg(
                    Arg::new("config")
                        .help("Path to a JSON covariance matrix configuration file")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("rounded")
                        .long("rounded")
                        .help("Round every cell. Overrides the configuration file.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("digits")
                        .long("digits")
                        .help("Decimal places used with --rounded. Overrides the configuration file.")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(correction_arg())
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .help("Compute matrix rows on the rayon thread pool.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let output = match matches.subcommand() {
        Some(("demo", _)) => commands::demo(),
        Some(("center", sub_m)) => commands::center(required(sub_m, "data")),
        Some(("variance", sub_m)) => parse_correction(sub_m)
            .and_then(|correction| commands::variance(required(sub_m, "data"), correction)),
        Some(("covariance", sub_m)) => parse_correction(sub_m).and_then(|correction| {
            commands::covariance(required(sub_m, "x"), required(sub_m, "y"), correction)
        }),
        Some(("cov-mat", sub_m)) => handle_cov_mat(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    match output {
        Ok(text) => {
            println!("{}", text.trim_end());
            Ok(())
        }
        Err(e) => {
            log::error!("Command failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

fn parse_correction(matches: &ArgMatches) -> Result<Correction> {
    Ok(correction_from_matches(matches)?.unwrap_or_default())
}

fn handle_cov_mat(matches: &ArgMatches) -> Result<String> {
    let config_path: Option<&PathBuf> = matches.get_one("config");
    if let Some(path) = config_path {
        log::info!("[pca-prep] Using covariance matrix config: {:?}", path);
    }
    let overrides = CliOverrides::from_matches(matches)?;
    let config = resolve_cov_mat_config(config_path, &overrides)?;
    commands::cov_mat(required(matches, "data"), &config)
}
