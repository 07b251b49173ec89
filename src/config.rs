use crate::constants::{
    DEFAULT_COLORS_FILE, DEFAULT_PROGRAM, DEFAULT_PROGRAM_ARGS, USER_CONFIG_PATH, VERSION,
};
use crate::discover::default_extensions;
use crate::error::Result;
use crate::types::AppConfig;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches, Command};
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use serde_derive::Deserialize;

#[derive(Debug, Deserialize)]
struct SerializedAppConfig {
    program: String,
    program_args: Vec<String>,
    colors_file: Option<String>,
    extensions: Vec<String>,
}

fn load_config(
    user_config: Option<&Path>,
    config_path: Option<&str>,
) -> Result<SerializedAppConfig> {
    let mut builder = ConfigBuilder::<DefaultState>::default()
        .set_default("program", DEFAULT_PROGRAM)?
        .set_default(
            "program_args",
            DEFAULT_PROGRAM_ARGS
                .iter()
                .map(|arg| arg.to_string())
                .collect::<Vec<_>>(),
        )?
        .set_default("extensions", default_extensions())?;

    if let Some(path) = user_config.filter(|path| path.exists()) {
        builder = builder.add_source(File::from(path).required(false));
    }

    if let Some(path) = config_path {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    Ok(builder.build()?.try_deserialize()?)
}

fn command() -> Command<'static> {
    Command::new("tricolor-driver")
        .version(VERSION)
        .author("Taylor Beeston")
        .about("Runs tricolor over every test image for every configured color triple")
        .after_help("The colors file holds one triple per line, e.g. '0x1E2761,0xF96167,0xF9E795'. Blank lines are skipped. A file ending in .toml is read as `colors = [[\"c1\", \"c2\", \"c3\"], ...]` instead.\n\nFor every triple and every image directly inside DIR the program is run as:\n\n    <program> [program args] <image> --color <c1> --color <c2> --color <c3> --plot\n\nDefaults can be set in ~/.config/tricolor-driver/config.toml using the keys program, program_args, colors_file and extensions.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .arg(
            Arg::new("colors")
                .long("colors")
                .value_name("FILE")
                .help("File of color triples [default: DIR/colors.txt]")
                .takes_value(true),
        )
        .arg(
            Arg::new("program")
                .short('p')
                .long("program")
                .value_name("PROGRAM")
                .help("Program to run for each image [default: python3]")
                .takes_value(true),
        )
        .arg(
            Arg::new("program-arg")
                .long("program-arg")
                .value_name("ARG")
                .help("Argument placed before the image path, may be repeated [default: tricolor.py]")
                .takes_value(true)
                .allow_hyphen_values(true)
                .multiple_occurrences(true),
        )
        .arg(
            Arg::new("extension")
                .short('e')
                .long("extension")
                .value_name("EXT")
                .help("Image extension to match, may be repeated [default: jpeg, jpg, png]")
                .takes_value(true)
                .multiple_occurrences(true),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Print the commands instead of running them"),
        )
        .arg(
            Arg::new("check-hex")
                .long("check-hex")
                .help("Reject colors that are not 6-digit hex codes before running anything"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Exit with an error if any run of the program failed"),
        )
        .arg(
            Arg::new("DIR")
                .help("Directory holding the test images")
                .default_value(".")
                .index(1),
        )
}

fn values(matches: &ArgMatches, name: &str) -> Option<Vec<String>> {
    matches
        .values_of(name)
        .map(|values| values.map(str::to_string).collect())
}

pub fn init() -> Result<AppConfig> {
    init_from(std::env::args_os(), dirs::home_dir().as_deref())
}

/// `home` is where `~/.config/tricolor-driver/config.toml` is looked up.
pub fn init_from<I, T>(args: I, home: Option<&Path>) -> Result<AppConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().get_matches_from(args);

    let user_config = home.map(|home| home.join(USER_CONFIG_PATH));
    let config = load_config(user_config.as_deref(), matches.value_of("config"))?;

    let image_dir = PathBuf::from(matches.value_of("DIR").unwrap_or("."));

    let colors_path = matches
        .value_of("colors")
        .map(PathBuf::from)
        .or_else(|| config.colors_file.map(PathBuf::from))
        .unwrap_or_else(|| image_dir.join(DEFAULT_COLORS_FILE));

    let program = matches
        .value_of("program")
        .map(str::to_string)
        .unwrap_or(config.program);

    let program_args = values(&matches, "program-arg").unwrap_or(config.program_args);
    let extensions = values(&matches, "extension").unwrap_or(config.extensions);

    Ok(AppConfig {
        image_dir,
        colors_path,
        program,
        program_args,
        extensions,
        dry_run: matches.is_present("dry-run"),
        check_hex: matches.is_present("check-hex"),
        strict: matches.is_present("strict"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn cli_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn defaults() {
        let home = tempfile::tempdir().unwrap();
        let config = init_from(["tricolor-driver", "tests/images"], Some(home.path())).unwrap();

        assert_eq!(config.image_dir, PathBuf::from("tests/images"));
        assert_eq!(config.colors_path, PathBuf::from("tests/images").join("colors.txt"));
        assert_eq!(config.program, "python3");
        assert_eq!(config.program_args, vec!["tricolor.py"]);
        assert!(!config.dry_run && !config.check_hex && !config.strict);
    }

    #[test]
    fn user_config_comes_from_home() {
        let home = tempfile::tempdir().unwrap();
        let user_config = home.path().join(USER_CONFIG_PATH);
        fs::create_dir_all(user_config.parent().unwrap()).unwrap();
        fs::write(&user_config, "colors_file = \"palettes.txt\"\nprogram = \"python\"\n").unwrap();

        let config = init_from(["tricolor-driver", "tests/images"], Some(home.path())).unwrap();
        assert_eq!(config.colors_path, PathBuf::from("palettes.txt"));
        assert_eq!(config.program, "python");

        let config = init_from(["tricolor-driver", "tests/images"], None).unwrap();
        assert_eq!(config.colors_path, PathBuf::from("tests/images").join("colors.txt"));
    }

    #[test]
    fn flags_override_everything() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("driver.toml");
        fs::write(
            &config_file,
            "program = \"python\"\nprogram_args = [\"-u\", \"tricolor.py\"]\ncolors_file = \"palettes.txt\"\nextensions = [\"png\"]\n",
        )
        .unwrap();
        let config_file = config_file.to_str().unwrap();

        let from_file = init_from(["tricolor-driver", "-c", config_file], None).unwrap();
        assert_eq!(from_file.program, "python");
        assert_eq!(from_file.program_args, vec!["-u", "tricolor.py"]);
        assert_eq!(from_file.colors_path, PathBuf::from("palettes.txt"));
        assert_eq!(from_file.extensions, vec!["png"]);

        let from_flags = init_from(
            [
                "tricolor-driver",
                "-c",
                config_file,
                "--program",
                "./tricolor",
                "--program-arg=-v",
                "--program-arg",
                "--fast",
                "--colors",
                "other.txt",
                "-e",
                "jpg",
                "-e",
                "webp",
                "--dry-run",
                "--check-hex",
                "--strict",
            ],
            None,
        )
        .unwrap();
        assert_eq!(from_flags.program, "./tricolor");
        assert_eq!(from_flags.program_args, vec!["-v", "--fast"]);
        assert_eq!(from_flags.colors_path, PathBuf::from("other.txt"));
        assert_eq!(from_flags.extensions, vec!["jpg", "webp"]);
        assert!(from_flags.dry_run && from_flags.check_hex && from_flags.strict);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(init_from(["tricolor-driver", "-c", missing.to_str().unwrap()], None).is_err());
    }
}
