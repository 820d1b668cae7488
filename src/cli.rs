use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "passim-corpus",
    version,
    about = "Convert tafsir subchapter texts into a passim JSON-lines corpus"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Build(BuildArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[arg(long, env = "PASSIM_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, env = "PASSIM_OUTPUT_FILE", default_value = "json/passim_input.json")]
    pub output_file: PathBuf,

    #[arg(
        long,
        env = "PASSIM_METADATA_PATH",
        default_value = "metadata/tafsir_metadata.csv"
    )]
    pub metadata_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub no_metadata: bool,

    #[arg(short, long, requires = "aya")]
    pub sura: Option<u32>,

    #[arg(short, long, requires = "sura")]
    pub aya: Option<u32>,

    #[arg(long)]
    pub run_manifest: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, env = "PASSIM_OUTPUT_FILE", default_value = "json/passim_input.json")]
    pub output_file: PathBuf,

    #[arg(
        long,
        env = "PASSIM_METADATA_PATH",
        default_value = "metadata/tafsir_metadata.csv"
    )]
    pub metadata_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use clap::error::ErrorKind;

    use super::{Cli, Commands};

    fn parse_build(argv: &[&str]) -> super::BuildArgs {
        let cli = Cli::try_parse_from(argv).expect("arguments should parse");
        match cli.command {
            Commands::Build(args) => args,
            other => panic!("expected build command, got {other:?}"),
        }
    }

    #[test]
    fn build_without_range_flags_has_no_filter() {
        let args = parse_build(&["passim-corpus", "build"]);
        assert!(args.sura.is_none());
        assert!(args.aya.is_none());
    }

    #[test]
    fn build_accepts_long_range_flags() {
        let args = parse_build(&["passim-corpus", "build", "--sura", "2", "--aya", "255"]);
        assert_eq!(args.sura, Some(2));
        assert_eq!(args.aya, Some(255));
    }

    #[test]
    fn build_accepts_short_range_flags() {
        let args = parse_build(&["passim-corpus", "build", "-s", "3", "-a", "7"]);
        assert_eq!(args.sura, Some(3));
        assert_eq!(args.aya, Some(7));
    }

    #[test]
    fn sura_without_aya_is_rejected() {
        let err = Cli::try_parse_from(["passim-corpus", "build", "--sura", "2"])
            .expect_err("sura alone should be rejected");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn aya_without_sura_is_rejected() {
        let err = Cli::try_parse_from(["passim-corpus", "build", "--aya", "255"])
            .expect_err("aya alone should be rejected");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
