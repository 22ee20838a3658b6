//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Convert Half-Life 2 BSP (Source) world geometry to a binary STL mesh.
///
/// The output file is placed in ./bsp_to_stl_output/.
#[derive(Debug, Parser)]
#[command(name = "bsp2stl", version)]
pub struct Args {
    /// Path to the input .bsp file
    pub input: PathBuf,

    /// File name for the STL inside the output directory
    pub output_name: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Disable the face processing progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("bsp2stl").chain(args.iter().copied()))
    }

    #[test]
    fn definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn positional_and_flags() {
        let args = parse(&[
            "--debug",
            "d1_trainstation_01.bsp",
            "station.stl",
            "--no-progress",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("d1_trainstation_01.bsp"));
        assert_eq!(args.output_name, "station.stl");
        assert!(args.debug);
        assert!(args.no_progress);
    }

    #[test]
    fn flags_default_off() {
        let args = parse(&["in.bsp", "out.stl"]).unwrap();
        assert!(!args.debug);
        assert!(!args.no_progress);
    }

    #[test]
    fn help_is_requested() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn usage_errors_exit_with_two() {
        let cases: [&[&str]; 3] = [
            &["in.bsp"],
            &["in.bsp", "out.stl", "extra"],
            &["--verbose", "in.bsp", "out.stl"],
        ];
        for bad in cases {
            let err = parse(bad).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{bad:?}");
        }
    }
}
