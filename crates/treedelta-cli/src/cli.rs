use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "treedelta",
    about = "Structural diff of two JSON documents",
    version,
)]
pub struct Cli {
    /// Old JSON document
    pub left: PathBuf,

    /// New JSON document
    pub right: PathBuf,

    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Prefix array elements with their index
    #[arg(long)]
    pub show_index: bool,

    /// Color added and deleted lines
    #[arg(long)]
    pub color: bool,

    /// Maximum container nesting, 0 for no limit
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// TOML file with [compare] and [format] tables
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Exit with status 1 when the documents differ
    #[arg(long)]
    pub exit_code: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Annotated document with +/- markers
    Text,
    /// Delta tree as JSON
    Json,
    /// Change counts and similarity
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_positional_files() {
        let cli = Cli::try_parse_from(["treedelta", "a.json", "b.json"]).unwrap();
        assert_eq!(cli.left, PathBuf::from("a.json"));
        assert_eq!(cli.right, PathBuf::from("b.json"));
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(!cli.show_index);
        assert!(!cli.color);
        assert!(!cli.exit_code);
        assert_eq!(cli.max_depth, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn parse_flags() {
        let cli = Cli::try_parse_from([
            "treedelta",
            "--show-index",
            "--color",
            "--max-depth",
            "16",
            "--config",
            "treedelta.toml",
            "-v",
            "--exit-code",
            "a.json",
            "b.json",
        ])
        .unwrap();
        assert!(cli.show_index);
        assert!(cli.color);
        assert!(cli.verbose);
        assert!(cli.exit_code);
        assert_eq!(cli.max_depth, Some(16));
        assert_eq!(cli.config, Some(PathBuf::from("treedelta.toml")));
    }

    #[test]
    fn parse_output_formats() {
        let cli = Cli::try_parse_from(["treedelta", "-o", "json", "a", "b"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        let cli = Cli::try_parse_from(["treedelta", "--output", "summary", "a", "b"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Summary);
        assert!(Cli::try_parse_from(["treedelta", "--output", "xml", "a", "b"]).is_err());
    }

    #[test]
    fn both_files_required() {
        assert!(Cli::try_parse_from(["treedelta", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["treedelta"]).is_err());
    }
}
