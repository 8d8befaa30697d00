use clap::Parser;
use std::ffi::OsString;

/// Convert Markdown to HTML with the colocated conversion script
#[derive(Parser, Debug)]
#[command(name = "mdconvert", version, about)]
pub struct Cli {
    /// Input Markdown path followed by output HTML path.
    /// Both are passed through to the conversion script unchanged.
    #[arg(value_name = "PATH", allow_hyphen_values = true)]
    pub paths: Vec<OsString>,

    /// Program used to run the conversion script
    #[arg(long, value_name = "PROGRAM", default_value = "node")]
    pub interpreter: OsString,

    /// File name of the conversion script, looked up next to this executable
    #[arg(long, value_name = "NAME", default_value = "convert.js")]
    pub script: OsString,

    /// Print debug logs to stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_convert_js_with_node() {
        let cli = Cli::try_parse_from(["mdconvert", "a", "b"]).unwrap();
        assert_eq!(cli.interpreter, "node");
        assert_eq!(cli.script, "convert.js");
        assert_eq!(cli.paths, ["a", "b"]);
        assert!(!cli.verbose);
    }

    #[test]
    fn paths_may_start_with_a_hyphen() {
        let cli = Cli::try_parse_from([
            "mdconvert",
            "--interpreter",
            "sh",
            "-notes.md",
            "notes.html",
        ])
        .unwrap();
        assert_eq!(cli.interpreter, "sh");
        assert_eq!(cli.paths, ["-notes.md", "notes.html"]);
    }

    #[test]
    fn options_before_paths_are_still_options() {
        let cli = Cli::try_parse_from(["mdconvert", "--verbose", "notes.md", "notes.html"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.paths, ["notes.md", "notes.html"]);
    }
}
