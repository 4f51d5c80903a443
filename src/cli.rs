use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "folio",
    version,
    about = "Select and extract text from laid-out book pages.",
    long_about = None
)]
pub struct Cli {
    /// Use a specific configuration file
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Enable debug output
    #[clap(long)]
    pub debug: bool,

    /// Lay pages out as one continuous strip
    #[clap(long)]
    pub scroll: bool,

    /// Scroll by this many pixels before selecting (repeatable, negative moves forward)
    #[clap(long, value_name = "PIXELS", allow_negative_numbers = true)]
    pub scroll_by: Vec<f32>,

    /// Begin a selection at the character under this point
    #[clap(long, value_name = "X,Y", value_parser = parse_point)]
    pub tap: Option<(f32, f32)>,

    /// Drag the start handle to this point
    #[clap(long, value_name = "X,Y", value_parser = parse_point)]
    pub start: Option<(f32, f32)>,

    /// Drag the end handle to this point
    #[clap(long, value_name = "X,Y", value_parser = parse_point)]
    pub end: Option<(f32, f32)>,

    /// Select the first match on the current page
    #[clap(long, value_name = "REGEX")]
    pub find: Option<String>,

    /// Print a bookmark for the selection as JSON
    #[clap(long)]
    pub bookmark: bool,

    /// Laid-out pages as JSON
    #[clap(name = "DOCUMENT")]
    pub document: PathBuf,
}

/// Parses `X,Y` into view coordinates.
pub fn parse_point(value: &str) -> Result<(f32, f32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|err| format!("invalid coordinate `{part}`: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}
