use crate::bars::{ChartRequest, RenderOptions};
use crate::model::{FillBounds, Periodicity};
use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-bars")]
#[command(about = "Shows git commit count bars. Weekends are coloured.")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, value_enum, default_value_t = Periodicity::Month, help = "Bucket commits by day, week, month or year")]
    pub periodicity: Periodicity,

    #[arg(short = 'u', long, default_value = "", help = "Filter by author's e-mail (substring)")]
    pub author: String,

    #[arg(short, long, help = "Oldest first instead of newest first")]
    pub reverse: bool,

    #[arg(short, long, help = "Insert empty days where nothing was committed")]
    pub fill: bool,

    #[arg(long, value_enum, default_value_t = FillBounds::Observed, help = "Fill only between commits, or out to --after/--before")]
    pub fill_bounds: FillBounds,

    #[arg(short, long, help = "Colour each line by weekday (day periodicity)")]
    pub colorize: bool,

    #[arg(long, default_value_t = crate::bars::output::DEFAULT_WIDTH, help = "Width of the longest bar")]
    pub width: usize,

    #[arg(short, long, help = "Verbose logging on stderr")]
    pub verbose: bool,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Leave out merge commits")]
    pub no_merges: bool,

    #[arg(short, long, help = "After date (yyyy-mm-dd hh:mm, RFC3339, \"2 weeks ago\" or a commit)")]
    pub after: Option<String>,

    #[arg(short, long, help = "Before date (yyyy-mm-dd hh:mm, RFC3339, \"2 weeks ago\" or a commit)")]
    pub before: Option<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn request(&self) -> ChartRequest {
        ChartRequest {
            periodicity: self.periodicity,
            author: self.author.clone(),
            reverse: self.reverse,
            fill: self.fill,
            fill_bounds: self.fill_bounds,
            render: RenderOptions {
                width: self.width,
                colorize: self.colorize,
            },
        }
    }

    pub fn execute(self) -> Result<()> {
        crate::bars::exec(&self.common, &self.request())
    }
}
