use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "factorsphere",
    version,
    about = "academic journal rankings, search and recommendations",
    long_about = "factorsphere browses a static dataset of academic journals: rankings, citation lists, search and per-journal details, plus abstract-based recommendations from an external service.\n\nExamples:\n  factorsphere top\n  factorsphere search nature --sort impact\n  factorsphere details 0028-0836\n  factorsphere --dataset https://host/factorsphere_data.json cited -o cited.json\n\nTip: Use --config to persist the dataset location and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        global = true,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        global = true,
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        global = true,
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        global = true,
        help_heading = "Output",
        help = "Write results to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        global = true,
        help_heading = "Output",
        help = "Output format (text or json)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.factorsphere/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'D',
        long = "ds",
        visible_alias = "dataset",
        value_name = "PATH|URL",
        global = true,
        help_heading = "Input",
        help = "Journal dataset (JSON array) as a local path or http(s) URL."
    )]
    pub dataset: Option<String>,

    #[arg(
        long = "dict",
        visible_alias = "dictionary",
        value_name = "PATH|URL",
        global = true,
        help_heading = "Input",
        help = "Field dictionary CSV (field,full,short) used for labels."
    )]
    pub dictionary: Option<String>,

    #[arg(
        short = 'E',
        long = "ep",
        visible_alias = "endpoint",
        value_name = "URL",
        global = true,
        help_heading = "HTTP",
        help = "Recommendation service endpoint."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        global = true,
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        global = true,
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search journals by name, ISSN or category.
    Search(SearchArgs),
    /// Top ranked journals (lowest SCImago rank first).
    Top,
    /// Most cited journals.
    Cited,
    /// Every journal with an impact factor, highest first.
    List,
    /// Show one journal by ISSN.
    Details(DetailsArgs),
    /// Recommend journals for an abstract.
    Recommend(RecommendArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    #[arg(value_name = "TERM", help = "Case-insensitive text matched against name, ISSN and categories.")]
    pub term: Option<String>,

    #[arg(
        short = 'k',
        long = "cat",
        visible_alias = "category",
        value_name = "CATEGORY",
        help_heading = "Search",
        help = "Only keep journals whose categories contain this text."
    )]
    pub category: Option<String>,

    #[arg(
        short = 's',
        long = "srt",
        visible_alias = "sort",
        value_name = "KEY",
        help_heading = "Search",
        help = "Sort key: impact, name, recent or none."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'l',
        long = "lim",
        visible_alias = "limit",
        value_name = "N",
        help_heading = "Search",
        help = "Maximum number of results (default 20)."
    )]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DetailsArgs {
    #[arg(value_name = "ISSN", help = "Linking ISSN of the journal.")]
    pub issn: Option<String>,

    #[arg(
        short = 'q',
        long = "qs",
        visible_alias = "query",
        value_name = "QUERY",
        help_heading = "Details",
        help = "Detail page query string carrying the id (e.g. '?id=0028-0836')."
    )]
    pub query: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RecommendArgs {
    #[arg(value_name = "ABSTRACT", help = "Abstract text.")]
    pub text: Option<String>,

    #[arg(
        short = 'f',
        long = "af",
        visible_alias = "file",
        value_name = "FILE",
        help_heading = "Recommend",
        help = "Read the abstract from a file."
    )]
    pub file: Option<String>,
}
