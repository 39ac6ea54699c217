use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "recast", about = "Coerce text cells and row files into typed records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Guess the typed value of each text argument
    Infer(InferArgs),
    /// Infer a value and coerce it into a type
    Coerce(CoerceArgs),
    /// Read a row file, index its records by key and write them back sorted
    Reformat(ReformatArgs),
}

#[derive(Args, Clone, Debug)]
pub struct InferArgs {
    /// Text cells to infer
    #[arg(required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Clone, Debug)]
pub struct CoerceArgs {
    /// Text cell to coerce
    pub text: String,

    /// Target type, e.g. `int`, `List[str]`, `dict[str, int]`
    #[arg(long = "type", short = 't')]
    pub ty: String,

    /// Coerce the raw text instead of its inferred value
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ReformatArgs {
    /// Path to TOML config file with record definitions
    #[arg(long, default_value = "recast.toml", env = "RECAST_CONFIG")]
    pub config: PathBuf,

    /// Row file or workbook (.xls, .xlsx, .xlsm) to read
    #[arg(long)]
    pub input: PathBuf,

    /// Rows skipped at the top of each worksheet when reading a workbook
    #[arg(long, default_value_t = 0)]
    pub header_rows: usize,

    /// Row file to write
    #[arg(long)]
    pub output: PathBuf,
}
