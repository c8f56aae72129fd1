use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Number of related products kept per item [default: 4]
    #[arg(long, allow_negative_numbers = true)]
    pub k_products: Option<i64>,

    /// Number of related blogs kept per item [default: 3]
    #[arg(long, allow_negative_numbers = true)]
    pub k_blogs: Option<i64>,

    /// Drop candidates scoring below this similarity (0.0 to 1.0)
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Compute related content without writing any record
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Combined export to split
    #[arg(long, short, default_value = "data/data.json")]
    pub input: PathBuf,
}
