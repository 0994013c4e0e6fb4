use clap::Args;

use scriptkit::archive::{self, ArchiveRequest, ArchiveSummary};
use scriptkit::extensions::ExtensionList;
use scriptkit::io::expand_path;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ArchiveArgs {
    /// Directory whose files are archived (not recursive)
    #[arg(long)]
    pub source: String,

    /// Root of the content-addressed store
    #[arg(long)]
    pub dest: String,

    /// Extensions to include, comma separated (e.g. jpg,png)
    #[arg(short, long)]
    pub extensions: ExtensionList,

    /// Characters per shard directory name
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Leading digest characters split into shard directories
    #[arg(long, value_name = "N")]
    pub prefix_len: Option<usize>,

    /// Show what would be copied without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

pub fn run(args: ArchiveArgs, global: &GlobalArgs) -> CmdResult<ArchiveSummary> {
    let defaults = &global.defaults.archive;
    let request = ArchiveRequest {
        source: expand_path(&args.source),
        dest: expand_path(&args.dest),
        extensions: args.extensions,
        chunk_size: args.chunk_size.unwrap_or(defaults.chunk_size),
        prefix_len: args.prefix_len.unwrap_or(defaults.digest_prefix_len),
    };

    let plan = archive::plan_archive(&request)?;
    let summary = archive::execute_archive(plan, args.dry_run)?;
    Ok((summary, 0))
}
