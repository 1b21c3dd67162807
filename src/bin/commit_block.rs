#[macro_use]
extern crate tracing;

use anyhow::{Context, Result};
use std::path::PathBuf;
use structopt::StructOpt;
use xbridge::{
    bridge::{ledger::commit, message::Address, traits::SystemClock, Parameter},
    digest::Digest,
    utils::init_tracing_subscriber,
    SimStore,
};

#[derive(StructOpt, Debug)]
struct Opt {
    /// store path, should be a directory
    #[structopt(short, long, parse(from_os_str))]
    store: PathBuf,

    /// create the store instead of opening an existing one
    #[structopt(long)]
    init: bool,

    /// commit interval in blocks (with --init)
    #[structopt(long, default_value = "10800")]
    blocks_per_commit_interval: u64,

    /// finalization window in seconds (with --init)
    #[structopt(long, default_value = "10800")]
    time_to_finalize: u64,

    /// size of the commit-slot ring (with --init)
    #[structopt(long, default_value = "240")]
    num_commit_slots: u64,

    /// designated committer address (with --init)
    #[structopt(long)]
    committer: Option<Address>,

    /// caller identity of this commit
    #[structopt(short, long)]
    caller: Address,

    /// block id to commit
    #[structopt(short, long)]
    block_id: Digest,

    /// commit height the block settles
    #[structopt(short = "-H", long)]
    commit_height: u64,
}

fn main() -> Result<()> {
    init_tracing_subscriber("info")?;
    let opts = Opt::from_args();

    let mut store = if opts.init {
        let committer = opts
            .committer
            .context("--committer is required with --init")?;
        let param = Parameter::new(
            opts.blocks_per_commit_interval,
            opts.time_to_finalize,
            opts.num_commit_slots,
            committer,
        );
        SimStore::create(&opts.store, param)?
    } else {
        SimStore::open(&opts.store)?
    };

    commit(
        &mut store,
        &SystemClock,
        &opts.caller,
        opts.block_id,
        opts.commit_height,
    )?;
    info!(
        "block {} committed at commit height {}",
        opts.block_id, opts.commit_height
    );
    Ok(())
}
