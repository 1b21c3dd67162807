#[macro_use]
extern crate tracing;

use anyhow::Result;
use std::{fs, path::PathBuf};
use structopt::StructOpt;
use xbridge::{
    bridge::proof_builder::build_relay_params,
    utils::{init_tracing_subscriber, load_raw_block_from_file},
};

#[derive(StructOpt, Debug)]
struct Opt {
    /// raw block input, should be a JSON file
    #[structopt(short, long, parse(from_os_str))]
    input: PathBuf,

    /// index of the message to prove
    #[structopt(short = "-m", long)]
    index: u64,

    /// output path for the relay params, should be a file
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,
}

fn main() -> Result<()> {
    init_tracing_subscriber("info")?;
    let opts = Opt::from_args();

    let block = load_raw_block_from_file(&opts.input)?;
    let params = build_relay_params(&block, opts.index)?;
    info!(
        "message {} of block {}: root {}, {} proof elements",
        opts.index,
        params.block_id(),
        params.application.output_messages_root,
        params.proof.path.len()
    );

    let s = serde_json::to_string_pretty(&params)?;
    fs::write(&opts.output, &s)?;
    Ok(())
}
